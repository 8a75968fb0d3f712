//! Decision Threshold Configuration
//!
//! Two revisions of the ML step exist and are kept apart:
//! - `Strict`: `p_human >= 0.65`, nothing else
//! - `Assisted`: `p_human >= 0.4` OR the legacy human-like heuristic
//!
//! They disagree near the boundary, so the policy is recorded in the
//! decision mode instead of being blended.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logic::decision::DecisionMode;
use crate::logic::rules::HumanLikeThresholds;

/// Threshold for the strict revision
pub const STRICT_THRESHOLD: f64 = 0.65;

/// Threshold for the assisted revision
pub const ASSISTED_THRESHOLD: f64 = 0.4;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("decision threshold {0} not in [0, 1]")]
    InvalidThreshold(f64),

    #[error("unknown decision policy `{0}` (expected `strict` or `assisted`)")]
    UnknownPolicy(String),
}

/// Which revision of the ML step to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionPolicy {
    #[default]
    Strict,
    Assisted,
}

impl DecisionPolicy {
    pub fn default_threshold(&self) -> f64 {
        match self {
            DecisionPolicy::Strict => STRICT_THRESHOLD,
            DecisionPolicy::Assisted => ASSISTED_THRESHOLD,
        }
    }

    /// Audit tag for verdicts produced by the classifier under this policy
    pub fn mode(&self) -> DecisionMode {
        match self {
            DecisionPolicy::Strict => DecisionMode::MlEnabled,
            DecisionPolicy::Assisted => DecisionMode::MlAssisted,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionPolicy::Strict => "strict",
            DecisionPolicy::Assisted => "assisted",
        }
    }
}

impl std::fmt::Display for DecisionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DecisionPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(DecisionPolicy::Strict),
            "assisted" => Ok(DecisionPolicy::Assisted),
            other => Err(ConfigError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Threshold Configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub policy: DecisionPolicy,

    /// `p_human >= threshold` → human
    pub threshold: f64,

    /// Only consulted by the assisted policy
    pub human_like: HumanLikeThresholds,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self::for_policy(DecisionPolicy::default())
    }
}

impl ThresholdConfig {
    pub fn for_policy(policy: DecisionPolicy) -> Self {
        Self {
            policy,
            threshold: policy.default_threshold(),
            human_like: HumanLikeThresholds::default(),
        }
    }

    /// Override the policy's default threshold
    pub fn with_threshold(mut self, threshold: f64) -> Result<Self, ConfigError> {
        self.threshold = threshold;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threshold.is_finite() && (0.0..=1.0).contains(&self.threshold) {
            Ok(())
        } else {
            Err(ConfigError::InvalidThreshold(self.threshold))
        }
    }

    pub fn mode(&self) -> DecisionMode {
        self.policy.mode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_config_default_is_strict() {
        let config = ThresholdConfig::default();
        assert_eq!(config.policy, DecisionPolicy::Strict);
        assert_eq!(config.threshold, 0.65);
        assert_eq!(config.mode(), DecisionMode::MlEnabled);
    }

    #[test]
    fn test_assisted_policy() {
        let config = ThresholdConfig::for_policy(DecisionPolicy::Assisted);
        assert_eq!(config.threshold, 0.4);
        assert_eq!(config.mode(), DecisionMode::MlAssisted);
    }

    #[test]
    fn test_threshold_override_validation() {
        assert_eq!(ThresholdConfig::default().with_threshold(0.5).unwrap().threshold, 0.5);
        assert_eq!(
            ThresholdConfig::default().with_threshold(1.5),
            Err(ConfigError::InvalidThreshold(1.5))
        );
        assert!(ThresholdConfig::default().with_threshold(f64::NAN).is_err());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("strict".parse::<DecisionPolicy>(), Ok(DecisionPolicy::Strict));
        assert_eq!(" Assisted ".parse::<DecisionPolicy>(), Ok(DecisionPolicy::Assisted));
        assert!(matches!("lenient".parse::<DecisionPolicy>(), Err(ConfigError::UnknownPolicy(_))));
    }
}
