//! Configuration module

use std::env;

use smartcaptcha_core::constants::DEFAULT_MODEL_PATH;
use smartcaptcha_core::logic::model::{self, DecisionPolicy, ThresholdConfig};
use thiserror::Error;

/// Default listen port
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}={value:?} is not a number")]
    InvalidNumber { var: &'static str, value: String },

    #[error(transparent)]
    Decision(#[from] model::ConfigError),
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Classifier artifact (`.onnx` or `.json`)
    pub model_path: String,

    /// Which revision of the ML step to run
    pub policy: DecisionPolicy,

    /// Override of the policy threshold
    pub threshold: Option<f64>,

    /// Environment (development, production)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            model_path: DEFAULT_MODEL_PATH.to_string(),
            policy: DecisionPolicy::default(),
            threshold: None,
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let policy = match lookup("DECISION_POLICY") {
            Some(raw) => raw.parse::<DecisionPolicy>()?,
            None => defaults.policy,
        };

        let threshold = match lookup("DECISION_THRESHOLD") {
            Some(raw) => Some(raw.trim().parse::<f64>().map_err(|_| ConfigError::InvalidNumber {
                var: "DECISION_THRESHOLD",
                value: raw.clone(),
            })?),
            None => None,
        };

        let config = Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            model_path: lookup("MODEL_PATH").unwrap_or(defaults.model_path),

            policy,
            threshold,

            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
        };

        // surface a bad threshold at startup, not on the first request
        config.thresholds()?;
        Ok(config)
    }

    /// Threshold settings for the decision engine
    pub fn thresholds(&self) -> Result<ThresholdConfig, model::ConfigError> {
        let base = ThresholdConfig::for_policy(self.policy);
        match self.threshold {
            Some(t) => base.with_threshold(t),
            None => Ok(base),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.model_path, "captcha_model.onnx");
        assert_eq!(config.policy, DecisionPolicy::Strict);
        assert_eq!(config.thresholds().unwrap().threshold, 0.65);
        assert!(!config.is_production());
    }

    #[test]
    fn test_assisted_policy_with_override() {
        let config = config_from(&[
            ("DECISION_POLICY", "assisted"),
            ("DECISION_THRESHOLD", "0.45"),
            ("PORT", "9000"),
            ("MODEL_PATH", "/models/forest.json"),
            ("ENVIRONMENT", "production"),
        ])
        .unwrap();

        let thresholds = config.thresholds().unwrap();
        assert_eq!(thresholds.policy, DecisionPolicy::Assisted);
        assert_eq!(thresholds.threshold, 0.45);
        assert_eq!(config.port, 9000);
        assert_eq!(config.model_path, "/models/forest.json");
        assert!(config.is_production());
    }

    #[test]
    fn test_invalid_values_fail_at_startup() {
        assert!(matches!(
            config_from(&[("DECISION_POLICY", "lenient")]),
            Err(ConfigError::Decision(model::ConfigError::UnknownPolicy(_)))
        ));
        assert!(matches!(
            config_from(&[("DECISION_THRESHOLD", "high")]),
            Err(ConfigError::InvalidNumber { .. })
        ));
        assert!(matches!(
            config_from(&[("DECISION_THRESHOLD", "1.5")]),
            Err(ConfigError::Decision(model::ConfigError::InvalidThreshold(_)))
        ));
    }
}
