//! Decision Types
//!
//! Output records only - no logic.

use serde::{Deserialize, Serialize};

use crate::constants::CONFIDENCE_DECIMALS;

/// Final verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Human,
    Bot,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Human => "human",
            Verdict::Bot => "bot",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which decision path produced a verdict (audit trail)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecisionMode {
    /// Hard automation gate fired
    RuleBlocked,
    /// No classifier loaded
    Fallback,
    /// Classifier threshold, strict policy
    MlEnabled,
    /// Classifier threshold plus human-like heuristic
    MlAssisted,
}

impl DecisionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionMode::RuleBlocked => "rule-blocked",
            DecisionMode::Fallback => "fallback",
            DecisionMode::MlEnabled => "ml-enabled",
            DecisionMode::MlAssisted => "ml-assisted",
        }
    }
}

impl std::fmt::Display for DecisionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Verification result returned to the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub decision: Verdict,
    /// Probability the sample is human, rounded to 3 decimals
    pub confidence: f64,
    pub mode: DecisionMode,
}

impl Decision {
    pub fn new(decision: Verdict, confidence: f64, mode: DecisionMode) -> Self {
        Self {
            decision,
            confidence: round_confidence(confidence),
            mode,
        }
    }
}

/// Round to `CONFIDENCE_DECIMALS` places, half-to-even on the exact binary value
///
/// Scaling by 1000 first can itself round onto a tie, so the digits come
/// from the decimal expansion instead.
pub fn round_confidence(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", CONFIDENCE_DECIMALS, value)
        .parse()
        .unwrap_or(value)
}
