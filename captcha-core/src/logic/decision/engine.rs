//! Decision Composer
//!
//! Fixed evaluation order, each step terminal:
//! 1. rule gate fires        → (bot, 0.0, rule-blocked)
//! 2. no classifier loaded   → (human, 0.5, fallback)
//! 3. classifier probability → thresholded, mode per policy
//!
//! The engine is built once at startup and shared behind `Arc`.
//! Deciding never mutates anything except the per-mode counters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{Decision, DecisionMode, Verdict};
use crate::constants::{FALLBACK_CONFIDENCE, RULE_BLOCK_CONFIDENCE};
use crate::logic::features::{FeatureError, FeatureVector, LayoutInfo};
use crate::logic::model::{Classifier, ConfigError, DecisionPolicy, InferenceError, ThresholdConfig};
use crate::logic::rules::{looks_human_like, RuleGate};

// ============================================================================
// ERRORS
// ============================================================================

/// Request-level failure. Never downgraded to a fallback verdict.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Invalid(#[from] FeatureError),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

// ============================================================================
// STATUS
// ============================================================================

/// Decisions served per path since startup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeCounts {
    pub rule_blocked: u64,
    pub fallback: u64,
    pub ml: u64,
}

/// Engine snapshot for the status endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub model_name: String,
    pub model_format: Option<String>,
    pub policy: DecisionPolicy,
    pub threshold: f64,
    pub layout: LayoutInfo,
    pub decisions: ModeCounts,
}

#[derive(Debug, Default)]
struct Counters {
    rule_blocked: AtomicU64,
    fallback: AtomicU64,
    ml: AtomicU64,
}

impl Counters {
    fn record(&self, mode: DecisionMode) {
        let counter = match mode {
            DecisionMode::RuleBlocked => &self.rule_blocked,
            DecisionMode::Fallback => &self.fallback,
            DecisionMode::MlEnabled | DecisionMode::MlAssisted => &self.ml,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> ModeCounts {
        ModeCounts {
            rule_blocked: self.rule_blocked.load(Ordering::Relaxed),
            fallback: self.fallback.load(Ordering::Relaxed),
            ml: self.ml.load(Ordering::Relaxed),
        }
    }
}

// ============================================================================
// ENGINE
// ============================================================================

pub struct DecisionEngine {
    rule_gate: RuleGate,
    classifier: Option<Arc<dyn Classifier>>,
    thresholds: ThresholdConfig,
    counters: Counters,
}

impl DecisionEngine {
    /// `classifier = None` puts the engine in fallback mode for its lifetime.
    pub fn new(
        rule_gate: RuleGate,
        classifier: Option<Arc<dyn Classifier>>,
        thresholds: ThresholdConfig,
    ) -> Result<Self, ConfigError> {
        thresholds.validate()?;

        match &classifier {
            Some(c) => log::info!(
                "Decision engine ready: {} policy, threshold {:.2}, model {}",
                thresholds.policy,
                thresholds.threshold,
                c.metadata().model_path
            ),
            None => log::info!("Decision engine ready: fallback mode (no classifier)"),
        }

        Ok(Self {
            rule_gate,
            classifier,
            thresholds,
            counters: Counters::default(),
        })
    }

    /// Engine with default gate and strict threshold
    pub fn with_classifier(classifier: Option<Arc<dyn Classifier>>) -> Self {
        Self {
            rule_gate: RuleGate::default(),
            classifier,
            thresholds: ThresholdConfig::default(),
            counters: Counters::default(),
        }
    }

    /// Validate an untyped payload and decide
    pub fn verify(&self, payload: &serde_json::Value) -> Result<Decision, EngineError> {
        let vector = FeatureVector::from_payload(payload)?;
        Ok(self.decide(&vector)?)
    }

    /// Run the three-step pipeline on a validated sample
    pub fn decide(&self, vector: &FeatureVector) -> Result<Decision, InferenceError> {
        let decision = self.compose(vector)?;
        self.counters.record(decision.mode);

        log::debug!(
            "Decision: {} (confidence {:.3}, mode {})",
            decision.decision,
            decision.confidence,
            decision.mode
        );

        Ok(decision)
    }

    fn compose(&self, vector: &FeatureVector) -> Result<Decision, InferenceError> {
        // RULE_CHECK
        if let Some(hit) = self.rule_gate.evaluate(vector) {
            log::info!("Rule gate fired [{}]: {}", hit.reasons.join(", "), vector.to_log_entry());
            return Ok(Decision::new(Verdict::Bot, RULE_BLOCK_CONFIDENCE, DecisionMode::RuleBlocked));
        }

        // MODEL_AVAILABILITY
        let classifier = match &self.classifier {
            Some(c) => c,
            None => {
                return Ok(Decision::new(Verdict::Human, FALLBACK_CONFIDENCE, DecisionMode::Fallback));
            }
        };

        // ML_SCORE
        let p_human = classifier.predict_human(vector)?;

        let above = p_human >= self.thresholds.threshold;
        let is_human = match self.thresholds.policy {
            DecisionPolicy::Strict => above,
            DecisionPolicy::Assisted => above || looks_human_like(vector, &self.thresholds.human_like),
        };

        let verdict = if is_human { Verdict::Human } else { Verdict::Bot };
        Ok(Decision::new(verdict, p_human, self.thresholds.mode()))
    }

    pub fn status(&self) -> EngineStatus {
        let (model_name, model_format) = match &self.classifier {
            Some(c) => {
                let meta = c.metadata();
                (meta.model_path.clone(), Some(meta.format.to_string()))
            }
            None => ("None".to_string(), None),
        };

        EngineStatus {
            model_loaded: self.classifier.is_some(),
            model_name,
            model_format,
            policy: self.thresholds.policy,
            threshold: self.thresholds.threshold,
            layout: LayoutInfo::current(),
            decisions: self.counters.snapshot(),
        }
    }
}
