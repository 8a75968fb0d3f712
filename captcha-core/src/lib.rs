//! SmartCAPTCHA Core - behavioral verification decision engine
//!
//! Classifies one telemetry sample from a slider challenge as `human`
//! or `bot`:
//!
//! ```text
//! payload ──► features::validate ──► FeatureVector
//!                                        │
//!                 ┌──────────────────────┘
//!                 ▼
//!          rules::RuleGate ── fires ──► (bot, 0.0, rule-blocked)
//!                 │
//!          classifier loaded? ── no ──► (human, 0.5, fallback)
//!                 │
//!          model::Classifier ──► p_human ≥ T ? human : bot  (ml-enabled)
//! ```

pub mod constants;
pub mod logic;

pub use logic::decision::{Decision, DecisionEngine, DecisionMode, EngineError, EngineStatus, Verdict};
pub use logic::features::{FeatureError, FeatureVector};
pub use logic::model::{load_or_fallback, Classifier, DecisionPolicy, InferenceError, ThresholdConfig};
pub use logic::rules::RuleGate;
