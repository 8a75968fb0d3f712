//! Rules Module
//!
//! Deterministic checks applied before (or alongside) the classifier.
//!
//! ## Structure
//! - `thresholds`: constants and configurable bounds
//! - `gate`: hard automation gate and the legacy human-like heuristic

pub mod gate;
pub mod thresholds;

pub use gate::{looks_human_like, RuleGate, RuleHit};
pub use thresholds::{HumanLikeThresholds, RuleGateThresholds};
