//! Decision Module
//!
//! Orchestrates rule gate → fallback → classifier into one verdict.
//! This is where `human` / `bot` is decided and tagged with the path
//! that produced it.
//!
//! ## Usage
//! ```ignore
//! use smartcaptcha_core::logic::decision::DecisionEngine;
//! use smartcaptcha_core::logic::model::load_or_fallback;
//!
//! let engine = DecisionEngine::with_classifier(load_or_fallback("captcha_model.onnx"));
//! let decision = engine.verify(&payload)?;
//! ```

pub mod engine;
pub mod types;


pub use engine::{DecisionEngine, EngineError, EngineStatus, ModeCounts};
pub use types::{round_confidence, Decision, DecisionMode, Verdict};
