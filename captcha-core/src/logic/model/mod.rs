//! Model Module - classifier artifact adapters
//!
//! Inference is kept apart from the decision logic so the artifact
//! format can change without touching the composer.

pub mod forest;
pub mod inference;
pub mod onnx;
pub mod threshold;

// Re-export common types
pub use forest::{DecisionTree, ForestClassifier, ForestModel};
pub use inference::{
    load_classifier, load_or_fallback, Classifier, InferenceError, ModelFormat, ModelLoadError, ModelMetadata,
};
pub use onnx::OnnxClassifier;
pub use threshold::{ConfigError, DecisionPolicy, ThresholdConfig, ASSISTED_THRESHOLD, STRICT_THRESHOLD};
