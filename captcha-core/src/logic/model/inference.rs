//! Inference Engine - classifier artifact contract and loading
//!
//! A classifier is loaded once at startup and shared read-only.
//! Failing to load is not fatal: the caller gets `None` and the
//! decision engine runs in fallback mode.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::forest::ForestClassifier;
use super::onnx::OnnxClassifier;
use crate::logic::features::{FeatureVector, LayoutMismatchError};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Serialized artifact formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    /// scikit forest exported through skl2onnx
    Onnx,
    /// Tree-ensemble JSON export
    Forest,
}

impl ModelFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "onnx" => Some(ModelFormat::Onnx),
            "json" => Some(ModelFormat::Forest),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelFormat::Onnx => "onnx",
            ModelFormat::Forest => "forest",
        }
    }
}

impl std::fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub format: ModelFormat,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

impl ModelMetadata {
    pub fn new(model_path: impl Into<String>, format: ModelFormat) -> Self {
        Self {
            model_path: model_path.into(),
            format,
            loaded_at: chrono::Utc::now(),
        }
    }
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Failure while scoring a sample with a loaded classifier
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("input shape error: {0}")]
    Shape(String),

    #[error("model produced no output `{0}`")]
    MissingOutput(String),

    #[error("inference failed: {0}")]
    Runtime(String),

    #[error("probability {0} outside [0, 1]")]
    InvalidProbability(f64),
}

/// Failure while loading a classifier artifact
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("model not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported model format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("model JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model: {0}")]
    Invalid(String),

    #[error(transparent)]
    Layout(#[from] LayoutMismatchError),

    #[error("ONNX runtime error: {0}")]
    Runtime(String),
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Pre-trained binary-probability estimator
pub trait Classifier: Send + Sync {
    /// Probability in [0, 1] that the sample was produced by a human
    fn predict_human(&self, vector: &FeatureVector) -> Result<f64, InferenceError>;

    fn metadata(&self) -> &ModelMetadata;
}

/// Reject anything that is not a probability
pub fn check_probability(p: f64) -> Result<f64, InferenceError> {
    if p.is_finite() && (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(InferenceError::InvalidProbability(p))
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Load a classifier artifact, choosing the adapter by extension
pub fn load_classifier(path: impl AsRef<Path>) -> Result<Arc<dyn Classifier>, ModelLoadError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ModelLoadError::NotFound(path.to_path_buf()));
    }

    match ModelFormat::from_path(path) {
        Some(ModelFormat::Onnx) => Ok(Arc::new(OnnxClassifier::load(path)?)),
        Some(ModelFormat::Forest) => Ok(Arc::new(ForestClassifier::load(path)?)),
        None => Err(ModelLoadError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Startup helper: a missing or broken artifact means fallback mode
pub fn load_or_fallback(path: impl AsRef<Path>) -> Option<Arc<dyn Classifier>> {
    let path = path.as_ref();
    log::info!("Loading classifier from: {}", path.display());

    match load_classifier(path) {
        Ok(classifier) => {
            log::info!(
                "Classifier loaded ({}) - ML decisions enabled",
                classifier.metadata().format
            );
            Some(classifier)
        }
        Err(e) => {
            log::warn!("Classifier unavailable ({}) - running in fallback mode", e);
            None
        }
    }
}
