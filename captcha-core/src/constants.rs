//! Central Configuration Constants
//!
//! Single source of truth for engine defaults.

/// Default classifier artifact, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "captcha_model.onnx";

/// Confidence reported when the rule gate blocks a sample
pub const RULE_BLOCK_CONFIDENCE: f64 = 0.0;

/// Confidence reported in fallback mode ("no information")
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Decimal places kept in reported confidence
pub const CONFIDENCE_DECIMALS: usize = 3;

