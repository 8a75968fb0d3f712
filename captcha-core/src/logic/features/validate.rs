//! Payload Validation
//!
//! Converts the untyped request body into a `FeatureVector`.
//! Values pass through untouched: no clamping, scaling or normalization.

use serde_json::{Map, Value};
use thiserror::Error;

use super::layout::{FEATURE_COUNT, FEATURE_LAYOUT};
use super::vector::FeatureVector;

/// Validation failure for an inbound sample
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureError {
    #[error("payload must be a JSON object")]
    NotAnObject,

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` is not a real number (got {found})")]
    InvalidType { field: &'static str, found: String },
}

impl FeatureError {
    /// Name of the offending field, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            FeatureError::NotAnObject => None,
            FeatureError::MissingField(field) => Some(field),
            FeatureError::InvalidType { field, .. } => Some(field),
        }
    }
}

impl FeatureVector {
    /// Validate an untyped payload.
    ///
    /// Fields are checked in layout order and the first failure wins.
    /// Keys outside the layout are ignored.
    pub fn from_payload(payload: &Value) -> Result<Self, FeatureError> {
        let map = payload.as_object().ok_or(FeatureError::NotAnObject)?;
        Self::from_map(map)
    }

    pub fn from_map(map: &Map<String, Value>) -> Result<Self, FeatureError> {
        let mut values = [0.0f64; FEATURE_COUNT];

        for (slot, &field) in values.iter_mut().zip(FEATURE_LAYOUT.iter()) {
            let raw = map.get(field).ok_or(FeatureError::MissingField(field))?;
            *slot = coerce_number(field, raw)?;
        }

        Ok(Self::from_values(values))
    }
}

/// Coerce a JSON value to a finite real number.
///
/// Numbers and numeric strings are accepted; everything else is rejected.
fn coerce_number(field: &'static str, raw: &Value) -> Result<f64, FeatureError> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(FeatureError::InvalidType {
            field,
            found: describe(raw),
        }),
    }
}

fn describe(raw: &Value) -> String {
    match raw {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string {:?}", s),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}
