//! Feature Vector - Core data structure for classifier input
//!
//! One behavioral sample, ordered by `FEATURE_LAYOUT`. Built once per
//! request from validated input and never mutated afterwards.

use serde::{Deserialize, Serialize};

use super::layout::{FEATURE_COUNT, FEATURE_LAYOUT};

/// Validated behavioral sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Build from the five named measurements
    pub fn new(
        avg_mouse_speed: f64,
        mouse_path_entropy: f64,
        click_delay: f64,
        task_completion_time: f64,
        idle_time: f64,
    ) -> Self {
        Self::from_values([
            avg_mouse_speed,
            mouse_path_entropy,
            click_delay,
            task_completion_time,
            idle_time,
        ])
    }

    /// Build from values already in layout order
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    pub fn avg_mouse_speed(&self) -> f64 {
        self.values[0]
    }

    pub fn mouse_path_entropy(&self) -> f64 {
        self.values[1]
    }

    pub fn click_delay(&self) -> f64 {
        self.values[2]
    }

    pub fn task_completion_time(&self) -> f64 {
        self.values[3]
    }

    pub fn idle_time(&self) -> f64 {
        self.values[4]
    }

    /// Single-precision copy for ONNX input tensors
    pub fn to_f32(&self) -> [f32; FEATURE_COUNT] {
        self.values.map(|v| v as f32)
    }

    /// Named JSON object for audit log lines
    pub fn to_log_entry(&self) -> serde_json::Value {
        let named: serde_json::Map<String, serde_json::Value> = FEATURE_LAYOUT
            .iter()
            .zip(self.values.iter())
            .map(|(name, value)| (name.to_string(), serde_json::json!(value)))
            .collect();
        serde_json::Value::Object(named)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_accessors_follow_layout() {
        let vector = FeatureVector::new(0.5, 0.3, 1.0, 2.0, 1.5);

        assert_eq!(vector.avg_mouse_speed(), 0.5);
        assert_eq!(vector.mouse_path_entropy(), 0.3);
        assert_eq!(vector.click_delay(), 1.0);
        assert_eq!(vector.task_completion_time(), 2.0);
        assert_eq!(vector.idle_time(), 1.5);
        assert_eq!(vector, FeatureVector::from_values([0.5, 0.3, 1.0, 2.0, 1.5]));
    }

    #[test]
    fn test_to_log_entry() {
        let vector = FeatureVector::new(0.5, 0.3, 1.0, 2.0, 1.0);
        let log = vector.to_log_entry();
        assert_eq!(log["task_completion_time"], 2.0);
        assert_eq!(log.as_object().map(|m| m.len()), Some(FEATURE_COUNT));
    }
}
