//! ONNX Runtime adapter
//!
//! Expects a scikit forest exported with `skl2onnx` and `zipmap=False`:
//! one `[1, 5]` float input, a `label` output and a `[1, 2]`
//! `probabilities` output where column 1 is the human class.

use std::path::Path;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use super::inference::{check_probability, Classifier, InferenceError, ModelFormat, ModelLoadError, ModelMetadata};
use crate::logic::features::{FeatureVector, FEATURE_COUNT};

/// Output name used by skl2onnx for class probabilities
pub const PROBABILITY_OUTPUT: &str = "probabilities";

/// Column of the positive (human) class
const HUMAN_CLASS_INDEX: usize = 1;

pub struct OnnxClassifier {
    // `Session::run` needs exclusive access
    session: Mutex<Session>,
    output_name: String,
    metadata: ModelMetadata,
}

impl OnnxClassifier {
    /// Load ONNX model from file
    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        if !path.exists() {
            return Err(ModelLoadError::NotFound(path.to_path_buf()));
        }

        let session = Session::builder()
            .map_err(|e| ModelLoadError::Runtime(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ModelLoadError::Runtime(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(path)
            .map_err(|e| ModelLoadError::Runtime(format!("Failed to load model: {}", e)))?;

        let output_name = select_probability_output(&session)?;
        log::debug!("ONNX probability output: {}", output_name);

        Ok(Self {
            session: Mutex::new(session),
            output_name,
            metadata: ModelMetadata::new(path.display().to_string(), ModelFormat::Onnx),
        })
    }
}

/// Prefer the `probabilities` output, otherwise the last declared one
fn select_probability_output(session: &Session) -> Result<String, ModelLoadError> {
    let names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();

    if names.iter().any(|n| n == PROBABILITY_OUTPUT) {
        return Ok(PROBABILITY_OUTPUT.to_string());
    }

    names
        .last()
        .cloned()
        .ok_or_else(|| ModelLoadError::Invalid("model declares no outputs".to_string()))
}

impl Classifier for OnnxClassifier {
    fn predict_human(&self, vector: &FeatureVector) -> Result<f64, InferenceError> {
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), vector.to_f32().to_vec())
            .map_err(|e| InferenceError::Shape(e.to_string()))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError::Runtime(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError::Runtime(e.to_string()))?;

        let output = outputs
            .get(self.output_name.as_str())
            .ok_or_else(|| InferenceError::MissingOutput(self.output_name.clone()))?;

        let (_, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::Runtime(format!("Extract error: {}", e)))?;

        let p_human = data.get(HUMAN_CLASS_INDEX).copied().ok_or_else(|| {
            InferenceError::Shape(format!("expected 2 class probabilities, got {}", data.len()))
        })?;

        check_probability(f64::from(p_human))
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::logic::decision::{DecisionEngine, DecisionMode, Verdict};
    use crate::logic::model::load_classifier;

    // Linear fixtures: probabilities = [1 - entropy, entropy]
    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
    }

    #[test]
    fn test_reads_human_column_of_probabilities() {
        let clf = OnnxClassifier::load(&fixture("linear_probabilities.onnx")).unwrap();
        assert_eq!(clf.output_name, PROBABILITY_OUTPUT);
        assert_eq!(clf.metadata().format, ModelFormat::Onnx);

        let p = clf.predict_human(&FeatureVector::new(0.5, 0.3, 1.0, 2.0, 1.0)).unwrap();
        assert!((p - 0.3).abs() < 1e-6);

        let p = clf.predict_human(&FeatureVector::new(0.5, 0.9, 1.0, 2.0, 1.0)).unwrap();
        assert!((p - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_falls_back_to_last_output() {
        // outputs are `label` then `scores`
        let clf = OnnxClassifier::load(&fixture("linear_unnamed_output.onnx")).unwrap();
        assert_eq!(clf.output_name, "scores");

        let p = clf.predict_human(&FeatureVector::new(0.5, 0.8, 1.0, 2.0, 1.0)).unwrap();
        assert!((p - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_engine_thresholds_onnx_score() {
        let classifier = load_classifier(fixture("linear_probabilities.onnx")).unwrap();
        let engine = DecisionEngine::with_classifier(Some(classifier));

        let bot = engine.decide(&FeatureVector::new(0.5, 0.3, 1.0, 2.0, 1.0)).unwrap();
        assert_eq!(bot.decision, Verdict::Bot);
        assert_eq!(bot.confidence, 0.3);
        assert_eq!(bot.mode, DecisionMode::MlEnabled);

        let human = engine.decide(&FeatureVector::new(0.5, 0.9, 1.0, 2.0, 1.0)).unwrap();
        assert_eq!(human.decision, Verdict::Human);
        assert_eq!(human.confidence, 0.9);
    }
}
