//! Tree-ensemble adapter
//!
//! Evaluates a random forest exported as JSON, one set of node arrays per
//! tree (scikit `tree_` layout). Split rule: `x[feature] <= threshold`
//! goes left; `-1` in `children_left` marks a leaf. The forest probability
//! is the mean of the per-tree leaf class shares, as `predict_proba` does.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::inference::{check_probability, Classifier, InferenceError, ModelFormat, ModelLoadError, ModelMetadata};
use crate::logic::features::{layout::validate_feature_names, FeatureVector, FEATURE_COUNT};

/// Child index marking a leaf
pub const LEAF: i64 = -1;

/// One fitted tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class weights `[bot, human]`
    pub value: Vec<[f64; 2]>,
}

/// Serialized forest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestModel {
    #[serde(default)]
    pub model_id: String,
    /// Column names the forest was trained on (must match the layout)
    #[serde(default)]
    pub feature_names: Vec<String>,
    pub trees: Vec<DecisionTree>,
}

impl DecisionTree {
    fn node_count(&self) -> usize {
        self.children_left.len()
    }

    /// Check that every walk from the root ends at a leaf
    pub fn validate(&self) -> Result<(), String> {
        let n = self.node_count();
        if n == 0 {
            return Err("tree has no nodes".to_string());
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(format!("node arrays disagree on length (expected {})", n));
        }

        for node in 0..n {
            let left = self.children_left[node];
            let right = self.children_right[node];

            if left == LEAF || right == LEAF {
                if left != right {
                    return Err(format!("node {} has exactly one child", node));
                }
                let [bot, human] = self.value[node];
                if !(bot.is_finite() && human.is_finite()) || bot < 0.0 || human < 0.0 || bot + human <= 0.0 {
                    return Err(format!("leaf {} has invalid class weights", node));
                }
                continue;
            }

            // children always follow their parent, so walks cannot cycle
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(format!("node {} has out-of-range child {}", node, child));
                }
            }
            if self.feature[node] < 0 || self.feature[node] >= FEATURE_COUNT as i64 {
                return Err(format!("node {} splits on unknown feature {}", node, self.feature[node]));
            }
            if !self.threshold[node].is_finite() {
                return Err(format!("node {} has non-finite threshold", node));
            }
        }

        Ok(())
    }

    /// Class-1 share at the leaf reached by `x`
    fn predict_human(&self, x: &[f64; FEATURE_COUNT]) -> f64 {
        let mut node = 0usize;

        while self.children_left[node] != LEAF {
            let feature = self.feature[node] as usize;
            node = if x[feature] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }

        let [bot, human] = self.value[node];
        human / (bot + human)
    }
}

impl ForestModel {
    pub fn validate(&self) -> Result<(), ModelLoadError> {
        if self.trees.is_empty() {
            return Err(ModelLoadError::Invalid("forest has no trees".to_string()));
        }
        if !self.feature_names.is_empty() {
            validate_feature_names(&self.feature_names)?;
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate()
                .map_err(|e| ModelLoadError::Invalid(format!("tree {}: {}", i, e)))?;
        }
        Ok(())
    }
}

pub struct ForestClassifier {
    model: ForestModel,
    metadata: ModelMetadata,
}

impl ForestClassifier {
    /// Validate and wrap an in-memory forest
    pub fn new(model: ForestModel, source: impl Into<String>) -> Result<Self, ModelLoadError> {
        model.validate()?;
        Ok(Self {
            model,
            metadata: ModelMetadata::new(source, ModelFormat::Forest),
        })
    }

    pub fn from_json(json: &str, source: impl Into<String>) -> Result<Self, ModelLoadError> {
        let model: ForestModel = serde_json::from_str(json)?;
        Self::new(model, source)
    }

    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        let json = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ModelLoadError::NotFound(path.to_path_buf())
            } else {
                ModelLoadError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let forest = Self::from_json(&json, path.display().to_string())?;
        log::debug!("Forest {} has {} trees", path.display(), forest.tree_count());
        Ok(forest)
    }

    pub fn tree_count(&self) -> usize {
        self.model.trees.len()
    }
}

impl Classifier for ForestClassifier {
    fn predict_human(&self, vector: &FeatureVector) -> Result<f64, InferenceError> {
        // scikit compares float32 inputs against float64 thresholds
        let x = vector.to_f32().map(f64::from);

        let sum: f64 = self.model.trees.iter().map(|tree| tree.predict_human(&x)).sum();
        check_probability(sum / self.model.trees.len() as f64)
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}
