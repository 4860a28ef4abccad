//! Pre-trained gradient-boosted classifier with one binary estimator per job category

use crate::error::{RecommenderError, Result};
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Anything that maps one aligned feature row to a 1 x n_categories matrix of 0/1
pub trait Classifier: Send + Sync {
    fn predict(&self, features: ArrayView1<'_, f32>) -> Result<Array2<u8>>;

    /// Number of output columns this classifier produces
    fn n_outputs(&self) -> usize;

    /// Expected feature width, if the artifact records it
    fn n_features(&self) -> Option<usize> {
        None
    }
}

/// Whether the loaded classifier artifact was trained
pub enum ClassifierState {
    Fitted(Box<dyn Classifier>),
    Unfitted,
}

impl ClassifierState {
    pub fn fitted(classifier: impl Classifier + 'static) -> Self {
        ClassifierState::Fitted(Box::new(classifier))
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self, ClassifierState::Fitted(_))
    }

    pub fn predict(&self, features: ArrayView1<'_, f32>) -> Result<Array2<u8>> {
        match self {
            ClassifierState::Fitted(classifier) => classifier.predict(features),
            ClassifierState::Unfitted => Err(RecommenderError::ModelNotFitted),
        }
    }

    pub fn as_classifier(&self) -> Option<&dyn Classifier> {
        match self {
            ClassifierState::Fitted(classifier) => Some(classifier.as_ref()),
            ClassifierState::Unfitted => None,
        }
    }
}

impl std::fmt::Debug for ClassifierState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifierState::Fitted(classifier) => f
                .debug_struct("Fitted")
                .field("n_outputs", &classifier.n_outputs())
                .field("n_features", &classifier.n_features())
                .finish(),
            ClassifierState::Unfitted => f.write_str("Unfitted"),
        }
    }
}

/// Tree node as serialized by the training pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        leaf: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

/// Boosted trees for one job category; raw score is a log-odds margin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostedEstimator {
    #[serde(default)]
    pub base_score: f64,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    pub trees: Vec<RegressionTree>,
}

/// Classifier artifact; missing or empty estimators mean the model was never fitted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    #[serde(default)]
    pub estimators: Option<Vec<BoostedEstimator>>,
    #[serde(default)]
    pub n_features: Option<usize>,
    #[serde(default)]
    pub threshold: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct GradientBoostedClassifier {
    estimators: Vec<BoostedEstimator>,
    n_features: Option<usize>,
    threshold: f64,
}

fn default_learning_rate() -> f64 {
    1.0
}

const DEFAULT_THRESHOLD: f64 = 0.5;

impl RegressionTree {
    /// Walk from the root to a leaf. `x[feature] < threshold` goes left.
    pub fn evaluate(&self, features: ArrayView1<'_, f32>) -> Result<f64> {
        let mut position = 0usize;
        // a well-formed tree reaches a leaf in fewer steps than it has nodes
        for _ in 0..=self.nodes.len() {
            let node = self.nodes.get(position).ok_or_else(|| {
                RecommenderError::Prediction(format!("tree node {} does not exist", position))
            })?;

            match node {
                TreeNode::Leaf { leaf } => return Ok(*leaf),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.get(*feature).ok_or_else(|| {
                        RecommenderError::Prediction(format!(
                            "split on feature {} but the row has {} features",
                            feature,
                            features.len()
                        ))
                    })?;
                    position = if f64::from(*value) < *threshold { *left } else { *right };
                }
            }
        }

        Err(RecommenderError::Prediction(
            "tree does not terminate in a leaf".to_string(),
        ))
    }
}

impl BoostedEstimator {
    pub fn margin(&self, features: ArrayView1<'_, f32>) -> Result<f64> {
        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.evaluate(features)?;
        }
        Ok(self.base_score + self.learning_rate * sum)
    }

    pub fn probability(&self, features: ArrayView1<'_, f32>) -> Result<f64> {
        Ok(sigmoid(self.margin(features)?))
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl GradientBoostedClassifier {
    pub fn new(estimators: Vec<BoostedEstimator>, n_features: Option<usize>, threshold: f64) -> Self {
        Self {
            estimators,
            n_features,
            threshold,
        }
    }

    /// Per-category probabilities, in job-category column order
    pub fn predict_proba(&self, features: ArrayView1<'_, f32>) -> Result<Vec<f64>> {
        self.check_width(features)?;
        self.estimators
            .iter()
            .map(|estimator| estimator.probability(features))
            .collect()
    }

    fn check_width(&self, features: ArrayView1<'_, f32>) -> Result<()> {
        match self.n_features {
            Some(expected) if expected != features.len() => Err(RecommenderError::Prediction(
                format!(
                    "feature shape mismatch, expected: {}, got {}",
                    expected,
                    features.len()
                ),
            )),
            _ => Ok(()),
        }
    }
}

impl Classifier for GradientBoostedClassifier {
    fn predict(&self, features: ArrayView1<'_, f32>) -> Result<Array2<u8>> {
        let labels: Vec<u8> = self
            .predict_proba(features)?
            .into_iter()
            .map(|p| u8::from(p >= self.threshold))
            .collect();

        Array2::from_shape_vec((1, labels.len()), labels)
            .map_err(|e| RecommenderError::Prediction(e.to_string()))
    }

    fn n_outputs(&self) -> usize {
        self.estimators.len()
    }

    fn n_features(&self) -> Option<usize> {
        self.n_features
    }
}

impl From<ClassifierArtifact> for ClassifierState {
    fn from(artifact: ClassifierArtifact) -> Self {
        match artifact.estimators {
            Some(estimators) if !estimators.is_empty() => {
                ClassifierState::fitted(GradientBoostedClassifier::new(
                    estimators,
                    artifact.n_features,
                    artifact.threshold.unwrap_or(DEFAULT_THRESHOLD),
                ))
            }
            _ => ClassifierState::Unfitted,
        }
    }
}
