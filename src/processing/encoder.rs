//! Multi-label binarizers turning label collections into fixed-order multi-hot columns

use crate::config::UnknownLabelPolicy;
use crate::error::{RecommenderError, Result};
use crate::processing::features::FeatureRow;
use crate::processing::types::IntelligenceLabel;
use log::warn;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Encoder artifact as written by the training pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderArtifact {
    pub classes: Vec<String>,
}

/// One column per known label, in the order the encoder was fitted with
#[derive(Debug, Clone)]
pub struct MultiLabelBinarizer {
    name: String,
    classes: Vec<String>,
    index: HashMap<String, usize>,
}

impl MultiLabelBinarizer {
    pub fn new(name: impl Into<String>, classes: Vec<String>) -> Self {
        let mut index = HashMap::with_capacity(classes.len());
        for (position, class) in classes.iter().enumerate() {
            // first position wins if the artifact lists a class twice
            index.entry(class.clone()).or_insert(position);
        }

        Self {
            name: name.into(),
            classes,
            index,
        }
    }

    pub fn from_artifact(name: impl Into<String>, artifact: EncoderArtifact) -> Self {
        Self::new(name, artifact.classes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Encode one sample into a named row, columns named after the classes
    pub fn transform<I, S>(&self, labels: I, policy: UnknownLabelPolicy) -> Result<FeatureRow>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = Array1::<f32>::zeros(self.classes.len());
        let mut unknown = Vec::new();

        for label in labels {
            let label = label.as_ref();
            match self.index.get(label) {
                Some(&position) => values[position] = 1.0,
                None => unknown.push(label.to_string()),
            }
        }

        if !unknown.is_empty() {
            match policy {
                UnknownLabelPolicy::Error => {
                    return Err(RecommenderError::FeaturePreparation(format!(
                        "unknown label(s) for {} encoder: {}",
                        self.name,
                        unknown.join(", ")
                    )));
                }
                UnknownLabelPolicy::Ignore => {
                    warn!(
                        "unknown label(s) for {} encoder will be ignored: {}",
                        self.name,
                        unknown.join(", ")
                    );
                }
            }
        }

        FeatureRow::new(self.classes.clone(), values)
    }
}

/// The three encoders the classifier was trained with
#[derive(Debug, Clone)]
pub struct FeatureEncoders {
    pub skills: MultiLabelBinarizer,
    pub primary_intelligence: MultiLabelBinarizer,
    pub secondary_intelligence: MultiLabelBinarizer,
}

impl FeatureEncoders {
    /// Encode each input with its own encoder, in training column order
    pub fn encode<S: AsRef<str>>(
        &self,
        skills: impl IntoIterator<Item = S>,
        primary: IntelligenceLabel,
        secondary: IntelligenceLabel,
        policy: UnknownLabelPolicy,
    ) -> Result<[FeatureRow; 3]> {
        Ok([
            self.skills.transform(skills, policy)?,
            self.primary_intelligence.transform([primary.as_str()], policy)?,
            self.secondary_intelligence.transform([secondary.as_str()], policy)?,
        ])
    }
}
