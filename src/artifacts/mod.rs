//! Read-only artifacts exported by the offline training pipeline
//! Loaded once at startup into an immutable context shared by every request

pub mod loader;

use crate::output::descriptions::JobCatalog;
use crate::processing::classifier::ClassifierState;
use crate::processing::encoder::FeatureEncoders;
use crate::processing::features::FeatureSchema;
use crate::processing::types::{JobCategory, Rule};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

pub use loader::ArtifactLoader;

/// Everything the engine needs, versioned together
#[derive(Debug)]
pub struct ArtifactContext {
    pub rules: Vec<Rule>,
    pub encoders: FeatureEncoders,
    pub classifier: ClassifierState,
    pub job_categories: Vec<JobCategory>,
    pub feature_schema: FeatureSchema,
    pub catalog: JobCatalog,
}

/// Inconsistency between artifacts that does not prevent loading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ArtifactIssue {
    UnfittedClassifier,
    FeatureCountMismatch { schema: usize, classifier: usize },
    OutputCountMismatch { job_categories: usize, classifier: usize },
    ColumnsOutsideSchema { encoder: String, columns: Vec<String> },
    UnknownRuleSkills { skills: Vec<String> },
    DuplicateSchemaColumns { columns: Vec<String> },
}

impl fmt::Display for ArtifactIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactIssue::UnfittedClassifier => {
                write!(f, "classifier is not fitted; only rule-based recommendations are available")
            }
            ArtifactIssue::FeatureCountMismatch { schema, classifier } => write!(
                f,
                "feature schema has {} columns but the classifier expects {}",
                schema, classifier
            ),
            ArtifactIssue::OutputCountMismatch {
                job_categories,
                classifier,
            } => write!(
                f,
                "{} job categories but the classifier predicts {} outputs",
                job_categories, classifier
            ),
            ArtifactIssue::ColumnsOutsideSchema { encoder, columns } => write!(
                f,
                "{} encoder columns not in the feature schema: {}",
                encoder,
                columns.join(", ")
            ),
            ArtifactIssue::UnknownRuleSkills { skills } => write!(
                f,
                "rules reference skills outside the skill vocabulary: {}",
                skills.join(", ")
            ),
            ArtifactIssue::DuplicateSchemaColumns { columns } => write!(
                f,
                "feature schema repeats columns: {}",
                columns.join(", ")
            ),
        }
    }
}

impl ArtifactContext {
    /// Skill vocabulary users choose from
    pub fn skill_options(&self) -> &[String] {
        self.encoders.skills.classes()
    }

    /// Cross-artifact checks. Alignment tolerates most of these at request time.
    pub fn consistency_issues(&self) -> Vec<ArtifactIssue> {
        let mut issues = Vec::new();

        match self.classifier.as_classifier() {
            None => issues.push(ArtifactIssue::UnfittedClassifier),
            Some(classifier) => {
                if let Some(expected) = classifier.n_features() {
                    if expected != self.feature_schema.len() {
                        issues.push(ArtifactIssue::FeatureCountMismatch {
                            schema: self.feature_schema.len(),
                            classifier: expected,
                        });
                    }
                }
                if classifier.n_outputs() != self.job_categories.len() {
                    issues.push(ArtifactIssue::OutputCountMismatch {
                        job_categories: self.job_categories.len(),
                        classifier: classifier.n_outputs(),
                    });
                }
            }
        }

        for encoder in [
            &self.encoders.skills,
            &self.encoders.primary_intelligence,
            &self.encoders.secondary_intelligence,
        ] {
            let outside = self.feature_schema.unknown_columns(encoder.classes());
            if !outside.is_empty() {
                issues.push(ArtifactIssue::ColumnsOutsideSchema {
                    encoder: encoder.name().to_string(),
                    columns: outside.into_iter().map(str::to_string).collect(),
                });
            }
        }

        let unknown_skills: BTreeSet<&str> = self
            .rules
            .iter()
            .flat_map(|rule| rule.antecedents.iter())
            .filter(|skill| !self.encoders.skills.contains(skill))
            .map(String::as_str)
            .collect();
        if !unknown_skills.is_empty() {
            issues.push(ArtifactIssue::UnknownRuleSkills {
                skills: unknown_skills.into_iter().map(str::to_string).collect(),
            });
        }

        let mut seen = BTreeSet::new();
        let duplicates: BTreeSet<&str> = self
            .feature_schema
            .columns()
            .iter()
            .map(String::as_str)
            .filter(|column| !seen.insert(*column))
            .collect();
        if !duplicates.is_empty() {
            issues.push(ArtifactIssue::DuplicateSchemaColumns {
                columns: duplicates.into_iter().map(str::to_string).collect(),
            });
        }

        issues
    }
}
