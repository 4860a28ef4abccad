//! Classifier adapter and the combined rule + model recommendation engine

use crate::artifacts::ArtifactContext;
use crate::config::UnknownLabelPolicy;
use crate::error::{RecommenderError, Result};
use crate::processing::classifier::ClassifierState;
use crate::processing::encoder::FeatureEncoders;
use crate::processing::features::{FeatureRow, FeatureSchema};
use crate::processing::rule_engine::RuleEngine;
use crate::processing::types::{IntelligenceLabel, JobCategory, SkillSet};
use log::{debug, info, warn};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Stage at which the model contribution degraded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    FeaturePreparation,
    ModelNotFitted,
    Prediction,
    Combination,
}

/// Non-fatal problem reported alongside a recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    fn from_error(error: &RecommenderError) -> Self {
        let kind = match error {
            RecommenderError::FeaturePreparation(_) => DiagnosticKind::FeaturePreparation,
            RecommenderError::ModelNotFitted => DiagnosticKind::ModelNotFitted,
            RecommenderError::Combination(_) => DiagnosticKind::Combination,
            _ => DiagnosticKind::Prediction,
        };
        Self {
            kind,
            message: error.to_string(),
        }
    }
}

/// What the classifier added to a request
#[derive(Debug, Clone, Default)]
pub struct ModelContribution {
    /// `None` when the model produced no usable prediction
    pub categories: Option<BTreeSet<JobCategory>>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds the model's input row and turns its binary output into job categories
#[derive(Debug, Clone, Copy)]
pub struct ClassifierAdapter<'a> {
    encoders: &'a FeatureEncoders,
    schema: &'a FeatureSchema,
    classifier: &'a ClassifierState,
    job_categories: &'a [JobCategory],
    policy: UnknownLabelPolicy,
}

impl<'a> ClassifierAdapter<'a> {
    pub fn new(
        encoders: &'a FeatureEncoders,
        schema: &'a FeatureSchema,
        classifier: &'a ClassifierState,
        job_categories: &'a [JobCategory],
        policy: UnknownLabelPolicy,
    ) -> Self {
        Self {
            encoders,
            schema,
            classifier,
            job_categories,
            policy,
        }
    }

    pub fn from_context(context: &'a ArtifactContext, policy: UnknownLabelPolicy) -> Self {
        Self::new(
            &context.encoders,
            &context.feature_schema,
            &context.classifier,
            &context.job_categories,
            policy,
        )
    }

    /// Encode, concatenate, drop duplicate columns, then align to the model schema
    pub fn prepare_features(
        &self,
        skills: &SkillSet,
        primary: IntelligenceLabel,
        secondary: IntelligenceLabel,
    ) -> Result<FeatureRow> {
        if self.schema.is_empty() {
            return Err(RecommenderError::FeaturePreparation(
                "model feature schema is empty".to_string(),
            ));
        }

        let encoded = self.encoders.encode(skills, primary, secondary, self.policy)?;
        let combined = FeatureRow::concat(encoded).dedup_columns();
        let aligned = combined.align(self.schema);

        debug!(
            "Prepared feature row: {} encoded columns aligned to {} schema columns, {} active",
            combined.len(),
            aligned.len(),
            aligned.values().iter().filter(|v| **v != 0.0).count()
        );
        Ok(aligned)
    }

    /// Raw 1 x n prediction matrix for an aligned row
    pub fn predict_matrix(&self, features: &FeatureRow) -> Result<Array2<u8>> {
        self.classifier.predict(features.values())
    }

    /// Add every job category whose column is 1. Stops at the first column the
    /// matrix cannot provide; categories added before that stay in `out`.
    pub fn decode(&self, predictions: &Array2<u8>, out: &mut BTreeSet<JobCategory>) -> Result<()> {
        for (position, job) in self.job_categories.iter().enumerate() {
            match predictions.get((0, position)) {
                Some(1) => {
                    out.insert(job.clone());
                }
                Some(_) => {}
                None => {
                    return Err(RecommenderError::Combination(format!(
                        "index {} is out of bounds for prediction matrix of shape {:?}",
                        position,
                        predictions.shape()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Model-based categories for one profile. Never fails: problems become diagnostics.
    pub fn predict(
        &self,
        skills: &SkillSet,
        primary: IntelligenceLabel,
        secondary: IntelligenceLabel,
    ) -> ModelContribution {
        let mut contribution = ModelContribution::default();

        let predictions = match self
            .prepare_features(skills, primary, secondary)
            .and_then(|features| self.predict_matrix(&features))
        {
            Ok(predictions) => predictions,
            Err(e) => {
                warn!("{}", e);
                contribution.diagnostics.push(Diagnostic::from_error(&e));
                return contribution;
            }
        };

        let mut categories = BTreeSet::new();
        if let Err(e) = self.decode(&predictions, &mut categories) {
            warn!("{}", e);
            contribution.diagnostics.push(Diagnostic::from_error(&e));
        }
        contribution.categories = Some(categories);
        contribution
    }
}

/// Outcome of one recommendation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recommendation {
    /// Union of rule-based and model-based categories
    pub categories: BTreeSet<JobCategory>,
    pub rule_categories: BTreeSet<JobCategory>,
    pub model_categories: Option<BTreeSet<JobCategory>>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Where a recommended category came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    Rules,
    Model,
    Both,
}

impl MatchSource {
    pub fn label(&self) -> &'static str {
        match self {
            MatchSource::Rules => "rules",
            MatchSource::Model => "model",
            MatchSource::Both => "rules + model",
        }
    }
}

impl Recommendation {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn source_of(&self, category: &str) -> Option<MatchSource> {
        let from_rules = self.rule_categories.contains(category);
        let from_model = self
            .model_categories
            .as_ref()
            .is_some_and(|model| model.contains(category));

        match (from_rules, from_model) {
            (true, true) => Some(MatchSource::Both),
            (true, false) => Some(MatchSource::Rules),
            (false, true) => Some(MatchSource::Model),
            (false, false) => None,
        }
    }
}

/// Rule engine and classifier adapter over one immutable artifact context
#[derive(Debug, Clone)]
pub struct CombinedRecommendationEngine {
    context: Arc<ArtifactContext>,
    policy: UnknownLabelPolicy,
}

impl CombinedRecommendationEngine {
    pub fn new(context: Arc<ArtifactContext>, policy: UnknownLabelPolicy) -> Self {
        info!(
            "Recommendation engine ready: {} rules, {} job categories, {} features, classifier {}",
            context.rules.len(),
            context.job_categories.len(),
            context.feature_schema.len(),
            if context.classifier.is_fitted() { "fitted" } else { "unfitted" }
        );
        Self { context, policy }
    }

    pub fn context(&self) -> &ArtifactContext {
        &self.context
    }

    pub fn rule_engine(&self) -> RuleEngine<'_> {
        RuleEngine::new(&self.context.rules)
    }

    pub fn classifier_adapter(&self) -> ClassifierAdapter<'_> {
        ClassifierAdapter::from_context(&self.context, self.policy)
    }

    /// Rule matches unioned with whatever the model contributes
    pub fn recommend(
        &self,
        skills: &SkillSet,
        primary: IntelligenceLabel,
        secondary: IntelligenceLabel,
    ) -> Recommendation {
        let rule_categories = self.rule_engine().recommend(skills);
        let ModelContribution {
            categories: model_categories,
            diagnostics,
        } = self.classifier_adapter().predict(skills, primary, secondary);

        let mut categories = rule_categories.clone();
        if let Some(model) = &model_categories {
            categories.extend(model.iter().cloned());
        }

        debug!(
            "{} rule-based and {} model-based categories, {} combined",
            rule_categories.len(),
            model_categories.as_ref().map_or(0, BTreeSet::len),
            categories.len()
        );

        Recommendation {
            categories,
            rule_categories,
            model_categories,
            diagnostics,
        }
    }
}
