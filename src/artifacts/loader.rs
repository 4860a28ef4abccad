//! Loads the artifact bundle from disk

use crate::artifacts::ArtifactContext;
use crate::config::ArtifactConfig;
use crate::error::{RecommenderError, Result};
use crate::output::descriptions::JobCatalog;
use crate::processing::classifier::{ClassifierArtifact, ClassifierState};
use crate::processing::encoder::{EncoderArtifact, FeatureEncoders, MultiLabelBinarizer};
use crate::processing::features::FeatureSchema;
use crate::processing::types::Rule;
use log::{info, warn};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

pub struct ArtifactLoader {
    config: ArtifactConfig,
}

impl ArtifactLoader {
    pub fn new(config: ArtifactConfig) -> Self {
        Self { config }
    }

    /// Point the loader at a different directory, keeping the file names
    pub fn with_dir(mut self, dir: PathBuf) -> Self {
        self.config.dir = dir;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.config.dir
    }

    /// Read every artifact and build the immutable context
    pub async fn load(&self) -> Result<ArtifactContext> {
        if !self.config.dir.is_dir() {
            return Err(RecommenderError::ArtifactLoading(format!(
                "Artifact directory does not exist: {}",
                self.config.dir.display()
            )));
        }

        info!("Loading artifacts from: {}", self.config.dir.display());

        let rules: Vec<Rule> = self.read_json(&self.config.rules_file).await?;
        let skills: EncoderArtifact = self.read_json(&self.config.skills_encoder_file).await?;
        let primary: EncoderArtifact = self
            .read_json(&self.config.primary_intelligence_encoder_file)
            .await?;
        let secondary: EncoderArtifact = self
            .read_json(&self.config.secondary_intelligence_encoder_file)
            .await?;
        let classifier: ClassifierArtifact = self.read_json(&self.config.classifier_file).await?;
        let job_categories: Vec<String> = self.read_json(&self.config.job_categories_file).await?;
        let feature_schema: FeatureSchema = self.read_json(&self.config.feature_names_file).await?;

        let mut catalog = JobCatalog::default();
        if let Some(file) = &self.config.descriptions_file {
            if self.config.dir.join(file).exists() {
                let overrides: BTreeMap<String, String> = self.read_json(file).await?;
                info!("Loaded {} job description(s) from {}", overrides.len(), file);
                catalog.extend(overrides);
            }
        }

        let classifier = ClassifierState::from(classifier);
        if !classifier.is_fitted() {
            warn!("Classifier artifact is not fitted; recommendations will use rules only");
        }

        let context = ArtifactContext {
            rules,
            encoders: FeatureEncoders {
                skills: MultiLabelBinarizer::from_artifact("skills", skills),
                primary_intelligence: MultiLabelBinarizer::from_artifact("primary intelligence", primary),
                secondary_intelligence: MultiLabelBinarizer::from_artifact("secondary intelligence", secondary),
            },
            classifier,
            job_categories,
            feature_schema,
            catalog,
        };

        info!(
            "Loaded {} rules, {} skills, {} job categories, {} feature columns",
            context.rules.len(),
            context.skill_options().len(),
            context.job_categories.len(),
            context.feature_schema.len()
        );

        Ok(context)
    }

    async fn read_json<T: DeserializeOwned>(&self, file_name: &str) -> Result<T> {
        let path = self.config.dir.join(file_name);
        let content = fs::read_to_string(&path).await.map_err(|e| {
            RecommenderError::ArtifactLoading(format!("Failed to read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            RecommenderError::ArtifactLoading(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}
