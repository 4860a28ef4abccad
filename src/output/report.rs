//! Report structures handed to the formatters

use crate::input::UserProfile;
use crate::output::descriptions::JobCatalog;
use crate::processing::recommender::{Diagnostic, MatchSource, Recommendation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MOTIVATIONAL_QUOTE: &str =
    "\"The future belongs to those who believe in the beauty of their dreams.\" - Eleanor Roosevelt";
pub const MOTIVATIONAL_NOTE: &str =
    "Remember, finding the right career is a journey. Keep exploring and follow your passion!";
pub const INTELLIGENCE_TEST_URL: &str = "https://www.literacynet.org/mi/assessment/findyourstrengths.html";

/// Everything a formatter needs to render one recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub profile: UserProfile,

    /// Numbered categories with descriptions; empty means nothing matched
    pub entries: Vec<ReportEntry>,

    /// Degradations encountered while producing the result
    pub diagnostics: Vec<Diagnostic>,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    pub rank: usize,
    pub category: String,
    pub description: String,
    pub source: MatchSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub version: String,
    pub rule_count: usize,
    pub classifier_fitted: bool,
    pub artifacts_dir: String,
}

impl RecommendationReport {
    pub fn new(
        profile: UserProfile,
        recommendation: &Recommendation,
        catalog: &JobCatalog,
        metadata: ReportMetadata,
    ) -> Self {
        let entries = recommendation
            .categories
            .iter()
            .enumerate()
            .map(|(idx, category)| ReportEntry {
                rank: idx + 1,
                category: category.clone(),
                description: catalog.describe(category).to_string(),
                source: recommendation
                    .source_of(category)
                    .unwrap_or(MatchSource::Rules),
            })
            .collect();

        Self {
            profile,
            entries,
            diagnostics: recommendation.diagnostics.clone(),
            metadata,
        }
    }

    pub fn has_recommendations(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn greeting(&self) -> String {
        let name = self.profile.display_name();
        if self.has_recommendations() {
            format!(
                "Hi {}! Your recommended job categories suitable for your profile are:",
                name
            )
        } else {
            format!(
                "Hi {}, we could not find any job recommendations for your profile.",
                name
            )
        }
    }
}

impl ReportMetadata {
    pub fn new(rule_count: usize, classifier_fitted: bool, artifacts_dir: impl Into<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            rule_count,
            classifier_fitted,
            artifacts_dir: artifacts_dir.into(),
        }
    }
}
