//! Career recommender library
//!
//! Recommends job categories from a user's skills and intelligence types by
//! unioning association-rule matches with a pre-trained boosted classifier.

pub mod artifacts;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use artifacts::{ArtifactContext, ArtifactLoader};
pub use config::Config;
pub use error::{RecommenderError, Result};
pub use processing::recommender::{CombinedRecommendationEngine, Recommendation};
pub use processing::types::{IntelligenceLabel, JobCategory, Rule, SkillSet};
