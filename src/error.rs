//! Error handling for the career recommender

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Artifact loading error: {0}")]
    ArtifactLoading(String),

    #[error("Error in preparing input features: {0}")]
    FeaturePreparation(String),

    #[error("The boosting model is not fitted")]
    ModelNotFitted,

    #[error("Error in boosting model predictions: {0}")]
    Prediction(String),

    #[error("Error in combining recommendations: {0}")]
    Combination(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, RecommenderError>;

