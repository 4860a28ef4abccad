//! Recommendation engine: encoding, rule matching, classification and combination

pub mod types;
pub mod features;
pub mod encoder;
pub mod classifier;
pub mod rule_engine;
pub mod recommender;
