//! Integration tests for the career recommender

use career_recommender::artifacts::{ArtifactIssue, ArtifactLoader};
use career_recommender::config::{Config, UnknownLabelPolicy};
use career_recommender::input::UserProfile;
use career_recommender::output::formatter::{ConsoleFormatter, OutputFormatter};
use career_recommender::output::report::ReportMetadata;
use career_recommender::output::RecommendationReport;
use career_recommender::processing::recommender::{CombinedRecommendationEngine, DiagnosticKind};
use career_recommender::{IntelligenceLabel, RecommenderError, SkillSet};
use serde_json::json;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const INTELLIGENCES: [&str; 8] = [
    "social",
    "creative",
    "linguistic",
    "analytical",
    "logical-mathematical",
    "practical",
    "emotional",
    "spatial",
];

const SKILLS: [&str; 4] = ["Figma", "Python", "SQL", "Statistics"];

const JOBS: [&str; 3] = ["AI / Machine Learning", "Data Scientist", "UI/UX Designer"];

fn write(dir: &Path, file: &str, value: serde_json::Value) {
    fs::write(dir.join(file), serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

/// Stump on `feature`: margin +4 when the feature is set, -4 otherwise
fn stump(feature: usize) -> serde_json::Value {
    json!({
        "base_score": 0.0,
        "learning_rate": 1.0,
        "trees": [{"nodes": [
            {"feature": feature, "threshold": 0.5, "left": 1, "right": 2},
            {"leaf": -4.0},
            {"leaf": 4.0}
        ]}]
    })
}

fn feature_names() -> Vec<String> {
    SKILLS
        .iter()
        .chain(INTELLIGENCES.iter())
        .map(|s| s.to_string())
        .collect()
}

fn position(column: &str) -> usize {
    feature_names().iter().position(|c| c == column).unwrap()
}

/// A consistent artifact bundle:
/// AI / Machine Learning fires on an analytical primary intelligence, UI/UX Designer on "Figma",
/// Data Scientist never fires from the model.
fn write_bundle(fitted: bool) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path();

    write(
        path,
        "rules.json",
        json!([
            {"antecedents": ["Python", "Statistics"], "consequents": ["Data Scientist"]},
            {"antecedents": ["SQL", "Python", "Statistics"], "consequents": ["Data Scientist", "Data Engineer"]},
            {"antecedents": ["Figma"], "consequents": ["UI/UX Designer"]}
        ]),
    );
    write(path, "skills_encoder.json", json!({"classes": SKILLS}));
    write(path, "primary_intelligence_encoder.json", json!({"classes": INTELLIGENCES}));
    write(path, "secondary_intelligence_encoder.json", json!({"classes": INTELLIGENCES}));
    write(path, "job_categories.json", json!(JOBS));
    write(path, "feature_names.json", json!(feature_names()));

    let classifier = if fitted {
        json!({
            "n_features": feature_names().len(),
            "estimators": [
                stump(position("analytical")),
                {"base_score": -5.0, "trees": []},
                stump(position("Figma"))
            ]
        })
    } else {
        json!({"estimators": null})
    };
    write(path, "classifier.json", classifier);

    dir
}

async fn load_engine(dir: &TempDir) -> CombinedRecommendationEngine {
    let context = ArtifactLoader::new(Config::default().artifacts)
        .with_dir(dir.path().to_path_buf())
        .load()
        .await
        .unwrap();
    CombinedRecommendationEngine::new(Arc::new(context), UnknownLabelPolicy::Error)
}

fn skills(items: &[&str]) -> SkillSet {
    items.iter().map(|s| s.to_string()).collect()
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_rules_only_scenario() {
    let dir = write_bundle(true);
    let engine = load_engine(&dir).await;

    let rule_result = engine.rule_engine().recommend(&skills(&["Python", "Statistics"]));
    assert_eq!(rule_result, set(&["Data Scientist"]));
}

#[tokio::test]
async fn test_model_contributes_without_skills() {
    let dir = write_bundle(true);
    let engine = load_engine(&dir).await;

    let result = engine.recommend(
        &SkillSet::new(),
        IntelligenceLabel::Analytical,
        IntelligenceLabel::LogicalMathematical,
    );

    assert!(engine.rule_engine().recommend(&SkillSet::new()).is_empty());
    assert_eq!(result.categories, set(&["AI / Machine Learning"]));
    assert!(result.diagnostics.is_empty());
}

#[tokio::test]
async fn test_combined_is_superset_of_rules() {
    let dir = write_bundle(true);
    let engine = load_engine(&dir).await;

    for user in [
        skills(&["Python", "Statistics", "SQL"]),
        skills(&["Figma"]),
        skills(&["Figma", "Python"]),
        SkillSet::new(),
    ] {
        for primary in IntelligenceLabel::ALL {
            let result = engine.recommend(&user, primary, IntelligenceLabel::Social);
            let rules = engine.rule_engine().recommend(&user);
            assert!(result.categories.is_superset(&rules));
        }
    }
}

#[tokio::test]
async fn test_rule_consequent_outside_model_columns() {
    let dir = write_bundle(true);
    let engine = load_engine(&dir).await;

    let result = engine.recommend(
        &skills(&["Python", "SQL", "Statistics"]),
        IntelligenceLabel::Practical,
        IntelligenceLabel::Social,
    );
    assert_eq!(result.categories, set(&["Data Engineer", "Data Scientist"]));
}

#[tokio::test]
async fn test_unfitted_bundle_degrades_to_rules() {
    let dir = write_bundle(false);
    let engine = load_engine(&dir).await;
    let user = skills(&["Figma"]);

    let result = engine.recommend(&user, IntelligenceLabel::Spatial, IntelligenceLabel::Creative);

    assert_eq!(result.categories, engine.rule_engine().recommend(&user));
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::ModelNotFitted);
    assert!(engine
        .context()
        .consistency_issues()
        .contains(&ArtifactIssue::UnfittedClassifier));
}

#[tokio::test]
async fn test_schema_skew_is_tolerated() {
    let dir = write_bundle(true);
    // the skills encoder gained a class the model never saw
    write(
        dir.path(),
        "skills_encoder.json",
        json!({"classes": ["Figma", "Python", "Rust", "SQL", "Statistics"]}),
    );
    let engine = load_engine(&dir).await;

    let result = engine.recommend(
        &skills(&["Figma", "Rust"]),
        IntelligenceLabel::Emotional,
        IntelligenceLabel::Emotional,
    );

    assert_eq!(result.categories, set(&["UI/UX Designer"]));
    assert!(result.diagnostics.is_empty());
    assert!(engine.context().consistency_issues().iter().any(|issue| matches!(
        issue,
        ArtifactIssue::ColumnsOutsideSchema { encoder, .. } if encoder == "skills"
    )));
}

#[tokio::test]
async fn test_description_overrides_and_fallback() {
    let dir = write_bundle(true);
    write(
        dir.path(),
        "job_descriptions.json",
        json!({"Data Engineer": "Data Engineers build pipelines."}),
    );
    let engine = load_engine(&dir).await;
    let catalog = &engine.context().catalog;

    assert_eq!(catalog.describe("Data Engineer"), "Data Engineers build pipelines.");
    assert!(catalog.describe("UI/UX Designer").starts_with("UI/UX Designers"));
    assert_eq!(catalog.describe("Astronaut"), "No description available.");
}

#[tokio::test]
async fn test_end_to_end_console_report() {
    let dir = write_bundle(true);
    let engine = load_engine(&dir).await;
    let context = engine.context();

    let profile = UserProfile::parse(
        "Grace",
        &["python,statistics".to_string()],
        "analytical",
        "logical-mathematical",
        context.skill_options(),
    )
    .unwrap();
    let recommendation = engine.recommend(
        &profile.skills,
        profile.primary_intelligence,
        profile.secondary_intelligence,
    );

    let report = RecommendationReport::new(
        profile,
        &recommendation,
        &context.catalog,
        ReportMetadata::new(context.rules.len(), true, dir.path().display().to_string()),
    );
    let output = ConsoleFormatter::new(false, true, false).format_report(&report).unwrap();

    assert!(output.contains("Hi Grace!"));
    assert!(output.contains("1: AI / Machine Learning (model)"));
    assert!(output.contains("2: Data Scientist (rules)"));
}

#[tokio::test]
async fn test_missing_artifact_directory() {
    let dir = tempfile::tempdir().unwrap();
    let result = ArtifactLoader::new(Config::default().artifacts)
        .with_dir(dir.path().join("missing"))
        .load()
        .await;
    assert!(matches!(result, Err(RecommenderError::ArtifactLoading(_))));
}

#[tokio::test]
async fn test_malformed_artifact() {
    let dir = write_bundle(true);
    fs::write(dir.path().join("rules.json"), "{not json").unwrap();

    let result = ArtifactLoader::new(Config::default().artifacts)
        .with_dir(dir.path().to_path_buf())
        .load()
        .await;
    match result {
        Err(RecommenderError::ArtifactLoading(msg)) => assert!(msg.contains("rules.json")),
        other => panic!("expected artifact loading error, got {:?}", other.map(|_| ())),
    }
}
