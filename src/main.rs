//! Career recommender: job category recommendations from skills and intelligence types

use anyhow::Context;
use career_recommender::artifacts::{ArtifactContext, ArtifactLoader};
use career_recommender::cli::{self, Cli, Commands, ConfigAction};
use career_recommender::config::Config;
use career_recommender::input::UserProfile;
use career_recommender::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use career_recommender::output::report::{ReportMetadata, INTELLIGENCE_TEST_URL};
use career_recommender::output::RecommendationReport;
use career_recommender::processing::recommender::CombinedRecommendationEngine;
use career_recommender::processing::types::IntelligenceLabel;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_result = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config_result {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    match command {
        Commands::Recommend {
            name,
            skills,
            primary,
            secondary,
            output,
            save,
            artifacts,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(anyhow::Error::msg)?,
                None => config.output.format,
            };

            // Load artifacts and validate the profile against the skill vocabulary
            let artifacts_dir = artifacts.unwrap_or_else(|| config.artifacts.dir.clone());
            let context = load_artifacts(&config, Some(artifacts_dir.clone())).await?;
            let profile = UserProfile::parse(&name, &skills, &primary, &secondary, context.skill_options())?;
            info!(
                "Recommending for {} skill(s), {} / {}",
                profile.skills.len(),
                profile.primary_intelligence,
                profile.secondary_intelligence
            );

            // Recommend
            let engine = CombinedRecommendationEngine::new(Arc::clone(&context), config.encoding.unknown_labels);
            let recommendation = engine.recommend(
                &profile.skills,
                profile.primary_intelligence,
                profile.secondary_intelligence,
            );

            // Build and render the report
            let metadata = ReportMetadata::new(
                engine.rule_engine().rule_count(),
                context.classifier.is_fitted(),
                artifacts_dir.display().to_string(),
            );
            let report = RecommendationReport::new(profile, &recommendation, &context.catalog, metadata);

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                config.output.include_diagnostics,
                config.output.show_motivation,
                true,
            );
            let rendered = generator.generate_report(&report, &output_format)?;

            // Save or print
            match save {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(suggest_filename(&output_format, &report.profile.name, true))
                    } else {
                        path
                    };
                    save_report_to_file(&rendered, &path)
                        .with_context(|| format!("Failed to save report to {}", path.display()))?;
                    println!("💾 Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Skills { filter, artifacts } => {
            let context = load_artifacts(&config, artifacts).await?;
            let needle = filter.map(|f| f.to_lowercase());

            let matching: Vec<&String> = context
                .skill_options()
                .iter()
                .filter(|skill| needle.as_ref().map_or(true, |n| skill.to_lowercase().contains(n)))
                .collect();

            println!("🧰 {} skill(s) available:", matching.len());
            for skill in matching {
                println!("  • {}", skill);
            }
        }

        Commands::Intelligences => {
            println!("🧠 Intelligence types:");
            for label in IntelligenceLabel::ALL {
                println!("  • {}", label);
            }
            println!(
                "\nDon't know your types of intelligence? Take a test to find out: {}",
                INTELLIGENCE_TEST_URL
            );
        }

        Commands::Validate { artifacts } => {
            let context = load_artifacts(&config, artifacts).await?;
            let issues = context.consistency_issues();

            println!("📦 {} rules", context.rules.len());
            println!("🧰 {} skills", context.skill_options().len());
            println!("💼 {} job categories", context.job_categories.len());
            println!("📐 {} feature columns", context.feature_schema.len());
            println!(
                "🤖 Classifier: {}",
                if context.classifier.is_fitted() { "fitted" } else { "not fitted" }
            );

            if issues.is_empty() {
                println!("\n{}", "✅ Artifacts are consistent".green());
            } else {
                println!("\n{}", format!("⚠️  {} issue(s) found:", issues.len()).yellow());
                for issue in &issues {
                    println!("  • {}", issue);
                }
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action.unwrap_or(ConfigAction::Show) {
                ConfigAction::Show => {
                    println!("# {}", path.display());
                    println!("{}", config.to_toml()?);
                }
                ConfigAction::Path => println!("{}", path.display()),
                ConfigAction::Reset => {
                    Config::default().save_to(&path)?;
                    println!("🔄 Configuration reset to defaults at {}", path.display());
                }
                ConfigAction::Set { key, value } => {
                    config.set(&key, &value)?;
                    config.save_to(&path)?;
                    println!("✅ {} = {}", key, value);
                }
            }
        }
    }

    Ok(())
}

/// Load the artifact bundle once behind a spinner
async fn load_artifacts(config: &Config, dir: Option<PathBuf>) -> anyhow::Result<Arc<ArtifactContext>> {
    let mut loader = ArtifactLoader::new(config.artifacts.clone());
    if let Some(dir) = dir {
        loader = loader.with_dir(dir);
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Loading artifacts from {}", loader.dir().display()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = loader.load().await;
    spinner.finish_and_clear();

    let context = result.context(
        "Could not load artifacts; set artifacts.dir with `career-recommender config set artifacts.dir <DIR>` or pass --artifacts",
    )?;
    Ok(Arc::new(context))
}
