//! CLI interface for the career recommender

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "career-recommender")]
#[command(about = "Job category recommendations from your skills and intelligence types")]
#[command(long_about = "Recommend job categories by combining association rules mined from skill sets with a pre-trained gradient-boosting classifier")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recommend job categories for a profile
    Recommend {
        /// Your name, used to greet you
        #[arg(short, long, default_value = "")]
        name: String,

        /// Skills you have (repeat the flag or separate with commas)
        #[arg(short, long, value_delimiter = ',')]
        skills: Vec<String>,

        /// Primary intelligence type
        #[arg(short, long)]
        primary: String,

        /// Secondary intelligence type
        #[arg(short = 'S', long)]
        secondary: String,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Artifact directory (overrides the configuration)
        #[arg(short, long)]
        artifacts: Option<PathBuf>,
    },

    /// List the skills you can choose from
    Skills {
        /// Only show skills containing this text
        #[arg(short, long)]
        filter: Option<String>,

        /// Artifact directory (overrides the configuration)
        #[arg(short, long)]
        artifacts: Option<PathBuf>,
    },

    /// List the intelligence types
    Intelligences,

    /// Check that the artifacts are consistent with each other
    Validate {
        /// Artifact directory (overrides the configuration)
        #[arg(short, long)]
        artifacts: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "output.format")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}
