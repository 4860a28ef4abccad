//! Configuration management for the career recommender

use crate::error::{RecommenderError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub artifacts: ArtifactConfig,
    pub encoding: EncodingConfig,
    pub output: OutputConfig,
}

/// Where the training pipeline's exports live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    pub dir: PathBuf,
    pub rules_file: String,
    pub skills_encoder_file: String,
    pub primary_intelligence_encoder_file: String,
    pub secondary_intelligence_encoder_file: String,
    pub classifier_file: String,
    pub job_categories_file: String,
    pub feature_names_file: String,
    /// Optional overrides merged over the built-in description table
    pub descriptions_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodingConfig {
    pub unknown_labels: UnknownLabelPolicy,
}

/// What an encoder does with a label outside its vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownLabelPolicy {
    /// Fail feature preparation; the model contributes nothing
    Error,
    /// Warn and encode the known labels only
    Ignore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub include_diagnostics: bool,
    pub show_motivation: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for Config {
    fn default() -> Self {
        let artifacts_dir = dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("career-recommender")
            .join("artifacts");

        Self {
            artifacts: ArtifactConfig {
                dir: artifacts_dir,
                rules_file: "rules.json".to_string(),
                skills_encoder_file: "skills_encoder.json".to_string(),
                primary_intelligence_encoder_file: "primary_intelligence_encoder.json".to_string(),
                secondary_intelligence_encoder_file: "secondary_intelligence_encoder.json".to_string(),
                classifier_file: "classifier.json".to_string(),
                job_categories_file: "job_categories.json".to_string(),
                feature_names_file: "feature_names.json".to_string(),
                descriptions_file: Some("job_descriptions.json".to_string()),
            },
            encoding: EncodingConfig {
                unknown_labels: UnknownLabelPolicy::Error,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
                include_diagnostics: true,
                show_motivation: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults there on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RecommenderError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| RecommenderError::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| RecommenderError::Configuration(format!("Failed to serialize config: {}", e)))
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("career-recommender")
            .join("config.toml")
    }

    /// Set a single value by dotted key, e.g. `output.format`
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "artifacts.dir" => self.artifacts.dir = PathBuf::from(value),
            "artifacts.descriptions_file" => {
                self.artifacts.descriptions_file = match value {
                    "" | "none" => None,
                    file => Some(file.to_string()),
                }
            }
            "encoding.unknown_labels" => {
                self.encoding.unknown_labels = match value.to_lowercase().as_str() {
                    "error" => UnknownLabelPolicy::Error,
                    "ignore" => UnknownLabelPolicy::Ignore,
                    _ => {
                        return Err(RecommenderError::Configuration(format!(
                            "Invalid unknown label policy: {}. Supported: error, ignore",
                            value
                        )))
                    }
                }
            }
            "output.format" => {
                self.output.format = crate::cli::parse_output_format(value)
                    .map_err(RecommenderError::Configuration)?
            }
            "output.color_output" => self.output.color_output = parse_bool(key, value)?,
            "output.include_diagnostics" => self.output.include_diagnostics = parse_bool(key, value)?,
            "output.show_motivation" => self.output.show_motivation = parse_bool(key, value)?,
            _ => {
                return Err(RecommenderError::Configuration(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value.parse::<bool>().map_err(|_| {
        RecommenderError::Configuration(format!("{} expects true or false, got {}", key, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roundtrip_through_toml() {
        let config = Config::default();
        let text = config.to_toml().unwrap();
        assert!(text.contains("unknown_labels = \"error\""));
        assert!(text.contains("format = \"console\""));

        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.artifacts.rules_file, "rules.json");
        assert_eq!(parsed.encoding.unknown_labels, UnknownLabelPolicy::Error);
    }

    #[test]
    fn test_set_values() {
        let mut config = Config::default();
        config.set("encoding.unknown_labels", "ignore").unwrap();
        config.set("output.format", "md").unwrap();
        config.set("output.color_output", "false").unwrap();
        config.set("artifacts.descriptions_file", "none").unwrap();

        assert_eq!(config.encoding.unknown_labels, UnknownLabelPolicy::Ignore);
        assert_eq!(config.output.format, OutputFormat::Markdown);
        assert!(!config.output.color_output);
        assert!(config.artifacts.descriptions_file.is_none());
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = Config::default();
        assert!(config.set("output.color_output", "maybe").is_err());
        assert!(config.set("scoring.weight", "1").is_err());
        assert!(config.set("encoding.unknown_labels", "skip").is_err());
    }

    #[test]
    fn test_save_and_load_from() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.artifacts.dir = PathBuf::from("/opt/career/artifacts");
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.artifacts.dir, PathBuf::from("/opt/career/artifacts"));
    }
}
