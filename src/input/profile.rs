//! User profile validation against the artifact vocabularies

use crate::error::{RecommenderError, Result};
use crate::processing::types::{IntelligenceLabel, SkillSet};
use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

const SUGGESTION_THRESHOLD: f64 = 0.8;

/// What the user submitted, validated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub skills: SkillSet,
    pub primary_intelligence: IntelligenceLabel,
    pub secondary_intelligence: IntelligenceLabel,
}

impl UserProfile {
    /// Validate raw input. Skills are matched case-insensitively and mapped to the
    /// vocabulary's spelling; unknown skills fail with a suggestion when one is close.
    pub fn parse(
        name: &str,
        raw_skills: &[String],
        primary: &str,
        secondary: &str,
        skill_options: &[String],
    ) -> Result<Self> {
        let mut skills = SkillSet::new();
        for raw in split_skills(raw_skills) {
            let skill = match skill_options.iter().find(|option| option.eq_ignore_ascii_case(&raw)) {
                Some(option) => option.clone(),
                None => {
                    let hint = suggest_skill(&raw, skill_options)
                        .map(|s| format!(" Did you mean '{}'?", s))
                        .unwrap_or_default();
                    return Err(RecommenderError::InvalidInput(format!(
                        "Unknown skill: '{}'.{}",
                        raw, hint
                    )));
                }
            };
            skills.insert(skill);
        }

        Ok(Self {
            name: name.trim().to_string(),
            skills,
            primary_intelligence: primary.parse()?,
            secondary_intelligence: secondary.parse()?,
        })
    }

    /// Name to greet with, falling back when none was given
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "there"
        } else {
            &self.name
        }
    }
}

/// Accept both repeated flags and comma-separated values
fn split_skills(raw_skills: &[String]) -> Vec<String> {
    raw_skills
        .iter()
        .flat_map(|entry| entry.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Closest vocabulary entry by Jaro-Winkler similarity, if close enough
pub fn suggest_skill<'a>(input: &str, skill_options: &'a [String]) -> Option<&'a str> {
    let needle = input.to_lowercase();
    skill_options
        .iter()
        .map(|option| (option, jaro_winkler(&needle, &option.to_lowercase())))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(option, _)| option.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocabulary() -> Vec<String> {
        ["Python", "Statistics", "SQL", "Machine Learning"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_parse_valid_profile() {
        let profile = UserProfile::parse(
            " Ada ",
            &["python, Statistics".to_string(), "SQL".to_string()],
            "analytical",
            "logical-mathematical",
            &vocabulary(),
        )
        .unwrap();

        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.skills.len(), 3);
        assert!(profile.skills.contains("Python"));
        assert_eq!(profile.secondary_intelligence, IntelligenceLabel::LogicalMathematical);
    }

    #[test]
    fn test_unknown_skill_suggests_closest() {
        let err = UserProfile::parse("", &["Pyhton".to_string()], "social", "social", &vocabulary())
            .unwrap_err();
        assert!(err.to_string().contains("Did you mean 'Python'?"));
    }

    #[test]
    fn test_unrelated_skill_has_no_suggestion() {
        assert_eq!(suggest_skill("Welding", &vocabulary()), None);
    }

    #[test]
    fn test_bad_intelligence_label() {
        assert!(UserProfile::parse("", &[], "musical", "social", &vocabulary()).is_err());
    }

    #[test]
    fn test_empty_skills_allowed() {
        let profile = UserProfile::parse("", &[], "social", "spatial", &vocabulary()).unwrap();
        assert!(profile.skills.is_empty());
        assert_eq!(profile.display_name(), "there");
    }
}
