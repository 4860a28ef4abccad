//! Core value types shared by the rule engine, the classifier adapter and the combiner

use crate::error::{RecommenderError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A job category name, also the key into the description table
pub type JobCategory = String;

/// Skills selected by a user. Ordered so output is stable across runs.
pub type SkillSet = BTreeSet<String>;

/// Self-reported intelligence type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntelligenceLabel {
    Social,
    Creative,
    Linguistic,
    Analytical,
    LogicalMathematical,
    Practical,
    Emotional,
    Spatial,
}

impl IntelligenceLabel {
    pub const ALL: [IntelligenceLabel; 8] = [
        IntelligenceLabel::Social,
        IntelligenceLabel::Creative,
        IntelligenceLabel::Linguistic,
        IntelligenceLabel::Analytical,
        IntelligenceLabel::LogicalMathematical,
        IntelligenceLabel::Practical,
        IntelligenceLabel::Emotional,
        IntelligenceLabel::Spatial,
    ];

    /// Label as it appears in the encoder vocabularies
    pub fn as_str(&self) -> &'static str {
        match self {
            IntelligenceLabel::Social => "social",
            IntelligenceLabel::Creative => "creative",
            IntelligenceLabel::Linguistic => "linguistic",
            IntelligenceLabel::Analytical => "analytical",
            IntelligenceLabel::LogicalMathematical => "logical-mathematical",
            IntelligenceLabel::Practical => "practical",
            IntelligenceLabel::Emotional => "emotional",
            IntelligenceLabel::Spatial => "spatial",
        }
    }
}

impl fmt::Display for IntelligenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntelligenceLabel {
    type Err = RecommenderError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        IntelligenceLabel::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == normalized)
            .ok_or_else(|| {
                RecommenderError::InvalidInput(format!(
                    "Unknown intelligence type: {}. Supported: {}",
                    s,
                    IntelligenceLabel::ALL
                        .iter()
                        .map(|l| l.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}

/// Mined association rule: users holding every antecedent skill tend to work in the consequent categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub antecedents: BTreeSet<String>,
    pub consequents: BTreeSet<JobCategory>,
}

impl Rule {
    pub fn new<A, C>(antecedents: A, consequents: C) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            antecedents: antecedents.into_iter().map(Into::into).collect(),
            consequents: consequents.into_iter().map(Into::into).collect(),
        }
    }

    /// A rule fires when the user has at least its antecedent skills
    pub fn fires(&self, skills: &SkillSet) -> bool {
        self.antecedents.is_subset(skills)
    }
}
