//! Association-rule matching over skill sets

use crate::processing::types::{JobCategory, Rule, SkillSet};
use std::collections::BTreeSet;

/// Fires every rule whose antecedents the user's skills cover
#[derive(Debug, Clone, Copy)]
pub struct RuleEngine<'a> {
    rules: &'a [Rule],
}

impl<'a> RuleEngine<'a> {
    pub fn new(rules: &'a [Rule]) -> Self {
        Self { rules }
    }

    /// Rules whose antecedents are a subset of `skills`
    pub fn matching_rules<'s>(&self, skills: &'s SkillSet) -> impl Iterator<Item = &'a Rule> + 's
    where
        'a: 's,
    {
        self.rules.iter().filter(move |rule| rule.fires(skills))
    }

    /// Union of the consequents of every firing rule
    pub fn recommend(&self, skills: &SkillSet) -> BTreeSet<JobCategory> {
        self.matching_rules(skills)
            .flat_map(|rule| rule.consequents.iter().cloned())
            .collect()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}
