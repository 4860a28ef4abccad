//! Human-readable job category descriptions

use std::collections::BTreeMap;

pub const NO_DESCRIPTION: &str = "No description available.";

/// Description lookup with a fixed fallback for unknown categories
#[derive(Debug, Clone)]
pub struct JobCatalog {
    descriptions: BTreeMap<String, String>,
}

impl Default for JobCatalog {
    fn default() -> Self {
        let descriptions = [
            (
                "UI/UX Designer",
                "UI/UX Designers are responsible for creating the visual and interactive aspects of a product. They ensure that the product is user-friendly and engaging.",
            ),
            (
                "AI / Machine Learning",
                "AI and Machine Learning professionals develop algorithms and models that enable computers to learn and make decisions. This field involves working with large datasets and requires strong programming skills.",
            ),
            (
                "Back End Development",
                "Back End Developers focus on server-side logic, databases, and application integration. They ensure that the front end of a website or application functions seamlessly.",
            ),
            (
                "Data Scientist",
                "Data Scientists analyze and interpret complex data to help organizations make informed decisions. They use statistical methods, machine learning, and data visualization techniques.",
            ),
            (
                "Project Manager",
                "Project Managers plan, execute, and oversee projects to ensure they are completed on time, within scope, and within budget. They coordinate between teams and stakeholders.",
            ),
        ]
        .into_iter()
        .map(|(job, text)| (job.to_string(), text.to_string()))
        .collect();

        Self { descriptions }
    }
}

impl JobCatalog {
    pub fn describe(&self, category: &str) -> &str {
        self.descriptions
            .get(category)
            .map(String::as_str)
            .unwrap_or(NO_DESCRIPTION)
    }

    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }
}

impl Extend<(String, String)> for JobCatalog {
    fn extend<T: IntoIterator<Item = (String, String)>>(&mut self, iter: T) {
        self.descriptions.extend(iter);
    }
}
