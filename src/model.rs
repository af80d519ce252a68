//! Core data types: documents, categories, and training roadmaps.

use serde::{Deserialize, Serialize};

/// The closed set of document classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Manual,
    News,
    Standard,
    Roadmap,
    Other,
}

impl Category {
    /// All categories in sidebar order.
    pub const ALL: [Category; 5] = [
        Self::Manual,
        Self::News,
        Self::Standard,
        Self::Roadmap,
        Self::Other,
    ];

    /// Canonical (case-sensitive) name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "Manual",
            Self::News => "News",
            Self::Standard => "Standard",
            Self::Roadmap => "Roadmap",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Active category filter: everything, or a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Sidebar entries: `All` followed by every category.
    pub fn choices() -> Vec<CategoryFilter> {
        std::iter::once(Self::All)
            .chain(Category::ALL.iter().copied().map(Self::Only))
            .collect()
    }

    /// Whether a document of `category` passes this filter.
    pub fn admits(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(c) => *c == category,
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(c) => f.write_str(c.as_str()),
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "All" {
            return Ok(Self::All);
        }
        Category::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .map(|c| Self::Only(*c))
            .ok_or_else(|| {
                format!("unknown category \"{s}\" (expected All, Manual, News, Standard, Roadmap or Other)")
            })
    }
}

/// One knowledge-base asset. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier within the store.
    pub id: String,
    pub title: String,
    pub category: Category,
    /// Display date, kept as written in the fixture.
    pub date: String,
    /// Short human-written summary (used as roadmap context).
    pub summary: String,
    /// Full body text.
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// A structured multi-step learning plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRoadmap {
    pub title: String,
    pub objective: String,
    pub steps: Vec<TrainingStep>,
}

/// A single step of a [`TrainingRoadmap`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingStep {
    pub title: String,
    pub description: String,
    /// Display duration, e.g. "2 weeks".
    pub duration: String,
    #[serde(default)]
    pub resources: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_parses_names_case_sensitively() {
        assert_eq!("All".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!(
            "Standard".parse::<CategoryFilter>(),
            Ok(CategoryFilter::Only(Category::Standard))
        );
        assert!("standard".parse::<CategoryFilter>().is_err());
        assert!("all".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn choices_start_with_all() {
        let choices = CategoryFilter::choices();
        assert_eq!(choices.len(), 6);
        assert_eq!(choices[0], CategoryFilter::All);
        assert_eq!(choices[5], CategoryFilter::Only(Category::Other));
    }

    #[test]
    fn step_resources_default_to_empty() {
        let step: TrainingStep = serde_json::from_str(
            r#"{"title":"Intro","description":"Read the handbook","duration":"1 day"}"#,
        )
        .unwrap();
        assert!(step.resources.is_empty());
    }

    #[test]
    fn roadmap_requires_steps() {
        let result = serde_json::from_str::<TrainingRoadmap>(r#"{"title":"T","objective":"O"}"#);
        assert!(result.is_err());
    }
}
