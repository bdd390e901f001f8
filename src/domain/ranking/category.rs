//! Category bands - named, configurable decision thresholds.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::ValidationError;

/// Cut point of a single band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BandThreshold {
    /// Composite score (0-1 scale) at or above this value.
    MinScore(f64),
    /// Rank at or better than this value.
    TopRanks(u32),
}

impl BandThreshold {
    fn admits(&self, score: f64, rank: u32) -> bool {
        match *self {
            BandThreshold::MinScore(min) => score >= min,
            BandThreshold::TopRanks(max_rank) => rank <= max_rank,
        }
    }
}

/// A named decision category with its entry threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBand {
    pub name: String,
    pub threshold: BandThreshold,
    /// Recommendation text shown alongside entities in this band.
    #[serde(default)]
    pub description: String,
}

impl CategoryBand {
    pub fn new(name: impl Into<String>, threshold: BandThreshold) -> Self {
        Self {
            name: name.into(),
            threshold,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Ordered band list; the first band whose threshold admits an entity wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBands {
    pub bands: Vec<CategoryBand>,
    /// Category for entities no band admits.
    pub fallback: String,
    #[serde(default)]
    pub fallback_description: String,
}

impl Default for CategoryBands {
    fn default() -> Self {
        Self {
            bands: vec![
                CategoryBand::new("Top", BandThreshold::MinScore(0.75))
                    .with_description("Strong overall result; recommended for recognition."),
                CategoryBand::new("Middle", BandThreshold::MinScore(0.5))
                    .with_description("Solid result; maintain current support."),
            ],
            fallback: "Attention".to_string(),
            fallback_description: "Below expectations; schedule follow-up and guidance."
                .to_string(),
        }
    }
}

impl CategoryBands {
    pub fn new(bands: Vec<CategoryBand>, fallback: impl Into<String>) -> Self {
        Self {
            bands,
            fallback: fallback.into(),
            fallback_description: String::new(),
        }
    }

    /// Returns the category name for an entity's score and rank.
    pub fn classify(&self, score: f64, rank: u32) -> &str {
        self.bands
            .iter()
            .find(|band| band.threshold.admits(score, rank))
            .map(|band| band.name.as_str())
            .unwrap_or(&self.fallback)
    }

    /// Returns the recommendation text for a category name.
    pub fn description_of(&self, category: &str) -> &str {
        self.bands
            .iter()
            .find(|band| band.name == category)
            .map(|band| band.description.as_str())
            .unwrap_or(&self.fallback_description)
    }

    /// All category names in evaluation order, fallback last.
    pub fn names(&self) -> Vec<&str> {
        self.bands
            .iter()
            .map(|band| band.name.as_str())
            .chain(std::iter::once(self.fallback.as_str()))
            .collect()
    }

    /// Checks names are non-empty and unique and thresholds are in range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for name in self.names() {
            if name.trim().is_empty() {
                return Err(ValidationError::empty_field("category.name"));
            }
            if !seen.insert(name) {
                return Err(ValidationError::invalid_format(
                    "category.name",
                    format!("duplicate category '{}'", name),
                ));
            }
        }

        for band in &self.bands {
            match band.threshold {
                BandThreshold::MinScore(min) if !(0.0..=1.0).contains(&min) => {
                    return Err(ValidationError::out_of_range(
                        format!("category.{}.min_score", band.name),
                        0.0,
                        1.0,
                        min,
                    ));
                }
                BandThreshold::TopRanks(0) => {
                    return Err(ValidationError::invalid_format(
                        format!("category.{}.top_ranks", band.name),
                        "must be at least 1",
                    ));
                }
                _ => {}
            }
        }

        Ok(())
    }
}
