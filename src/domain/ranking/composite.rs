//! Composite Scorer - weighted blend of per-criterion scores.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::ahp::{AhpError, PriorityVector};
use crate::domain::foundation::{CriterionId, EntityId};

/// Display scale applied to composite scores (0-1 → 0-100).
pub const PERCENT_SCALE: f64 = 100.0;

/// Normalized criterion scores for one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityScores {
    pub entity_id: EntityId,
    /// Human-readable label for reports.
    #[serde(default)]
    pub label: Option<String>,
    /// Normalized score (0-1) per criterion.
    pub scores: HashMap<CriterionId, f64>,
}

impl EntityScores {
    pub fn new(entity_id: EntityId) -> Self {
        Self {
            entity_id,
            label: None,
            scores: HashMap::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_score(mut self, criterion_id: CriterionId, score: f64) -> Self {
        self.scores.insert(criterion_id, score);
        self
    }
}

/// Composite score of a single entity, on the 0-1 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeScore {
    pub entity_id: EntityId,
    pub label: Option<String>,
    pub score: f64,
}

/// Converts a 0-1 composite score to a percentage rounded to 2 decimals.
pub fn to_percentage(score: f64) -> f64 {
    (score * PERCENT_SCALE * 100.0).round() / 100.0
}

/// Composite score computation.
pub struct CompositeScorer;

impl CompositeScorer {
    /// Computes Σ(weight_i × score_i) for every entity.
    ///
    /// # Edge Cases
    /// - Missing score for a weighted criterion: `IncompleteScoreSet`
    /// - Non-finite or out-of-range score: `InvalidScore`
    /// - Scores for criteria outside the vector: ignored
    /// - Zero scores: valid, the entity is kept
    pub fn score(
        weights: &PriorityVector,
        entities: &[EntityScores],
    ) -> Result<Vec<CompositeScore>, AhpError> {
        entities
            .iter()
            .map(|entity| Self::score_entity(weights, entity))
            .collect()
    }

    fn score_entity(
        weights: &PriorityVector,
        entity: &EntityScores,
    ) -> Result<CompositeScore, AhpError> {
        let mut total = 0.0;

        for (criterion_id, weight) in weights.iter() {
            let value = *entity.scores.get(criterion_id).ok_or_else(|| {
                AhpError::incomplete_scores(entity.entity_id.clone(), criterion_id.clone())
            })?;

            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(AhpError::InvalidScore {
                    entity_id: entity.entity_id.clone(),
                    criterion_id: criterion_id.clone(),
                    value,
                });
            }

            total += weight * value;
        }

        Ok(CompositeScore {
            entity_id: entity.entity_id.clone(),
            label: entity.label.clone(),
            score: total.clamp(0.0, 1.0),
        })
    }
}
