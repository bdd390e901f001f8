//! Ranker/Classifier - dense ranking and category assignment.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::{CategoryBands, CompositeScore};
use crate::domain::foundation::EntityId;

/// Scores within this distance share a rank.
pub const TIE_TOLERANCE: f64 = 1e-9;

/// An entity with its composite score, dense rank and decision category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntity {
    pub entity_id: EntityId,
    pub label: Option<String>,
    pub score: f64,
    pub rank: u32,
    pub category: String,
}

/// Ranking and classification functions.
pub struct Ranker;

impl Ranker {
    /// Orders entities by score descending and assigns dense ranks.
    ///
    /// Scores within `TIE_TOLERANCE` of the first score in their group
    /// share a rank; the next group gets `previous_rank + 1`. Within a
    /// tie group, presentation order is by entity id ascending. Every member
    /// of a tie group is classified by the group's highest score, so equal
    /// ranks always carry equal categories.
    pub fn rank(scores: Vec<CompositeScore>, bands: &CategoryBands) -> Vec<RankedEntity> {
        let mut ordered = scores;
        ordered.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.entity_id.cmp(&b.entity_id))
        });

        let mut ranked: Vec<RankedEntity> = Vec::with_capacity(ordered.len());
        let mut group_start = 0;
        let mut group_anchor = f64::NAN;
        let mut rank = 0u32;

        for entry in ordered {
            if rank == 0 || (group_anchor - entry.score).abs() > TIE_TOLERANCE {
                Self::sort_group_by_id(&mut ranked[group_start..]);
                group_start = ranked.len();
                group_anchor = entry.score;
                rank += 1;
            }

            ranked.push(RankedEntity {
                category: bands.classify(group_anchor, rank).to_string(),
                entity_id: entry.entity_id,
                label: entry.label,
                score: entry.score,
                rank,
            });
        }
        Self::sort_group_by_id(&mut ranked[group_start..]);

        ranked
    }

    // Near-equal scores may have been ordered by score rather than id.
    fn sort_group_by_id(group: &mut [RankedEntity]) {
        group.sort_by(|a, b| match a.entity_id.cmp(&b.entity_id) {
            Ordering::Equal => b.score.total_cmp(&a.score),
            other => other,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn composite(id: &str, score: f64) -> CompositeScore {
        CompositeScore {
            entity_id: EntityId::new(id).unwrap(),
            label: None,
            score,
        }
    }

    fn ranks_of(ranked: &[RankedEntity]) -> Vec<(String, u32)> {
        ranked
            .iter()
            .map(|r| (r.entity_id.to_string(), r.rank))
            .collect()
    }

    #[test]
    fn ties_share_rank_and_next_rank_is_dense() {
        let ranked = Ranker::rank(
            vec![composite("c", 0.75), composite("b", 0.82), composite("a", 0.82)],
            &CategoryBands::default(),
        );

        assert_eq!(
            ranks_of(&ranked),
            vec![("a".into(), 1), ("b".into(), 1), ("c".into(), 2)]
        );
    }

    #[test]
    fn near_equal_scores_within_tolerance_tie() {
        let ranked = Ranker::rank(
            vec![composite("z", 0.5 + 5e-10), composite("y", 0.5)],
            &CategoryBands::default(),
        );

        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].rank, 1);
        assert_eq!(ranked[0].entity_id.as_str(), "y");
    }

    #[test]
    fn distinct_scores_get_consecutive_ranks() {
        let ranked = Ranker::rank(
            vec![composite("a", 0.2), composite("b", 0.9), composite("c", 0.5)],
            &CategoryBands::default(),
        );
        assert_eq!(
            ranks_of(&ranked),
            vec![("b".into(), 1), ("c".into(), 2), ("a".into(), 3)]
        );
    }

    #[test]
    fn categories_follow_bands() {
        let ranked = Ranker::rank(
            vec![composite("a", 0.9), composite("b", 0.6), composite("c", 0.1)],
            &CategoryBands::default(),
        );
        let categories: Vec<_> = ranked.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(categories, vec!["Top", "Middle", "Attention"]);
    }

    #[test]
    fn tie_group_straddling_a_band_edge_shares_a_category() {
        let ranked = Ranker::rank(
            vec![composite("below", 0.75 - 5e-10), composite("at", 0.75)],
            &CategoryBands::default(),
        );

        assert_eq!(ranked[0].rank, ranked[1].rank);
        assert_eq!(ranked[0].category, "Top");
        assert_eq!(ranked[1].category, "Top");
    }

    #[test]
    fn empty_input_ranks_nothing() {
        assert!(Ranker::rank(vec![], &CategoryBands::default()).is_empty());
    }

    #[test]
    fn output_order_is_independent_of_input_order() {
        let forward = Ranker::rank(
            vec![composite("a", 0.4), composite("b", 0.4), composite("c", 0.7)],
            &CategoryBands::default(),
        );
        let reversed = Ranker::rank(
            vec![composite("c", 0.7), composite("b", 0.4), composite("a", 0.4)],
            &CategoryBands::default(),
        );
        assert_eq!(forward, reversed);
    }

    proptest! {
        #[test]
        fn ranking_is_monotonic_and_dense(raw in prop::collection::vec(0u32..20, 1..30)) {
            let scores: Vec<CompositeScore> = raw
                .iter()
                .enumerate()
                .map(|(i, s)| composite(&format!("e{:02}", i), *s as f64 / 20.0))
                .collect();

            let ranked = Ranker::rank(scores, &CategoryBands::default());

            for a in &ranked {
                for b in &ranked {
                    if a.score > b.score + TIE_TOLERANCE {
                        prop_assert!(a.rank < b.rank);
                    }
                    if (a.score - b.score).abs() <= TIE_TOLERANCE {
                        prop_assert_eq!(a.rank, b.rank);
                    }
                    if a.rank == b.rank {
                        prop_assert_eq!(&a.category, &b.category);
                    }
                }
            }

            let distinct = {
                let mut s: Vec<u32> = raw.clone();
                s.sort_unstable();
                s.dedup();
                s.len() as u32
            };
            prop_assert_eq!(ranked.iter().map(|r| r.rank).max(), Some(distinct));
            prop_assert_eq!(ranked[0].rank, 1);
        }
    }
}
