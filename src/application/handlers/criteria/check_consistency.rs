//! CheckConsistencyHandler - Read-only consistency check.
//!
//! Scores a candidate matrix (or the current one) without touching run
//! state or persisted weights, so judgments can be checked before commit.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ahp::{AhpError, ConsistencyResult, PairwiseJudgments};
use crate::domain::computation::{PipelineSettings, RankingPipeline};
use crate::ports::CriteriaMatrixProvider;

/// Query for the consistency of a matrix.
#[derive(Debug, Clone, Default)]
pub struct CheckConsistencyQuery {
    /// Candidate judgments; the provider's current matrix when `None`.
    pub judgments: Option<PairwiseJudgments>,
}

/// Consistency of a matrix against the configured threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsistencyReport {
    pub consistency: ConsistencyResult,
    pub threshold: f64,
    pub acceptable: bool,
}

/// Handler for consistency checks.
pub struct CheckConsistencyHandler {
    criteria: Arc<dyn CriteriaMatrixProvider>,
    settings: PipelineSettings,
}

impl CheckConsistencyHandler {
    pub fn new(criteria: Arc<dyn CriteriaMatrixProvider>, settings: PipelineSettings) -> Self {
        Self { criteria, settings }
    }

    /// Reports CI/RI/CR. A high ratio is reported, never rejected.
    pub async fn handle(&self, query: CheckConsistencyQuery) -> Result<ConsistencyReport, AhpError> {
        let judgments = match query.judgments {
            Some(judgments) => judgments,
            None => self.criteria.current_judgments().await?,
        };

        let read_only = PipelineSettings {
            fail_on_inconsistency: false,
            ..self.settings
        };
        let analysis = RankingPipeline::analyze_weights(judgments, &read_only)?;

        debug!(cr = analysis.consistency.cr, "Consistency check evaluated");

        Ok(ConsistencyReport {
            consistency: analysis.consistency,
            threshold: self.settings.cr_threshold,
            acceptable: analysis.is_acceptable(self.settings.cr_threshold),
        })
    }
}
