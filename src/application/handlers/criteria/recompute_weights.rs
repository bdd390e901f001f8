//! RecomputeWeightsHandler - Command handler for refreshing criterion weights.
//!
//! Derives and persists weights without composite scoring. Rejected while
//! a run is in flight so weights never change under it.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};

use crate::application::handlers::SharedLedger;
use crate::domain::ahp::{AhpError, ConsistencyResult, PairwiseJudgments, PriorityVector};
use crate::domain::computation::{PipelineSettings, RankingPipeline, RunWarning};
use crate::ports::CriteriaMatrixProvider;

/// Command to recompute weights.
#[derive(Debug, Clone, Default)]
pub struct RecomputeWeightsCommand {
    /// Judgments to derive from; the provider's current matrix when `None`.
    pub judgments: Option<PairwiseJudgments>,
}

/// Persisted weights and their consistency.
#[derive(Debug, Clone, PartialEq)]
pub struct RecomputeWeightsResult {
    pub priority_vector: PriorityVector,
    pub consistency: ConsistencyResult,
    pub warnings: Vec<RunWarning>,
}

/// Handler for weight recomputation.
pub struct RecomputeWeightsHandler {
    ledger: SharedLedger,
    criteria: Arc<dyn CriteriaMatrixProvider>,
    settings: PipelineSettings,
}

impl RecomputeWeightsHandler {
    pub fn new(
        ledger: SharedLedger,
        criteria: Arc<dyn CriteriaMatrixProvider>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            ledger,
            criteria,
            settings,
        }
    }

    /// # Errors
    /// - `RunAlreadyInProgress` while a run is Running
    /// - `InvalidMatrix` for malformed judgments, or when the candidate does
    ///   not name exactly the active criteria
    /// - `InconsistentJudgments` when configured to reject high CR
    /// - `ComputationFailed` when the provider cannot be read or written
    pub async fn handle(
        &self,
        cmd: RecomputeWeightsCommand,
    ) -> Result<RecomputeWeightsResult, AhpError> {
        // Held for the whole operation: admission needs the write lock.
        let ledger = self.ledger.read().await;
        if ledger.is_running() {
            warn!("Weight recompute rejected: computation run in progress");
            return Err(AhpError::RunAlreadyInProgress);
        }

        let judgments = match cmd.judgments {
            Some(judgments) => {
                self.ensure_covers_active_criteria(&judgments).await?;
                judgments
            }
            None => self.criteria.current_judgments().await?,
        };

        let analysis = RankingPipeline::analyze_weights(judgments, &self.settings)?;

        self.criteria
            .save_weights(&analysis.priority_vector)
            .await
            .map_err(|e| AhpError::computation_failed(format!("failed to persist weights: {}", e)))?;
        drop(ledger);

        info!(
            criteria = analysis.priority_vector.len(),
            cr = analysis.consistency.cr,
            "Criterion weights recomputed"
        );

        Ok(RecomputeWeightsResult {
            priority_vector: analysis.priority_vector,
            consistency: analysis.consistency,
            warnings: analysis.warnings,
        })
    }

    /// The candidate must name exactly the active criteria, in any order.
    async fn ensure_covers_active_criteria(
        &self,
        judgments: &PairwiseJudgments,
    ) -> Result<(), AhpError> {
        let active: Vec<_> = self
            .criteria
            .list_criteria()
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect();
        let known: HashSet<_> = active.iter().collect();
        let supplied: HashSet<_> = judgments.criterion_ids.iter().collect();

        if let Some(unknown) = judgments.criterion_ids.iter().find(|id| !known.contains(id)) {
            return Err(AhpError::invalid_matrix(format!(
                "unknown criterion '{}'",
                unknown
            )));
        }
        if let Some(missing) = active.iter().find(|id| !supplied.contains(id)) {
            return Err(AhpError::invalid_matrix(format!(
                "missing criterion '{}'",
                missing
            )));
        }
        if judgments.criterion_ids.len() != active.len() {
            return Err(AhpError::invalid_matrix(format!(
                "expected {} criteria, got {}",
                active.len(),
                judgments.criterion_ids.len()
            )));
        }
        Ok(())
    }
}
