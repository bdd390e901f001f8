//! StartRunHandler - Command handler for triggering a computation run.
//!
//! Admits at most one run at a time. An admitted run snapshots the
//! providers, runs the ranking pipeline, persists weights on success and
//! records exactly one history entry before the engine returns to Idle.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::application::handlers::SharedLedger;
use crate::domain::ahp::AhpError;
use crate::domain::computation::{
    ActiveRun, ComputationRun, PipelineSettings, RankingPipeline, RunEffect, RunEvent,
    RunOutcome, RunSnapshot, RunStatus,
};
use crate::domain::foundation::{DomainError, RunId, Timestamp};
use crate::ports::{CategoryThresholdProvider, CriteriaMatrixProvider, EntityScoreProvider};

/// Default number of attempts when reading provider inputs.
pub const DEFAULT_SNAPSHOT_ATTEMPTS: u32 = 3;

/// Command to start a computation run.
#[derive(Debug, Clone, Default)]
pub struct StartRunCommand {
    /// Overrides the handler's background setting for this request.
    pub run_in_background: Option<bool>,
}

/// Result of a start request.
#[derive(Debug, Clone, PartialEq)]
pub struct StartRunResult {
    pub accepted: bool,
    /// Id of the admitted run; `None` when rejected.
    pub run_id: Option<RunId>,
    /// Running for background or rejected requests, otherwise the outcome.
    pub status: RunStatus,
    pub message: String,
}

impl StartRunResult {
    fn rejected() -> Self {
        Self {
            accepted: false,
            run_id: None,
            status: RunStatus::Running,
            message: AhpError::RunAlreadyInProgress.to_string(),
        }
    }

    fn dispatched(run_id: RunId) -> Self {
        Self {
            accepted: true,
            run_id: Some(run_id),
            status: RunStatus::Running,
            message: "Computation run started".to_string(),
        }
    }
}

impl From<&ComputationRun> for StartRunResult {
    fn from(run: &ComputationRun) -> Self {
        Self {
            accepted: true,
            run_id: Some(run.id()),
            status: run.status(),
            message: run.message().to_string(),
        }
    }
}

/// Handler for starting computation runs.
#[derive(Clone)]
pub struct StartRunHandler {
    ledger: SharedLedger,
    criteria: Arc<dyn CriteriaMatrixProvider>,
    scores: Arc<dyn EntityScoreProvider>,
    thresholds: Arc<dyn CategoryThresholdProvider>,
    settings: PipelineSettings,
    snapshot_attempts: u32,
    run_in_background: bool,
}

impl StartRunHandler {
    pub fn new(
        ledger: SharedLedger,
        criteria: Arc<dyn CriteriaMatrixProvider>,
        scores: Arc<dyn EntityScoreProvider>,
        thresholds: Arc<dyn CategoryThresholdProvider>,
    ) -> Self {
        Self {
            ledger,
            criteria,
            scores,
            thresholds,
            settings: PipelineSettings::default(),
            snapshot_attempts: DEFAULT_SNAPSHOT_ATTEMPTS,
            run_in_background: false,
        }
    }

    pub fn with_settings(mut self, settings: PipelineSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_snapshot_attempts(mut self, attempts: u32) -> Self {
        self.snapshot_attempts = attempts.max(1);
        self
    }

    pub fn in_background(mut self, enabled: bool) -> Self {
        self.run_in_background = enabled;
        self
    }

    /// Starts a run, or reports that one is already in progress.
    ///
    /// Rejection is not an error: it yields `accepted = false`. Errors are
    /// reserved for ledger faults, which leave no usable run state.
    pub async fn handle(&self, cmd: StartRunCommand) -> Result<StartRunResult, AhpError> {
        let run_id = RunId::new();
        let started_at = Timestamp::now();

        {
            let mut ledger = self.ledger.write().await;
            match ledger.apply(RunEvent::StartRequested {
                run_id,
                at: started_at,
            }) {
                Ok(effects) => log_effects(&effects),
                Err(AhpError::RunAlreadyInProgress) => {
                    warn!(
                        active_run = ?ledger.active().map(|a| a.id.to_string()),
                        "Run request rejected: computation already in progress"
                    );
                    return Ok(StartRunResult::rejected());
                }
                Err(e) => return Err(e),
            }
        }

        let active = ActiveRun {
            id: run_id,
            started_at,
        };

        if cmd.run_in_background.unwrap_or(self.run_in_background) {
            let handler = self.clone();
            tokio::spawn(async move {
                if let Err(e) = handler.execute(active).await {
                    error!(run_id = %run_id, error = %e, "Background run could not be recorded");
                }
            });
            return Ok(StartRunResult::dispatched(run_id));
        }

        let run = self.execute(active).await?;
        Ok(StartRunResult::from(&run))
    }

    /// Produces the outcome of an admitted run and commits it.
    async fn execute(&self, active: ActiveRun) -> Result<ComputationRun, AhpError> {
        let worker = self.clone();
        let outcome = match tokio::spawn(async move { worker.produce_outcome(active.id).await })
            .await
        {
            Ok(outcome) => outcome,
            Err(join_error) => RunOutcome::Failed(AhpError::computation_failed(format!(
                "run task aborted: {}",
                join_error
            ))),
        };

        let run = ComputationRun::finish(active, outcome);
        match run.error() {
            None => info!(
                run_id = %run.id(),
                entities = run.result().map(|r| r.composite.len()).unwrap_or(0),
                "Computation run completed"
            ),
            Some(e) => warn!(run_id = %run.id(), error = %e, "Computation run failed"),
        }

        let effects = self
            .ledger
            .write()
            .await
            .apply(RunEvent::Finished(run.clone()))?;
        log_effects(&effects);

        Ok(run)
    }

    async fn produce_outcome(&self, run_id: RunId) -> RunOutcome {
        let snapshot = match self.snapshot(run_id).await {
            Ok(snapshot) => snapshot,
            Err(e) => return RunOutcome::Failed(e),
        };

        let result = match RankingPipeline::run(snapshot, &self.settings) {
            Ok(result) => result,
            Err(e) => return RunOutcome::Failed(e),
        };

        for warning in &result.warnings {
            warn!(run_id = %run_id, warning = %warning, "Run completed with warning");
        }

        if let Err(e) = self.criteria.save_weights(&result.priority_vector).await {
            return RunOutcome::Failed(AhpError::computation_failed(format!(
                "failed to persist weights: {}",
                e
            )));
        }

        RunOutcome::Completed(result)
    }

    /// Reads all inputs, retrying transient provider failures.
    async fn snapshot(&self, run_id: RunId) -> Result<RunSnapshot, AhpError> {
        let mut last_error = None;

        for attempt in 1..=self.snapshot_attempts {
            match self.read_inputs().await {
                Ok(snapshot) => {
                    debug!(
                        run_id = %run_id,
                        attempt,
                        criteria = snapshot.judgments.criterion_ids.len(),
                        entities = snapshot.entities.len(),
                        "Inputs snapshotted"
                    );
                    return Ok(snapshot);
                }
                Err(e) => {
                    warn!(run_id = %run_id, attempt, error = %e, "Failed to read run inputs");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .map(AhpError::from)
            .unwrap_or_else(|| AhpError::computation_failed("no snapshot attempts configured")))
    }

    async fn read_inputs(&self) -> Result<RunSnapshot, DomainError> {
        let judgments = self.criteria.current_judgments().await?;
        let entities = self.scores.current_scores().await?;
        let bands = self.thresholds.current_bands().await?;
        bands.validate()?;

        Ok(RunSnapshot {
            judgments,
            entities,
            bands,
        })
    }
}

fn log_effects(effects: &[RunEffect]) {
    for effect in effects {
        match effect {
            RunEffect::Admitted(active) => {
                info!(run_id = %active.id, "Computation run started")
            }
            RunEffect::Recorded(entry) => debug!(
                run_id = %entry.run_id,
                status = %entry.status,
                headline = ?entry.headline_score,
                "Run recorded in history"
            ),
            RunEffect::ReturnedToIdle => debug!("Engine returned to idle"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::new_shared_ledger;
    use crate::application::handlers::test_support::*;
    use crate::domain::ranking::CategoryBands;
    use tokio::sync::Notify;

    fn handler_with(criteria: Arc<MockCriteria>, ledger: SharedLedger) -> StartRunHandler {
        StartRunHandler::new(
            ledger,
            criteria,
            Arc::new(MockScores(vec![
                entity("alpha", [0.9, 0.8, 0.7]),
                entity("beta", [0.2, 0.3, 0.4]),
            ])),
            Arc::new(MockBands(CategoryBands::default())),
        )
    }

    // ─────────────────────────────────────────────────────────────────────
    // Success
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn completed_run_is_recorded_and_weights_saved() {
        let criteria = Arc::new(MockCriteria::new(saaty_judgments()));
        let ledger = new_shared_ledger(10);
        let handler = handler_with(criteria.clone(), ledger.clone());

        let result = handler.handle(StartRunCommand::default()).await.unwrap();

        assert!(result.accepted);
        assert_eq!(result.status, RunStatus::Completed);
        assert!(result.message.contains("2 entities ranked"));

        let ledger = ledger.read().await;
        assert!(!ledger.is_running());
        assert_eq!(ledger.history().len(), 1);
        assert_eq!(criteria.saved().len(), 1);
    }

    #[tokio::test]
    async fn high_inconsistency_still_completes_with_warning() {
        let criteria = Arc::new(MockCriteria::new(contradictory_judgments()));
        let ledger = new_shared_ledger(10);
        let handler = handler_with(criteria, ledger.clone());

        let result = handler.handle(StartRunCommand::default()).await.unwrap();

        assert_eq!(result.status, RunStatus::Completed);
        assert!(result.message.contains("warning"));
        let ledger = ledger.read().await;
        let run = ledger.last_completed().unwrap();
        assert!(!run.result().unwrap().warnings.is_empty());
    }

    #[tokio::test]
    async fn fatal_inconsistency_fails_the_run() {
        let criteria = Arc::new(MockCriteria::new(contradictory_judgments()));
        let ledger = new_shared_ledger(10);
        let handler = handler_with(criteria.clone(), ledger).with_settings(PipelineSettings {
            fail_on_inconsistency: true,
            ..PipelineSettings::default()
        });

        let result = handler.handle(StartRunCommand::default()).await.unwrap();

        assert_eq!(result.status, RunStatus::Failed);
        assert!(criteria.saved().is_empty());
    }

    // ─────────────────────────────────────────────────────────────────────
    // Failure paths
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn transient_read_failures_are_retried() {
        let criteria = Arc::new(MockCriteria::new(saaty_judgments()).failing_reads(2));
        let ledger = new_shared_ledger(10);
        let handler = handler_with(criteria, ledger.clone()).with_snapshot_attempts(3);

        let result = handler.handle(StartRunCommand::default()).await.unwrap();

        assert_eq!(result.status, RunStatus::Completed);
        assert_eq!(ledger.read().await.history().len(), 1);
    }

    #[tokio::test]
    async fn exhausted_retries_fail_with_single_history_entry() {
        let criteria = Arc::new(MockCriteria::new(saaty_judgments()).failing_reads(5));
        let ledger = new_shared_ledger(10);
        let handler = handler_with(criteria, ledger.clone()).with_snapshot_attempts(2);

        let result = handler.handle(StartRunCommand::default()).await.unwrap();

        assert_eq!(result.status, RunStatus::Failed);
        assert!(result.message.contains("Simulated read failure"));
        let ledger = ledger.read().await;
        assert_eq!(ledger.history().len(), 1);
        assert!(matches!(
            ledger.last_run().unwrap().error(),
            Some(AhpError::ComputationFailed(_))
        ));
    }

    #[tokio::test]
    async fn weight_persistence_failure_fails_the_run() {
        let criteria = Arc::new(MockCriteria::new(saaty_judgments()).failing_saves());
        let ledger = new_shared_ledger(10);
        let handler = handler_with(criteria, ledger.clone());

        let result = handler.handle(StartRunCommand::default()).await.unwrap();

        assert_eq!(result.status, RunStatus::Failed);
        assert!(ledger.read().await.last_completed().is_none());
    }

    // ─────────────────────────────────────────────────────────────────────
    // Admission control
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn second_request_while_running_is_rejected() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let criteria = Arc::new(
            MockCriteria::new(saaty_judgments()).gated(entered.clone(), release.clone()),
        );
        let ledger = new_shared_ledger(10);
        let handler = handler_with(criteria, ledger.clone());

        let first = {
            let handler = handler.clone();
            tokio::spawn(async move { handler.handle(StartRunCommand::default()).await })
        };
        entered.notified().await;

        let second = handler.handle(StartRunCommand::default()).await.unwrap();
        assert!(!second.accepted);
        assert_eq!(second.run_id, None);
        assert!(ledger.read().await.is_running());

        release.notify_one();
        let first = first.await.unwrap().unwrap();
        assert!(first.accepted);
        assert_eq!(first.status, RunStatus::Completed);
        assert_eq!(ledger.read().await.history().len(), 1);
    }

    #[tokio::test]
    async fn background_run_returns_immediately_and_completes() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let criteria = Arc::new(
            MockCriteria::new(saaty_judgments()).gated(entered.clone(), release.clone()),
        );
        let ledger = new_shared_ledger(10);
        let handler = handler_with(criteria, ledger.clone()).in_background(true);

        let result = handler.handle(StartRunCommand::default()).await.unwrap();
        assert!(result.accepted);
        assert_eq!(result.status, RunStatus::Running);

        entered.notified().await;
        release.notify_one();

        for _ in 0..100 {
            if !ledger.read().await.is_running() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        let ledger = ledger.read().await;
        assert_eq!(ledger.reported_status(), RunStatus::Completed);
        assert_eq!(ledger.last_run().unwrap().id(), result.run_id.unwrap());
    }
}
