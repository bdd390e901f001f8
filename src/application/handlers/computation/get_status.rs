//! GetStatusHandler - Query handler for the engine's run status.
//!
//! Readable at any time. While a run is in flight, readers see the state
//! prior to its commit: the previous result and history.

use crate::application::handlers::SharedLedger;
use crate::domain::ahp::AhpError;
use crate::domain::computation::{HistoryEntry, RunLedger, RunResult, RunStatus};
use crate::domain::foundation::{RunId, Timestamp};

/// Query for the current status.
#[derive(Debug, Clone, Default)]
pub struct GetStatusQuery;

/// Snapshot of the engine's run state.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStatusView {
    pub status: RunStatus,
    /// Active run while Running, otherwise the last finished run.
    pub run_id: Option<RunId>,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub message: Option<String>,
    /// Latest completed result; absent when the last run failed.
    pub result: Option<RunResult>,
    pub error: Option<AhpError>,
    /// Most recent first.
    pub history: Vec<HistoryEntry>,
}

impl From<&RunLedger> for RunStatusView {
    fn from(ledger: &RunLedger) -> Self {
        let history = ledger.history().to_vec();
        let previous_result = ledger
            .last_completed()
            .and_then(|run| run.result())
            .cloned();

        if let Some(active) = ledger.active() {
            return Self {
                status: RunStatus::Running,
                run_id: Some(active.id),
                started_at: Some(active.started_at),
                completed_at: None,
                message: Some("Computation run in progress".to_string()),
                result: previous_result,
                error: None,
                history,
            };
        }

        match ledger.last_run() {
            Some(run) => Self {
                status: run.status(),
                run_id: Some(run.id()),
                started_at: Some(run.started_at()),
                completed_at: Some(run.completed_at()),
                message: Some(run.message().to_string()),
                result: run.result().cloned(),
                error: run.error().cloned(),
                history,
            },
            None => Self {
                status: RunStatus::Idle,
                run_id: None,
                started_at: None,
                completed_at: None,
                message: None,
                result: None,
                error: None,
                history,
            },
        }
    }
}

/// Handler for status queries.
pub struct GetStatusHandler {
    ledger: SharedLedger,
}

impl GetStatusHandler {
    pub fn new(ledger: SharedLedger) -> Self {
        Self { ledger }
    }

    pub async fn handle(&self, _query: GetStatusQuery) -> RunStatusView {
        RunStatusView::from(&*self.ledger.read().await)
    }
}
