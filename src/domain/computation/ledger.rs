//! Run ledger - the single-flight state machine and its history.
//!
//! The ledger is the only shared mutable state of the engine. It performs
//! no I/O: every change goes through [`RunLedger::apply`], which maps the
//! current state and an event to the next state plus a list of effects the
//! caller can act on (logging, metrics).

use super::{ActiveRun, ComputationRun, HistoryEntry, RunHistory, RunStatus};
use crate::domain::ahp::AhpError;
use crate::domain::foundation::{RunId, StateMachine, Timestamp};

/// Inputs to the run state machine.
#[derive(Debug, Clone)]
pub enum RunEvent {
    /// A caller asked for a new run.
    StartRequested { run_id: RunId, at: Timestamp },
    /// The in-flight run reached an outcome.
    Finished(ComputationRun),
}

/// Observable consequences of applying an event.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEffect {
    Admitted(ActiveRun),
    Recorded(HistoryEntry),
    ReturnedToIdle,
}

/// Guarded run state: at most one active run, plus outcomes and history.
#[derive(Debug, Clone, Default)]
pub struct RunLedger {
    status: RunStatus,
    active: Option<ActiveRun>,
    last_run: Option<ComputationRun>,
    last_completed: Option<ComputationRun>,
    history: RunHistory,
}

impl RunLedger {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            history: RunHistory::with_capacity(history_capacity),
            ..Self::default()
        }
    }

    /// Applies an event, returning the effects it produced.
    ///
    /// # Errors
    /// - `RunAlreadyInProgress` when a start is requested while running
    /// - `ComputationFailed` when a finish does not match the active run
    ///
    /// A rejected event leaves the ledger unchanged.
    pub fn apply(&mut self, event: RunEvent) -> Result<Vec<RunEffect>, AhpError> {
        match event {
            RunEvent::StartRequested { run_id, at } => {
                if !self.status.accepts_runs() {
                    return Err(AhpError::RunAlreadyInProgress);
                }
                self.status = self.transition(RunStatus::Running)?;
                let active = ActiveRun {
                    id: run_id,
                    started_at: at,
                };
                self.active = Some(active);
                Ok(vec![RunEffect::Admitted(active)])
            }
            RunEvent::Finished(run) => {
                match self.active {
                    Some(active) if active.id == run.id() => {}
                    _ => {
                        return Err(AhpError::computation_failed(format!(
                            "run {} is not the active run",
                            run.id()
                        )))
                    }
                }

                self.status = self.transition(run.status())?;
                let mut effects = Vec::with_capacity(2);

                let entry = HistoryEntry::from(&run);
                if self.history.record(entry.clone()) {
                    effects.push(RunEffect::Recorded(entry));
                }

                if run.result().is_some() {
                    self.last_completed = Some(run.clone());
                }
                self.last_run = Some(run);
                self.active = None;

                self.status = self.transition(RunStatus::Idle)?;
                effects.push(RunEffect::ReturnedToIdle);
                Ok(effects)
            }
        }
    }

    fn transition(&self, target: RunStatus) -> Result<RunStatus, AhpError> {
        self.status
            .transition_to(target)
            .map_err(|e| AhpError::computation_failed(e.to_string()))
    }

    /// Internal machine state (Idle or Running between events).
    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Status as reported to callers.
    ///
    /// Running while a run is in flight, otherwise the outcome of the most
    /// recent run, or Idle if nothing has run yet.
    pub fn reported_status(&self) -> RunStatus {
        if self.active.is_some() {
            RunStatus::Running
        } else {
            self.last_run
                .as_ref()
                .map(ComputationRun::status)
                .unwrap_or(RunStatus::Idle)
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&ActiveRun> {
        self.active.as_ref()
    }

    pub fn last_run(&self) -> Option<&ComputationRun> {
        self.last_run.as_ref()
    }

    pub fn last_completed(&self) -> Option<&ComputationRun> {
        self.last_completed.as_ref()
    }

    pub fn history(&self) -> &RunHistory {
        &self.history
    }
}
