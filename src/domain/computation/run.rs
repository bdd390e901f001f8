//! Computation runs and their outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::RunStatus;
use crate::domain::ahp::{AhpError, ConsistencyResult, PriorityVector};
use crate::domain::foundation::{RunId, Timestamp};
use crate::domain::ranking::{to_percentage, CategoryBands, RankedEntity};

/// Non-fatal observation attached to a completed result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunWarning {
    /// CR above the acceptability threshold; judgments may need revision.
    HighInconsistency { ratio: f64, threshold: f64 },
    /// Power iteration hit its ceiling before converging.
    IterationCeilingReached { iterations: usize },
}

impl fmt::Display for RunWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunWarning::HighInconsistency { ratio, threshold } => write!(
                f,
                "Consistency ratio {:.4} exceeds {}; consider revising the pairwise judgments",
                ratio, threshold
            ),
            RunWarning::IterationCeilingReached { iterations } => write!(
                f,
                "Weights did not converge within {} iterations; using best estimate",
                iterations
            ),
        }
    }
}

/// Everything a completed run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResult {
    pub priority_vector: PriorityVector,
    pub consistency: ConsistencyResult,
    /// Entities in presentation order.
    pub composite: Vec<RankedEntity>,
    pub warnings: Vec<RunWarning>,
    /// Bands the entities were classified with.
    pub bands: CategoryBands,
}

impl RunResult {
    /// Mean composite score as a percentage; `None` when nothing was ranked.
    pub fn headline_score(&self) -> Option<f64> {
        if self.composite.is_empty() {
            return None;
        }
        let mean =
            self.composite.iter().map(|e| e.score).sum::<f64>() / self.composite.len() as f64;
        Some(to_percentage(mean))
    }
}

/// Tagged outcome of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Completed(RunResult),
    Failed(AhpError),
}

/// A run currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveRun {
    pub id: RunId,
    pub started_at: Timestamp,
}

/// A finished computation run. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputationRun {
    id: RunId,
    started_at: Timestamp,
    completed_at: Timestamp,
    outcome: RunOutcome,
    message: String,
}

impl ComputationRun {
    /// Closes an active run with its outcome.
    pub fn finish(active: ActiveRun, outcome: RunOutcome) -> Self {
        let message = Self::describe(&outcome);
        Self {
            id: active.id,
            started_at: active.started_at,
            completed_at: Timestamp::now(),
            outcome,
            message,
        }
    }

    fn describe(outcome: &RunOutcome) -> String {
        match outcome {
            RunOutcome::Completed(result) => {
                let mut message = format!(
                    "Computation completed: {} entities ranked, CR {:.4}",
                    result.composite.len(),
                    result.consistency.cr
                );
                if !result.warnings.is_empty() {
                    message.push_str(&format!(" ({} warning(s))", result.warnings.len()));
                }
                message
            }
            RunOutcome::Failed(error) => error.to_string(),
        }
    }

    pub fn id(&self) -> RunId {
        self.id
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn completed_at(&self) -> Timestamp {
        self.completed_at
    }

    pub fn outcome(&self) -> &RunOutcome {
        &self.outcome
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> RunStatus {
        match self.outcome {
            RunOutcome::Completed(_) => RunStatus::Completed,
            RunOutcome::Failed(_) => RunStatus::Failed,
        }
    }

    /// The result, if the run completed.
    pub fn result(&self) -> Option<&RunResult> {
        match &self.outcome {
            RunOutcome::Completed(result) => Some(result),
            RunOutcome::Failed(_) => None,
        }
    }

    /// The failure, if the run failed.
    pub fn error(&self) -> Option<&AhpError> {
        match &self.outcome {
            RunOutcome::Completed(_) => None,
            RunOutcome::Failed(error) => Some(error),
        }
    }
}
