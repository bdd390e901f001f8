//! RunStatus enum for the computation run lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle status of the computation engine.
///
/// `Completed` and `Failed` are transient: once the outcome is recorded the
/// engine folds back to `Idle` and accepts the next request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
    Completed,
    Failed,
}

impl RunStatus {
    /// Returns true if a new run may be admitted.
    pub fn accepts_runs(&self) -> bool {
        matches!(self, RunStatus::Idle)
    }

    /// Returns true for Completed or Failed.
    pub fn is_outcome(&self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Failed)
    }
}

impl StateMachine for RunStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use RunStatus::*;
        matches!(
            (self, target),
            (Idle, Running)
                | (Running, Completed)
                | (Running, Failed)
                | (Completed, Idle)
                | (Failed, Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use RunStatus::*;
        match self {
            Idle => vec![Running],
            Running => vec![Completed, Failed],
            Completed => vec![Idle],
            Failed => vec![Idle],
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunStatus::Idle => "Idle",
            RunStatus::Running => "Running",
            RunStatus::Completed => "Completed",
            RunStatus::Failed => "Failed",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        assert_eq!(RunStatus::default(), RunStatus::Idle);
        assert!(RunStatus::Idle.accepts_runs());
    }

    #[test]
    fn idle_can_only_start_running() {
        assert_eq!(RunStatus::Idle.valid_transitions(), vec![RunStatus::Running]);
        assert!(!RunStatus::Idle.can_transition_to(&RunStatus::Completed));
    }

    #[test]
    fn running_cannot_restart() {
        assert!(RunStatus::Running.transition_to(RunStatus::Running).is_err());
        assert!(!RunStatus::Running.accepts_runs());
    }

    #[test]
    fn outcomes_fold_back_to_idle() {
        for outcome in [RunStatus::Completed, RunStatus::Failed] {
            assert!(outcome.is_outcome());
            assert_eq!(outcome.transition_to(RunStatus::Idle), Ok(RunStatus::Idle));
            assert!(outcome.transition_to(RunStatus::Running).is_err());
        }
    }

    #[test]
    fn no_status_is_terminal() {
        for status in [
            RunStatus::Idle,
            RunStatus::Running,
            RunStatus::Completed,
            RunStatus::Failed,
        ] {
            assert!(!status.is_terminal());
        }
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for status in [
            RunStatus::Idle,
            RunStatus::Running,
            RunStatus::Completed,
            RunStatus::Failed,
        ] {
            for target in status.valid_transitions() {
                assert!(status.can_transition_to(&target));
            }
        }
    }

    #[test]
    fn serializes_as_variant_name() {
        assert_eq!(serde_json::to_string(&RunStatus::Running).unwrap(), "\"Running\"");
    }
}
