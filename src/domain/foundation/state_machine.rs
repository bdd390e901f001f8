//! State machine trait for lifecycle status enums.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors list their legal transitions and get a validated
/// `transition_to` for free.
///
/// ```ignore
/// let next = RunStatus::Idle.transition_to(RunStatus::Running)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state has no outgoing transitions.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Latch {
        Open,
        Closed,
        Sealed,
    }

    impl StateMachine for Latch {
        fn can_transition_to(&self, target: &Self) -> bool {
            self.valid_transitions().contains(target)
        }

        fn valid_transitions(&self) -> Vec<Self> {
            match self {
                Latch::Open => vec![Latch::Closed],
                Latch::Closed => vec![Latch::Open, Latch::Sealed],
                Latch::Sealed => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_listed_target() {
        assert_eq!(Latch::Open.transition_to(Latch::Closed), Ok(Latch::Closed));
    }

    #[test]
    fn transition_to_reports_both_states_on_failure() {
        match Latch::Open.transition_to(Latch::Sealed) {
            Err(ValidationError::InvalidFormat { field, reason }) => {
                assert_eq!(field, "state_transition");
                assert!(reason.contains("Open"));
                assert!(reason.contains("Sealed"));
            }
            other => panic!("Expected InvalidFormat, got {:?}", other),
        }
    }

    #[test]
    fn is_terminal_only_for_states_without_exits() {
        assert!(Latch::Sealed.is_terminal());
        assert!(!Latch::Open.is_terminal());
        assert!(!Latch::Closed.is_terminal());
    }
}
