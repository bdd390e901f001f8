//! Error taxonomy for the decision engine.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | InvalidMatrix | 422 |
//! | UnsupportedMatrixSize | 422 |
//! | IncompleteScoreSet | 422 |
//! | InvalidScore | 422 |
//! | InconsistentJudgments | 422 |
//! | RunAlreadyInProgress | 409 |
//! | ComputationFailed | 500 |

use thiserror::Error;

use crate::domain::foundation::{CriterionId, DomainError, EntityId, ErrorCode};

/// Errors raised by the matrix, weighting, scoring and run components.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AhpError {
    /// Structural violation in a pairwise comparison matrix.
    #[error("Invalid comparison matrix: {reason}")]
    InvalidMatrix {
        /// Offending `(row, col)` cell, when the violation is cell-local.
        cell: Option<(usize, usize)>,
        reason: String,
    },

    /// No random index is tabulated for this matrix size.
    #[error("Unsupported matrix size {size}: random index is tabulated for 1..={max}")]
    UnsupportedMatrixSize { size: usize, max: usize },

    /// An entity lacks a score for one of the weighted criteria.
    #[error("Entity '{entity_id}' has no score for criterion '{criterion_id}'")]
    IncompleteScoreSet {
        entity_id: EntityId,
        criterion_id: CriterionId,
    },

    /// A supplied score is not a finite value in `[0, 1]`.
    #[error("Entity '{entity_id}' has score {value} for criterion '{criterion_id}', expected a value in [0, 1]")]
    InvalidScore {
        entity_id: EntityId,
        criterion_id: CriterionId,
        value: f64,
    },

    /// Consistency ratio exceeded the threshold while configured as fatal.
    #[error("Judgments are inconsistent: CR {ratio:.4} exceeds threshold {threshold}")]
    InconsistentJudgments { ratio: f64, threshold: f64 },

    /// Admission control rejected a second concurrent run.
    #[error("A computation run is already in progress")]
    RunAlreadyInProgress,

    /// Catch-all for unexpected internal faults.
    #[error("Computation failed: {0}")]
    ComputationFailed(String),
}

impl AhpError {
    pub fn invalid_matrix(reason: impl Into<String>) -> Self {
        AhpError::InvalidMatrix {
            cell: None,
            reason: reason.into(),
        }
    }

    pub fn invalid_cell(row: usize, col: usize, reason: impl Into<String>) -> Self {
        AhpError::InvalidMatrix {
            cell: Some((row, col)),
            reason: reason.into(),
        }
    }

    pub fn incomplete_scores(entity_id: EntityId, criterion_id: CriterionId) -> Self {
        AhpError::IncompleteScoreSet {
            entity_id,
            criterion_id,
        }
    }

    pub fn computation_failed(reason: impl Into<String>) -> Self {
        AhpError::ComputationFailed(reason.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AhpError::InvalidMatrix { .. } => ErrorCode::InvalidMatrix,
            AhpError::UnsupportedMatrixSize { .. } => ErrorCode::UnsupportedMatrixSize,
            AhpError::IncompleteScoreSet { .. } => ErrorCode::IncompleteScoreSet,
            AhpError::InvalidScore { .. } => ErrorCode::ValidationFailed,
            AhpError::InconsistentJudgments { .. } => ErrorCode::ValidationFailed,
            AhpError::RunAlreadyInProgress => ErrorCode::RunAlreadyInProgress,
            AhpError::ComputationFailed(_) => ErrorCode::ComputationFailed,
        }
    }

    /// Returns true for errors caused by the submitted data rather than the engine.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AhpError::InvalidMatrix { .. }
                | AhpError::UnsupportedMatrixSize { .. }
                | AhpError::IncompleteScoreSet { .. }
                | AhpError::InvalidScore { .. }
                | AhpError::InconsistentJudgments { .. }
        )
    }
}

impl From<DomainError> for AhpError {
    fn from(err: DomainError) -> Self {
        AhpError::ComputationFailed(err.to_string())
    }
}

impl From<AhpError> for DomainError {
    fn from(err: AhpError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
