//! Error types for the domain layer.

use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidMatrix,
    UnsupportedMatrixSize,
    IncompleteScoreSet,

    // State errors
    RunAlreadyInProgress,

    // Not found errors
    NotFound,

    // Infrastructure errors
    ProviderUnavailable,
    ComputationFailed,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidMatrix => "INVALID_MATRIX",
            ErrorCode::UnsupportedMatrixSize => "UNSUPPORTED_MATRIX_SIZE",
            ErrorCode::IncompleteScoreSet => "INCOMPLETE_SCORE_SET",
            ErrorCode::RunAlreadyInProgress => "RUN_ALREADY_IN_PROGRESS",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ProviderUnavailable => "PROVIDER_UNAVAILABLE",
            ErrorCode::ComputationFailed => "COMPUTATION_FAILED",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code and message.
///
/// Used at the port boundary; collaborators report failures with this type.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::new(ErrorCode::ValidationFailed, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("entity_id");
        assert_eq!(format!("{}", err), "Field 'entity_id' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("score", 0.0, 1.0, 1.5);
        assert_eq!(
            format!("{}", err),
            "Field 'score' must be between 0 and 1, got 1.5"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::ProviderUnavailable, "score store offline");
        assert_eq!(
            format!("{}", err),
            "[PROVIDER_UNAVAILABLE] score store offline"
        );
    }

    #[test]
    fn validation_error_converts_to_domain_error() {
        let err: DomainError = ValidationError::empty_field("criterion_id").into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.message.contains("criterion_id"));
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::InvalidMatrix), "INVALID_MATRIX");
        assert_eq!(
            format!("{}", ErrorCode::RunAlreadyInProgress),
            "RUN_ALREADY_IN_PROGRESS"
        );
    }
}
