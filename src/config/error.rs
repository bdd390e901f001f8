//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address '{0}'")]
    InvalidAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("max_iterations must be at least 1")]
    InvalidMaxIterations,

    #[error("convergence_tolerance must be a positive finite number")]
    InvalidTolerance,

    #[error("cr_threshold must be in (0, 1], got {0}")]
    InvalidCrThreshold(f64),

    #[error("history_capacity must be at least 1")]
    InvalidHistoryCapacity,

    #[error("snapshot_attempts must be at least 1")]
    InvalidSnapshotAttempts,

    #[error("Invalid category bands: {0}")]
    InvalidCategories(String),
}
