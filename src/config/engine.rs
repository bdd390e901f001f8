//! Engine configuration: numerical settings and run policy.

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::DEFAULT_SNAPSHOT_ATTEMPTS;
use crate::domain::ahp::{
    CONSISTENCY_THRESHOLD, DEFAULT_CONVERGENCE_TOLERANCE, DEFAULT_MAX_ITERATIONS,
};
use crate::domain::computation::{PipelineSettings, DEFAULT_HISTORY_CAPACITY};

/// Engine configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Power iteration ceiling
    pub max_iterations: usize,

    /// Max absolute change between iterations to count as converged
    pub convergence_tolerance: f64,

    /// Consistency ratio above which judgments are flagged
    pub cr_threshold: f64,

    /// Fail runs instead of warning when CR exceeds the threshold
    pub fail_on_inconsistency: bool,

    /// Retained run history entries
    pub history_capacity: usize,

    /// Return from start requests before the run completes
    pub run_in_background: bool,

    /// Provider read attempts per run
    pub snapshot_attempts: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            convergence_tolerance: DEFAULT_CONVERGENCE_TOLERANCE,
            cr_threshold: CONSISTENCY_THRESHOLD,
            fail_on_inconsistency: false,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            run_in_background: false,
            snapshot_attempts: DEFAULT_SNAPSHOT_ATTEMPTS,
        }
    }
}

impl EngineConfig {
    pub fn to_settings(&self) -> PipelineSettings {
        PipelineSettings {
            max_iterations: self.max_iterations,
            convergence_tolerance: self.convergence_tolerance,
            cr_threshold: self.cr_threshold,
            fail_on_inconsistency: self.fail_on_inconsistency,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_iterations == 0 {
            return Err(ValidationError::InvalidMaxIterations);
        }
        if !(self.convergence_tolerance.is_finite() && self.convergence_tolerance > 0.0) {
            return Err(ValidationError::InvalidTolerance);
        }
        if !(self.cr_threshold > 0.0 && self.cr_threshold <= 1.0) {
            return Err(ValidationError::InvalidCrThreshold(self.cr_threshold));
        }
        if self.history_capacity == 0 {
            return Err(ValidationError::InvalidHistoryCapacity);
        }
        if self.snapshot_attempts == 0 {
            return Err(ValidationError::InvalidSnapshotAttempts);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_pipeline_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.to_settings(), PipelineSettings::default());
        assert_eq!(config.history_capacity, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn cr_threshold_must_be_in_unit_interval() {
        for threshold in [0.0, -0.1, 1.5, f64::NAN] {
            let config = EngineConfig {
                cr_threshold: threshold,
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(ValidationError::InvalidCrThreshold(_))),
                "threshold {} accepted",
                threshold
            );
        }
    }

    #[test]
    fn zero_counts_are_rejected() {
        let config = EngineConfig {
            history_capacity: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidHistoryCapacity)
        ));

        let config = EngineConfig {
            snapshot_attempts: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidSnapshotAttempts)
        ));

        let config = EngineConfig {
            max_iterations: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidMaxIterations)
        ));
    }

    #[test]
    fn tolerance_must_be_positive() {
        let config = EngineConfig {
            convergence_tolerance: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidTolerance)));
    }
}
