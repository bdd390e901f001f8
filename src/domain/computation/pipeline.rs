//! Ranking pipeline - sequences the pure AHP components for one run.
//!
//! validate → derive weights → check consistency → score → rank.
//! Takes a snapshot of inputs and never touches shared state.

use tracing::debug;

use super::{RunResult, RunWarning};
use crate::domain::ahp::{
    AhpError, ComparisonMatrix, ConsistencyChecker, ConsistencyResult, PairwiseJudgments,
    PriorityVector, WeightDeriver, CONSISTENCY_THRESHOLD, DEFAULT_CONVERGENCE_TOLERANCE,
    DEFAULT_MAX_ITERATIONS,
};
use crate::domain::ranking::{CategoryBands, CompositeScorer, EntityScores, Ranker};

/// Numerical and policy knobs for a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineSettings {
    pub max_iterations: usize,
    pub convergence_tolerance: f64,
    pub cr_threshold: f64,
    /// Treat CR above the threshold as a failure instead of a warning.
    pub fail_on_inconsistency: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            convergence_tolerance: DEFAULT_CONVERGENCE_TOLERANCE,
            cr_threshold: CONSISTENCY_THRESHOLD,
            fail_on_inconsistency: false,
        }
    }
}

impl PipelineSettings {
    pub fn deriver(&self) -> WeightDeriver {
        WeightDeriver::new(self.max_iterations, self.convergence_tolerance)
    }
}

/// Inputs captured at run start.
#[derive(Debug, Clone)]
pub struct RunSnapshot {
    pub judgments: PairwiseJudgments,
    pub entities: Vec<EntityScores>,
    pub bands: CategoryBands,
}

/// Weights plus their consistency assessment.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightAnalysis {
    pub priority_vector: PriorityVector,
    pub consistency: ConsistencyResult,
    pub warnings: Vec<RunWarning>,
}

impl WeightAnalysis {
    pub fn is_acceptable(&self, threshold: f64) -> bool {
        self.consistency.is_acceptable(threshold)
    }
}

/// Stateless run pipeline.
pub struct RankingPipeline;

impl RankingPipeline {
    /// Validates judgments, derives weights and checks consistency.
    ///
    /// # Errors
    /// - `InvalidMatrix` / `UnsupportedMatrixSize` for bad input
    /// - `InconsistentJudgments` if CR exceeds the threshold and
    ///   `fail_on_inconsistency` is set
    pub fn analyze_weights(
        judgments: PairwiseJudgments,
        settings: &PipelineSettings,
    ) -> Result<WeightAnalysis, AhpError> {
        let matrix = ComparisonMatrix::try_from(judgments)?;
        let priority_vector = settings.deriver().derive(&matrix);
        let consistency = ConsistencyChecker::check(&matrix, &priority_vector)?;

        debug!(
            criteria = matrix.size(),
            iterations = priority_vector.iterations(),
            converged = priority_vector.converged(),
            cr = consistency.cr,
            "Weights derived"
        );

        let mut warnings = Vec::new();
        if !priority_vector.converged() {
            warnings.push(RunWarning::IterationCeilingReached {
                iterations: priority_vector.iterations(),
            });
        }
        if !consistency.is_acceptable(settings.cr_threshold) {
            if settings.fail_on_inconsistency {
                return Err(AhpError::InconsistentJudgments {
                    ratio: consistency.cr,
                    threshold: settings.cr_threshold,
                });
            }
            warnings.push(RunWarning::HighInconsistency {
                ratio: consistency.cr,
                threshold: settings.cr_threshold,
            });
        }

        Ok(WeightAnalysis {
            priority_vector,
            consistency,
            warnings,
        })
    }

    /// Runs the full pipeline over a snapshot.
    pub fn run(snapshot: RunSnapshot, settings: &PipelineSettings) -> Result<RunResult, AhpError> {
        let analysis = Self::analyze_weights(snapshot.judgments, settings)?;
        let scores = CompositeScorer::score(&analysis.priority_vector, &snapshot.entities)?;
        let composite = Ranker::rank(scores, &snapshot.bands);

        Ok(RunResult {
            priority_vector: analysis.priority_vector,
            consistency: analysis.consistency,
            composite,
            warnings: analysis.warnings,
            bands: snapshot.bands,
        })
    }
}
