//! Weight Deriver - priority vector estimation by power iteration.

use serde::Serialize;

use super::ComparisonMatrix;
use crate::domain::foundation::CriterionId;

/// Default ceiling on power-iteration steps.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Default convergence bound on the maximum component-wise change.
pub const DEFAULT_CONVERGENCE_TOLERANCE: f64 = 1e-8;

/// Normalized weights index-aligned to a matrix's criterion ordering.
///
/// Only produced by [`WeightDeriver`]; serializable for output but never
/// read back, so the sum-to-one invariant cannot be bypassed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorityVector {
    criterion_ids: Vec<CriterionId>,
    weights: Vec<f64>,
    iterations: usize,
    converged: bool,
}

impl PriorityVector {
    /// Criterion identifiers in weight order.
    pub fn criterion_ids(&self) -> &[CriterionId] {
        &self.criterion_ids
    }

    /// The weights, summing to 1.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weight of a single criterion, if present.
    pub fn weight_of(&self, id: &CriterionId) -> Option<f64> {
        self.criterion_ids
            .iter()
            .position(|c| c == id)
            .map(|i| self.weights[i])
    }

    /// Iterates `(criterion, weight)` pairs in matrix order.
    pub fn iter(&self) -> impl Iterator<Item = (&CriterionId, f64)> {
        self.criterion_ids.iter().zip(self.weights.iter().copied())
    }

    /// Number of power-iteration steps performed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// False when the iteration ceiling was reached before convergence.
    pub fn converged(&self) -> bool {
        self.converged
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Derives priority vectors from validated comparison matrices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightDeriver {
    max_iterations: usize,
    tolerance: f64,
}

impl Default for WeightDeriver {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_CONVERGENCE_TOLERANCE,
        }
    }
}

impl WeightDeriver {
    pub fn new(max_iterations: usize, tolerance: f64) -> Self {
        Self {
            max_iterations,
            tolerance,
        }
    }

    /// Approximates the principal eigenvector of `matrix`.
    ///
    /// # Algorithm
    /// Start from the uniform vector, then repeatedly compute `M·w` and
    /// divide by its sum until the largest component-wise change falls
    /// below the tolerance. Reaching the iteration ceiling is not an
    /// error: the latest estimate is returned with `converged = false`.
    pub fn derive(&self, matrix: &ComparisonMatrix) -> PriorityVector {
        let n = matrix.size();
        let mut weights = vec![1.0 / n as f64; n];
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iterations {
            let mut next = matrix.multiply(&weights);
            let sum: f64 = next.iter().sum();
            for w in next.iter_mut() {
                *w /= sum;
            }

            let delta = next
                .iter()
                .zip(&weights)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max);

            weights = next;
            iterations += 1;

            if delta < self.tolerance {
                converged = true;
                break;
            }
        }

        PriorityVector {
            criterion_ids: matrix.criterion_ids().to_vec(),
            weights,
            iterations,
            converged,
        }
    }
}
