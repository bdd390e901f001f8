//! Consistency Checker - eigenvalue estimate, CI, RI and CR.

use serde::{Deserialize, Serialize};

use super::{AhpError, ComparisonMatrix, PriorityVector};

/// Conventional acceptability bound on the consistency ratio.
pub const CONSISTENCY_THRESHOLD: f64 = 0.1;

/// Saaty random index for matrix sizes 1..=15 (index 0 is n = 1).
pub const RANDOM_INDEX: [f64; 15] = [
    0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49, 1.51, 1.48, 1.56, 1.57, 1.59,
];

/// Result of a consistency check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyResult {
    /// Principal eigenvalue estimate (λmax).
    pub lambda_max: f64,
    /// Consistency index.
    pub ci: f64,
    /// Random index for this matrix size.
    pub ri: f64,
    /// Consistency ratio, CI / RI.
    pub cr: f64,
}

impl ConsistencyResult {
    /// True when CR does not exceed the given threshold.
    pub fn is_acceptable(&self, threshold: f64) -> bool {
        self.cr <= threshold
    }
}

/// Consistency analysis for comparison matrices.
pub struct ConsistencyChecker;

impl ConsistencyChecker {
    /// Looks up the random index for a matrix of size `n`.
    pub fn random_index(n: usize) -> Result<f64, AhpError> {
        if n == 0 || n > RANDOM_INDEX.len() {
            return Err(AhpError::UnsupportedMatrixSize {
                size: n,
                max: RANDOM_INDEX.len(),
            });
        }
        Ok(RANDOM_INDEX[n - 1])
    }

    /// Computes λmax, CI, RI and CR for a matrix and its derived weights.
    ///
    /// # Algorithm
    /// - λmax = mean of `(M·w)[i] / w[i]`
    /// - CI = (λmax − n) / (n − 1) for n > 2, else 0
    /// - CR = CI / RI, or 0 when RI = 0
    ///
    /// Floating error can put λmax marginally below n for perfectly
    /// consistent matrices; CI is floored at 0 so CR never goes negative.
    pub fn check(
        matrix: &ComparisonMatrix,
        weights: &PriorityVector,
    ) -> Result<ConsistencyResult, AhpError> {
        let n = matrix.size();
        let ri = Self::random_index(n)?;

        if weights.len() != n {
            return Err(AhpError::computation_failed(format!(
                "priority vector has {} weights for a {}x{} matrix",
                weights.len(),
                n,
                n
            )));
        }

        let w = weights.weights();
        if w.iter().any(|x| !x.is_finite() || *x <= 0.0) {
            return Err(AhpError::computation_failed(
                "priority vector has a non-positive weight",
            ));
        }

        let product = matrix.multiply(w);
        let lambda_max = product
            .iter()
            .zip(w)
            .map(|(mw, wi)| mw / wi)
            .sum::<f64>()
            / n as f64;

        let ci = if n > 2 {
            ((lambda_max - n as f64) / (n as f64 - 1.0)).max(0.0)
        } else {
            0.0
        };

        let cr = if ri > 0.0 { ci / ri } else { 0.0 };

        Ok(ConsistencyResult {
            lambda_max,
            ci,
            ri,
            cr,
        })
    }
}
