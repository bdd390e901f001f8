//! Pairwise comparison matrix and its structural validator.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::AhpError;
use crate::domain::foundation::CriterionId;

/// Tolerance for `a[i][i] = 1` and `a[i][j] * a[j][i] = 1`.
pub const RECIPROCAL_TOLERANCE: f64 = 1e-6;

/// Raw, unvalidated pairwise judgments as supplied by a collaborator.
///
/// `values[i][j]` is the judged importance of `criterion_ids[i]` relative
/// to `criterion_ids[j]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairwiseJudgments {
    pub criterion_ids: Vec<CriterionId>,
    pub values: Vec<Vec<f64>>,
}

impl PairwiseJudgments {
    pub fn new(criterion_ids: Vec<CriterionId>, values: Vec<Vec<f64>>) -> Self {
        Self {
            criterion_ids,
            values,
        }
    }
}

/// Structural checks for comparison matrices.
pub struct MatrixValidator;

impl MatrixValidator {
    /// Validates a raw matrix against the criterion ordering.
    ///
    /// Fails on the first violation found, scanning cells in row-major order.
    /// A reciprocal pair is reported at its lower-triangle cell, i.e. once
    /// both of its entries have been scanned.
    pub fn validate(values: &[Vec<f64>], criterion_ids: &[CriterionId]) -> Result<(), AhpError> {
        let n = values.len();
        if n == 0 {
            return Err(AhpError::invalid_matrix("matrix must have at least one row"));
        }

        if criterion_ids.len() != n {
            return Err(AhpError::invalid_matrix(format!(
                "matrix has {} rows but {} criterion identifiers were supplied",
                n,
                criterion_ids.len()
            )));
        }

        let mut seen = HashSet::with_capacity(n);
        for id in criterion_ids {
            if !seen.insert(id) {
                return Err(AhpError::invalid_matrix(format!(
                    "criterion '{}' appears more than once",
                    id
                )));
            }
        }

        for (i, row) in values.iter().enumerate() {
            if row.len() != n {
                return Err(AhpError::invalid_matrix(format!(
                    "row {} has {} entries, expected {} (matrix must be square)",
                    i,
                    row.len(),
                    n
                )));
            }
        }

        for i in 0..n {
            for j in 0..n {
                let value = values[i][j];

                if !value.is_finite() || value <= 0.0 {
                    return Err(AhpError::invalid_cell(
                        i,
                        j,
                        format!("a[{}][{}] = {} must be finite and positive", i, j, value),
                    ));
                }

                if i == j {
                    if (value - 1.0).abs() > RECIPROCAL_TOLERANCE {
                        return Err(AhpError::invalid_cell(
                            i,
                            j,
                            format!("diagonal entry a[{}][{}] = {} must equal 1", i, j, value),
                        ));
                    }
                } else if j < i {
                    let product = value * values[j][i];
                    if (product - 1.0).abs() > RECIPROCAL_TOLERANCE {
                        return Err(AhpError::invalid_cell(
                            i,
                            j,
                            format!(
                                "a[{}][{}] * a[{}][{}] = {} must equal 1 (reciprocal)",
                                i, j, j, i, product
                            ),
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}

/// A validated positive reciprocal comparison matrix.
///
/// Can only be obtained through validation, so downstream components may
/// rely on squareness, positivity and reciprocity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PairwiseJudgments", into = "PairwiseJudgments")]
pub struct ComparisonMatrix {
    criterion_ids: Vec<CriterionId>,
    values: Vec<Vec<f64>>,
}

impl ComparisonMatrix {
    /// Validates and wraps raw values.
    pub fn try_new(
        criterion_ids: Vec<CriterionId>,
        values: Vec<Vec<f64>>,
    ) -> Result<Self, AhpError> {
        MatrixValidator::validate(&values, &criterion_ids)?;
        Ok(Self {
            criterion_ids,
            values,
        })
    }

    /// Creates a builder that fills reciprocals automatically.
    pub fn builder() -> ComparisonMatrixBuilder {
        ComparisonMatrixBuilder::default()
    }

    /// Number of criteria (n).
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Criterion identifiers in matrix index order.
    pub fn criterion_ids(&self) -> &[CriterionId] {
        &self.criterion_ids
    }

    /// Returns entry `a[row][col]`.
    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }

    /// Returns the rows of the matrix.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Computes `M · v`.
    pub fn multiply(&self, vector: &[f64]) -> Vec<f64> {
        self.values
            .iter()
            .map(|row| row.iter().zip(vector).map(|(a, v)| a * v).sum())
            .collect()
    }
}

impl TryFrom<PairwiseJudgments> for ComparisonMatrix {
    type Error = AhpError;

    fn try_from(raw: PairwiseJudgments) -> Result<Self, Self::Error> {
        Self::try_new(raw.criterion_ids, raw.values)
    }
}

impl From<ComparisonMatrix> for PairwiseJudgments {
    fn from(matrix: ComparisonMatrix) -> Self {
        PairwiseJudgments::new(matrix.criterion_ids, matrix.values)
    }
}

/// Builder for comparison matrices from individual judgments.
///
/// Unjudged pairs default to 1 (equal importance).
#[derive(Debug, Default)]
pub struct ComparisonMatrixBuilder {
    criterion_ids: Vec<String>,
    judgments: Vec<(String, String, f64)>,
}

impl ComparisonMatrixBuilder {
    /// Sets the criterion ordering.
    pub fn criteria<S: Into<String>>(mut self, ids: Vec<S>) -> Self {
        self.criterion_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Records that `more` is `intensity` times as important as `less`.
    pub fn judgment(
        mut self,
        more: impl Into<String>,
        less: impl Into<String>,
        intensity: f64,
    ) -> Self {
        self.judgments.push((more.into(), less.into(), intensity));
        self
    }

    /// Builds and validates the matrix.
    pub fn build(self) -> Result<ComparisonMatrix, AhpError> {
        let ids = self
            .criterion_ids
            .into_iter()
            .map(CriterionId::new)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AhpError::invalid_matrix(e.to_string()))?;

        let n = ids.len();
        let mut values = vec![vec![1.0; n]; n];

        for (more, less, intensity) in self.judgments {
            let i = index_of(&ids, &more)?;
            let j = index_of(&ids, &less)?;
            values[i][j] = intensity;
            values[j][i] = 1.0 / intensity;
        }

        ComparisonMatrix::try_new(ids, values)
    }
}

fn index_of(ids: &[CriterionId], id: &str) -> Result<usize, AhpError> {
    ids.iter()
        .position(|c| c.as_str() == id)
        .ok_or_else(|| AhpError::invalid_matrix(format!("unknown criterion '{}'", id)))
}
