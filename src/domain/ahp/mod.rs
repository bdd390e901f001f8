//! AHP Module - Pairwise comparison analysis.
//!
//! Pure domain services that turn a pairwise judgment matrix into priority
//! weights and judge the logical consistency of those judgments.
//!
//! # Components
//!
//! - `MatrixValidator` - Structural legality of a comparison matrix
//! - `WeightDeriver` - Priority vector by power iteration
//! - `ConsistencyChecker` - λmax, CI, RI and CR
//! - `AhpError` - Error taxonomy shared by the whole engine

mod consistency;
mod criterion;
mod errors;
mod matrix;
mod priority;

pub use consistency::{ConsistencyChecker, ConsistencyResult, CONSISTENCY_THRESHOLD, RANDOM_INDEX};
pub use criterion::Criterion;
pub use errors::AhpError;
pub use matrix::{
    ComparisonMatrix, ComparisonMatrixBuilder, MatrixValidator, PairwiseJudgments,
    RECIPROCAL_TOLERANCE,
};
pub use priority::{
    PriorityVector, WeightDeriver, DEFAULT_CONVERGENCE_TOLERANCE, DEFAULT_MAX_ITERATIONS,
};
