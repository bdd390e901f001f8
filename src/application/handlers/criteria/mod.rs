//! Criteria handlers.
//!
//! ## Commands
//! - Recompute and persist criterion weights
//!
//! ## Queries
//! - Consistency check for a candidate or current matrix
//! - List criteria

mod check_consistency;
mod list_criteria;
mod recompute_weights;

// Commands
pub use recompute_weights::{
    RecomputeWeightsCommand, RecomputeWeightsHandler, RecomputeWeightsResult,
};

// Queries
pub use check_consistency::{CheckConsistencyHandler, CheckConsistencyQuery, ConsistencyReport};
pub use list_criteria::{ListCriteriaHandler, ListCriteriaQuery};
