//! Criteria matrix provider port.
//!
//! Supplies the active criteria and their pairwise judgments, and stores
//! the weights derived from them.

use async_trait::async_trait;

use crate::domain::ahp::{Criterion, PairwiseJudgments, PriorityVector};
use crate::domain::foundation::DomainError;

/// Source of truth for criteria and pairwise judgments.
#[async_trait]
pub trait CriteriaMatrixProvider: Send + Sync {
    /// Current judgments, rows and columns in `criterion_ids` order.
    ///
    /// Values are returned as stored; validation happens in the engine.
    async fn current_judgments(&self) -> Result<PairwiseJudgments, DomainError>;

    /// Active criteria with their last persisted weight.
    async fn list_criteria(&self) -> Result<Vec<Criterion>, DomainError>;

    /// Persists derived weights onto the matching criteria.
    ///
    /// Only called with weights from a successful derivation.
    async fn save_weights(&self, weights: &PriorityVector) -> Result<(), DomainError>;
}
