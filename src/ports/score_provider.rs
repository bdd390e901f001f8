//! Entity score provider port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::ranking::EntityScores;

/// Supplies normalized per-criterion scores for every entity to rank.
#[async_trait]
pub trait EntityScoreProvider: Send + Sync {
    /// Scores in the 0-1 range, keyed by criterion id.
    async fn current_scores(&self) -> Result<Vec<EntityScores>, DomainError>;
}
