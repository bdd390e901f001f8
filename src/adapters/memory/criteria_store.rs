//! In-memory criteria matrix store.
//!
//! Holds criteria and their pairwise judgments behind a single lock so
//! readers always see a matching pair. Useful for tests and the seeded
//! development server.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::ahp::{Criterion, PairwiseJudgments, PriorityVector};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::CriteriaMatrixProvider;

#[derive(Debug)]
struct CriteriaState {
    criteria: Vec<Criterion>,
    values: Vec<Vec<f64>>,
}

/// In-memory criteria and judgments.
#[derive(Debug, Clone)]
pub struct InMemoryCriteriaStore {
    state: Arc<RwLock<CriteriaState>>,
}

impl InMemoryCriteriaStore {
    /// Creates a store; `values` rows and columns follow `criteria` order.
    pub fn new(criteria: Vec<Criterion>, values: Vec<Vec<f64>>) -> Self {
        Self {
            state: Arc::new(RwLock::new(CriteriaState { criteria, values })),
        }
    }

    /// Replaces the judgment matrix, keeping the criteria.
    pub async fn replace_values(&self, values: Vec<Vec<f64>>) {
        self.state.write().await.values = values;
    }

    /// Last persisted weight per criterion, in criteria order.
    pub async fn weights(&self) -> Vec<f64> {
        self.state
            .read()
            .await
            .criteria
            .iter()
            .map(|c| c.weight)
            .collect()
    }
}

#[async_trait]
impl CriteriaMatrixProvider for InMemoryCriteriaStore {
    async fn current_judgments(&self) -> Result<PairwiseJudgments, DomainError> {
        let state = self.state.read().await;
        Ok(PairwiseJudgments::new(
            state.criteria.iter().map(|c| c.id.clone()).collect(),
            state.values.clone(),
        ))
    }

    async fn list_criteria(&self) -> Result<Vec<Criterion>, DomainError> {
        Ok(self.state.read().await.criteria.clone())
    }

    async fn save_weights(&self, weights: &PriorityVector) -> Result<(), DomainError> {
        let mut state = self.state.write().await;

        let mut positions = Vec::with_capacity(weights.len());
        for (id, weight) in weights.iter() {
            let index = state
                .criteria
                .iter()
                .position(|c| &c.id == id)
                .ok_or_else(|| {
                    DomainError::new(ErrorCode::NotFound, format!("Criterion not found: {}", id))
                })?;
            positions.push((index, weight));
        }

        for (index, weight) in positions {
            state.criteria[index].weight = weight;
        }
        Ok(())
    }
}
