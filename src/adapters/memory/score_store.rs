//! In-memory entity score store.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, EntityId};
use crate::domain::ranking::EntityScores;
use crate::ports::EntityScoreProvider;

/// In-memory normalized scores, one record per entity.
#[derive(Debug, Clone, Default)]
pub struct InMemoryScoreStore {
    entities: Arc<RwLock<Vec<EntityScores>>>,
}

impl InMemoryScoreStore {
    pub fn new(entities: Vec<EntityScores>) -> Self {
        Self {
            entities: Arc::new(RwLock::new(entities)),
        }
    }

    /// Inserts or replaces the scores of one entity.
    pub async fn upsert(&self, scores: EntityScores) {
        let mut entities = self.entities.write().await;
        match entities
            .iter_mut()
            .find(|e| e.entity_id == scores.entity_id)
        {
            Some(existing) => *existing = scores,
            None => entities.push(scores),
        }
    }

    pub async fn remove(&self, entity_id: &EntityId) -> bool {
        let mut entities = self.entities.write().await;
        let before = entities.len();
        entities.retain(|e| &e.entity_id != entity_id);
        entities.len() != before
    }

    pub async fn len(&self) -> usize {
        self.entities.read().await.len()
    }
}

#[async_trait]
impl EntityScoreProvider for InMemoryScoreStore {
    async fn current_scores(&self) -> Result<Vec<EntityScores>, DomainError> {
        Ok(self.entities.read().await.clone())
    }
}
