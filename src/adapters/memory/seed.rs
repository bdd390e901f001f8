//! YAML seed data for the in-memory providers.
//!
//! ```yaml
//! criteria:
//!   - id: quality
//!     name: Work quality
//! judgments:
//!   - [1.0]
//! entities:
//!   - entity_id: emp-001
//!     label: Alice
//!     scores:
//!       quality: 0.9
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

use super::{InMemoryCriteriaStore, InMemoryScoreStore};
use crate::domain::ahp::Criterion;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::ranking::EntityScores;

/// Initial criteria, judgments and entity scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    pub criteria: Vec<Criterion>,
    /// Judgment rows in `criteria` order.
    #[serde(default)]
    pub judgments: Vec<Vec<f64>>,
    #[serde(default)]
    pub entities: Vec<EntityScores>,
}

impl SeedData {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DomainError> {
        serde_yaml::from_str(yaml).map_err(|e| {
            DomainError::new(ErrorCode::ValidationFailed, format!("Invalid seed data: {}", e))
        })
    }

    /// Reads seed data from a YAML file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).await.map_err(|e| {
            DomainError::new(
                ErrorCode::ProviderUnavailable,
                format!("Failed to read seed file {}: {}", path.display(), e),
            )
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Builds the in-memory stores.
    ///
    /// Judgments are not validated here; the engine reports bad matrices
    /// on the first run or consistency check.
    pub fn into_stores(self) -> (InMemoryCriteriaStore, InMemoryScoreStore) {
        (
            InMemoryCriteriaStore::new(self.criteria, self.judgments),
            InMemoryScoreStore::new(self.entities),
        )
    }
}
