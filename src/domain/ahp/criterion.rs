//! Criterion entity as seen by the engine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::CriterionId;

/// A ranking criterion.
///
/// Created and edited by the criteria collaborator; `weight` is only ever
/// overwritten with a derived priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: CriterionId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Last persisted priority weight (0-1).
    #[serde(default)]
    pub weight: f64,
}

impl Criterion {
    pub fn new(id: CriterionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            weight: 0.0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
