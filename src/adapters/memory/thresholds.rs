//! Fixed category thresholds from configuration.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::ranking::CategoryBands;
use crate::ports::CategoryThresholdProvider;

/// Serves the bands it was built with.
#[derive(Debug, Clone, Default)]
pub struct StaticCategoryThresholds {
    bands: CategoryBands,
}

impl StaticCategoryThresholds {
    pub fn new(bands: CategoryBands) -> Self {
        Self { bands }
    }
}

#[async_trait]
impl CategoryThresholdProvider for StaticCategoryThresholds {
    async fn current_bands(&self) -> Result<CategoryBands, DomainError> {
        Ok(self.bands.clone())
    }
}
