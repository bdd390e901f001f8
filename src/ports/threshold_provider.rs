//! Category threshold provider port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::ranking::CategoryBands;

/// Supplies the ordered category bands used to classify ranked entities.
#[async_trait]
pub trait CategoryThresholdProvider: Send + Sync {
    async fn current_bands(&self) -> Result<CategoryBands, DomainError>;
}
