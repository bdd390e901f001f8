//! ListCriteriaHandler - Query handler for the active criteria.

use std::sync::Arc;

use crate::domain::ahp::Criterion;
use crate::domain::foundation::DomainError;
use crate::ports::CriteriaMatrixProvider;

/// Query to list criteria.
#[derive(Debug, Clone, Default)]
pub struct ListCriteriaQuery;

/// Handler for listing criteria with their last persisted weights.
pub struct ListCriteriaHandler {
    criteria: Arc<dyn CriteriaMatrixProvider>,
}

impl ListCriteriaHandler {
    pub fn new(criteria: Arc<dyn CriteriaMatrixProvider>) -> Self {
        Self { criteria }
    }

    pub async fn handle(&self, _query: ListCriteriaQuery) -> Result<Vec<Criterion>, DomainError> {
        self.criteria.list_criteria().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;
    use crate::domain::ahp::{ComparisonMatrix, WeightDeriver};

    #[tokio::test]
    async fn lists_criteria_with_saved_weights() {
        let criteria = Arc::new(MockCriteria::new(saaty_judgments()));
        let matrix = ComparisonMatrix::try_from(saaty_judgments()).unwrap();
        criteria
            .save_weights(&WeightDeriver::default().derive(&matrix))
            .await
            .unwrap();

        let listed = ListCriteriaHandler::new(criteria)
            .handle(ListCriteriaQuery)
            .await
            .unwrap();

        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].id.as_str(), "cost");
        assert!(listed[0].weight > listed[1].weight);
    }
}
