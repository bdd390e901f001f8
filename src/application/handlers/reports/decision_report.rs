//! GetDecisionReportHandler - Ranked entities grouped by decision category.

use crate::application::handlers::SharedLedger;
use crate::domain::computation::ComputationRun;
use crate::domain::foundation::{RunId, Timestamp};

use super::RankingRow;

/// Query for the decision report.
#[derive(Debug, Clone, Default)]
pub struct GetDecisionReportQuery;

/// Entities sharing a decision category.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionGroup {
    pub category: String,
    /// Recommendation text configured for the category.
    pub description: String,
    /// Presentation order; may be empty.
    pub rows: Vec<RankingRow>,
}

/// Decision report of the latest completed run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecisionReport {
    pub run_id: Option<RunId>,
    pub generated_at: Option<Timestamp>,
    /// One group per category in band order, fallback last.
    pub groups: Vec<DecisionGroup>,
}

impl From<&ComputationRun> for DecisionReport {
    fn from(run: &ComputationRun) -> Self {
        let groups = match run.result() {
            Some(result) => result
                .bands
                .names()
                .into_iter()
                .map(|name| DecisionGroup {
                    category: name.to_string(),
                    description: result.bands.description_of(name).to_string(),
                    rows: result
                        .composite
                        .iter()
                        .filter(|entity| entity.category == name)
                        .map(RankingRow::from)
                        .collect(),
                })
                .collect(),
            None => Vec::new(),
        };

        Self {
            run_id: Some(run.id()),
            generated_at: Some(run.completed_at()),
            groups,
        }
    }
}

/// Handler for the decision report.
pub struct GetDecisionReportHandler {
    ledger: SharedLedger,
}

impl GetDecisionReportHandler {
    pub fn new(ledger: SharedLedger) -> Self {
        Self { ledger }
    }

    pub async fn handle(&self, _query: GetDecisionReportQuery) -> DecisionReport {
        self.ledger
            .read()
            .await
            .last_completed()
            .map(DecisionReport::from)
            .unwrap_or_default()
    }
}
