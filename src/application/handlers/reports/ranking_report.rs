//! GetRankingReportHandler - Query handler for the ranked entity table.
//!
//! Reads the latest completed run. Failed runs do not replace the report.

use crate::application::handlers::SharedLedger;
use crate::domain::computation::ComputationRun;
use crate::domain::foundation::{EntityId, RunId, Timestamp};
use crate::domain::ranking::{to_percentage, RankedEntity};

/// Query for the ranking report.
#[derive(Debug, Clone, Default)]
pub struct GetRankingReportQuery;

/// One ranked entity.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingRow {
    pub entity_id: EntityId,
    /// Display label; falls back to the entity id.
    pub label: String,
    /// Composite score, 0-1.
    pub score: f64,
    /// Composite score × 100, rounded to 2 decimals.
    pub score_percentage: f64,
    pub rank: u32,
    pub category: String,
}

impl From<&RankedEntity> for RankingRow {
    fn from(entity: &RankedEntity) -> Self {
        Self {
            entity_id: entity.entity_id.clone(),
            label: entity
                .label
                .clone()
                .unwrap_or_else(|| entity.entity_id.to_string()),
            score: entity.score,
            score_percentage: to_percentage(entity.score),
            rank: entity.rank,
            category: entity.category.clone(),
        }
    }
}

/// Ranking table of the latest completed run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankingReport {
    /// `None` until a run has completed.
    pub run_id: Option<RunId>,
    pub generated_at: Option<Timestamp>,
    pub headline_score: Option<f64>,
    /// Presentation order.
    pub rows: Vec<RankingRow>,
}

impl From<&ComputationRun> for RankingReport {
    fn from(run: &ComputationRun) -> Self {
        let result = run.result();
        Self {
            run_id: Some(run.id()),
            generated_at: Some(run.completed_at()),
            headline_score: result.and_then(|r| r.headline_score()),
            rows: result
                .map(|r| r.composite.iter().map(RankingRow::from).collect())
                .unwrap_or_default(),
        }
    }
}

/// Handler for the ranking report.
pub struct GetRankingReportHandler {
    ledger: SharedLedger,
}

impl GetRankingReportHandler {
    pub fn new(ledger: SharedLedger) -> Self {
        Self { ledger }
    }

    pub async fn handle(&self, _query: GetRankingReportQuery) -> RankingReport {
        self.ledger
            .read()
            .await
            .last_completed()
            .map(RankingReport::from)
            .unwrap_or_default()
    }
}
