//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.
//!
//! All handlers that observe or change run state share one [`SharedLedger`];
//! its lock is the single guard over the run flag and history.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::computation::RunLedger;

pub mod computation;
pub mod criteria;
pub mod reports;

#[cfg(test)]
pub(crate) mod test_support;

/// Run ledger shared between handlers.
pub type SharedLedger = Arc<RwLock<RunLedger>>;

/// Creates an empty ledger retaining `history_capacity` entries.
pub fn new_shared_ledger(history_capacity: usize) -> SharedLedger {
    Arc::new(RwLock::new(RunLedger::new(history_capacity)))
}

pub use computation::{
    GetStatusHandler, GetStatusQuery, RunStatusView, StartRunCommand, StartRunHandler,
    StartRunResult, DEFAULT_SNAPSHOT_ATTEMPTS,
};
pub use criteria::{
    CheckConsistencyHandler, CheckConsistencyQuery, ConsistencyReport, ListCriteriaHandler,
    ListCriteriaQuery, RecomputeWeightsCommand, RecomputeWeightsHandler, RecomputeWeightsResult,
};
pub use reports::{
    DecisionGroup, DecisionReport, GetDecisionReportHandler, GetDecisionReportQuery,
    GetRankingReportHandler, GetRankingReportQuery, RankingReport, RankingRow,
};
