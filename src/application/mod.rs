//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::{
    // Computation
    GetStatusHandler, GetStatusQuery, RunStatusView, StartRunCommand, StartRunHandler,
    StartRunResult, DEFAULT_SNAPSHOT_ATTEMPTS,
    // Criteria
    CheckConsistencyHandler, CheckConsistencyQuery, ConsistencyReport, ListCriteriaHandler,
    ListCriteriaQuery, RecomputeWeightsCommand, RecomputeWeightsHandler, RecomputeWeightsResult,
    // Reports
    DecisionGroup, DecisionReport, GetDecisionReportHandler, GetDecisionReportQuery,
    GetRankingReportHandler, GetRankingReportQuery, RankingReport, RankingRow,
    // Shared state
    new_shared_ledger, SharedLedger,
};
