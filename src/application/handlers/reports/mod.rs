//! Report query handlers.
//!
//! Read-only views over the latest completed run.

mod decision_report;
mod ranking_report;

pub use decision_report::{
    DecisionGroup, DecisionReport, GetDecisionReportHandler, GetDecisionReportQuery,
};
pub use ranking_report::{GetRankingReportHandler, GetRankingReportQuery, RankingReport, RankingRow};
