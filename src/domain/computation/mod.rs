//! Computation Module - Run lifecycle for the ranking engine.
//!
//! # Components
//!
//! - `RunStatus` - Idle → Running → Completed/Failed → Idle
//! - `ComputationRun` / `RunOutcome` - A finished run and its result or error
//! - `RunHistory` - Capped, most-recent-first run log
//! - `RunLedger` - Single-flight admission and outcome recording
//! - `RankingPipeline` - Pure sequencing of the AHP and ranking components

mod history;
mod ledger;
mod pipeline;
mod run;
mod run_status;

pub use history::{HistoryEntry, RunHistory, DEFAULT_HISTORY_CAPACITY};
pub use ledger::{RunEffect, RunEvent, RunLedger};
pub use pipeline::{PipelineSettings, RankingPipeline, RunSnapshot, WeightAnalysis};
pub use run::{ActiveRun, ComputationRun, RunOutcome, RunResult, RunWarning};
pub use run_status::RunStatus;

#[cfg(test)]
pub(crate) use run::fixtures;
