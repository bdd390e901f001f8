//! Computation command and query handlers.
//!
//! ## Commands
//! - Start a single-flight ranking run
//!
//! ## Queries
//! - Current status, last result and run history

mod get_status;
mod start_run;

pub use get_status::{GetStatusHandler, GetStatusQuery, RunStatusView};
pub use start_run::{StartRunCommand, StartRunHandler, StartRunResult, DEFAULT_SNAPSHOT_ATTEMPTS};
