//! HTTP adapter for the ranking engine.
//!
//! - `GET /api/computation/status` - Engine status and run history
//! - `POST /api/computation/runs` - Start a computation run
//! - `GET /api/criteria` - Criteria with persisted weights
//! - `POST /api/criteria/consistency` - Consistency check
//! - `POST /api/criteria/weights` - Recompute criterion weights
//! - `GET /api/reports/ranking` - Ranking table
//! - `GET /api/reports/decisions` - Entities grouped by category

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{RankingApiError, RankingAppState};
pub use routes::{computation_routes, criteria_routes, ranking_router, report_routes};
