//! Axum router configuration for ranking engine endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    check_consistency, get_decision_report, get_ranking_report, get_status, list_criteria,
    recompute_weights, start_run, RankingAppState,
};

/// Computation routes.
///
/// # Routes
/// - `GET /computation/status` - Current status, last result and history
/// - `POST /computation/runs` - Start a run
pub fn computation_routes() -> Router<RankingAppState> {
    Router::new()
        .route("/computation/status", get(get_status))
        .route("/computation/runs", post(start_run))
}

/// Criteria routes.
///
/// # Routes
/// - `GET /criteria` - Criteria with persisted weights
/// - `POST /criteria/consistency` - Consistency check, never persists
/// - `POST /criteria/weights` - Recompute and persist weights
pub fn criteria_routes() -> Router<RankingAppState> {
    Router::new()
        .route("/criteria", get(list_criteria))
        .route("/criteria/consistency", post(check_consistency))
        .route("/criteria/weights", post(recompute_weights))
}

/// Report routes.
pub fn report_routes() -> Router<RankingAppState> {
    Router::new()
        .route("/reports/ranking", get(get_ranking_report))
        .route("/reports/decisions", get(get_decision_report))
}

/// Complete ranking router, suitable for nesting under `/api`.
///
/// ```ignore
/// let app = Router::new()
///     .nest("/api", ranking_router())
///     .with_state(state);
/// ```
pub fn ranking_router() -> Router<RankingAppState> {
    Router::new()
        .merge(computation_routes())
        .merge(criteria_routes())
        .merge(report_routes())
}
