//! HTTP handlers for the ranking engine endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::de::DeserializeOwned;

use crate::application::{
    new_shared_ledger, CheckConsistencyHandler, CheckConsistencyQuery, GetDecisionReportHandler,
    GetDecisionReportQuery, GetRankingReportHandler, GetRankingReportQuery, GetStatusHandler,
    GetStatusQuery, ListCriteriaHandler, ListCriteriaQuery, RecomputeWeightsCommand,
    RecomputeWeightsHandler, SharedLedger, StartRunCommand, StartRunHandler,
    DEFAULT_SNAPSHOT_ATTEMPTS,
};
use crate::domain::ahp::AhpError;
use crate::domain::computation::{PipelineSettings, RunStatus, DEFAULT_HISTORY_CAPACITY};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{CategoryThresholdProvider, CriteriaMatrixProvider, EntityScoreProvider};

use super::dto::{
    ConsistencyReportResponse, CriterionResponse, DecisionReportResponse, ErrorResponse,
    MatrixRequest, RankingReportResponse, RecomputeWeightsResponse, StartRunRequest,
    StartRunResponse, StatusResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned for each request; the ledger and providers are shared.
#[derive(Clone)]
pub struct RankingAppState {
    pub ledger: SharedLedger,
    pub criteria: Arc<dyn CriteriaMatrixProvider>,
    pub scores: Arc<dyn EntityScoreProvider>,
    pub thresholds: Arc<dyn CategoryThresholdProvider>,
    pub settings: PipelineSettings,
    pub snapshot_attempts: u32,
    pub run_in_background: bool,
}

impl RankingAppState {
    /// Creates state with default engine settings and an empty ledger.
    pub fn new(
        criteria: Arc<dyn CriteriaMatrixProvider>,
        scores: Arc<dyn EntityScoreProvider>,
        thresholds: Arc<dyn CategoryThresholdProvider>,
    ) -> Self {
        Self {
            ledger: new_shared_ledger(DEFAULT_HISTORY_CAPACITY),
            criteria,
            scores,
            thresholds,
            settings: PipelineSettings::default(),
            snapshot_attempts: DEFAULT_SNAPSHOT_ATTEMPTS,
            run_in_background: false,
        }
    }

    pub fn with_ledger(mut self, ledger: SharedLedger) -> Self {
        self.ledger = ledger;
        self
    }

    pub fn with_settings(mut self, settings: PipelineSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_snapshot_attempts(mut self, attempts: u32) -> Self {
        self.snapshot_attempts = attempts;
        self
    }

    pub fn in_background(mut self, enabled: bool) -> Self {
        self.run_in_background = enabled;
        self
    }

    /// Create handlers on demand from the shared state.
    pub fn start_run_handler(&self) -> StartRunHandler {
        StartRunHandler::new(
            self.ledger.clone(),
            self.criteria.clone(),
            self.scores.clone(),
            self.thresholds.clone(),
        )
        .with_settings(self.settings)
        .with_snapshot_attempts(self.snapshot_attempts)
        .in_background(self.run_in_background)
    }

    pub fn get_status_handler(&self) -> GetStatusHandler {
        GetStatusHandler::new(self.ledger.clone())
    }

    pub fn check_consistency_handler(&self) -> CheckConsistencyHandler {
        CheckConsistencyHandler::new(self.criteria.clone(), self.settings)
    }

    pub fn recompute_weights_handler(&self) -> RecomputeWeightsHandler {
        RecomputeWeightsHandler::new(self.ledger.clone(), self.criteria.clone(), self.settings)
    }

    pub fn list_criteria_handler(&self) -> ListCriteriaHandler {
        ListCriteriaHandler::new(self.criteria.clone())
    }

    pub fn ranking_report_handler(&self) -> GetRankingReportHandler {
        GetRankingReportHandler::new(self.ledger.clone())
    }

    pub fn decision_report_handler(&self) -> GetDecisionReportHandler {
        GetDecisionReportHandler::new(self.ledger.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Computation Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/computation/status - Current status, last result and history
pub async fn get_status(State(state): State<RankingAppState>) -> impl IntoResponse {
    let view = state.get_status_handler().handle(GetStatusQuery).await;
    Json(StatusResponse::from(view))
}

/// POST /api/computation/runs - Start a ranking run
///
/// 200 with the outcome for inline runs, 202 for background runs and 409
/// when a run is already in progress.
pub async fn start_run(
    State(state): State<RankingAppState>,
    body: Bytes,
) -> Result<impl IntoResponse, RankingApiError> {
    let request: StartRunRequest = optional_json(&body)?.unwrap_or_default();
    let cmd = StartRunCommand {
        run_in_background: request.background,
    };

    let result = state.start_run_handler().handle(cmd).await?;

    let status = match (result.accepted, result.status) {
        (false, _) => StatusCode::CONFLICT,
        (true, RunStatus::Running) => StatusCode::ACCEPTED,
        (true, _) => StatusCode::OK,
    };

    Ok((status, Json(StartRunResponse::from(result))))
}

// ════════════════════════════════════════════════════════════════════════════════
// Criteria Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/criteria - Criteria with their last persisted weights
pub async fn list_criteria(
    State(state): State<RankingAppState>,
) -> Result<impl IntoResponse, RankingApiError> {
    let criteria = state.list_criteria_handler().handle(ListCriteriaQuery).await?;
    let response: Vec<CriterionResponse> =
        criteria.into_iter().map(CriterionResponse::from).collect();
    Ok(Json(response))
}

/// POST /api/criteria/consistency - Consistency check
///
/// Body is an optional candidate matrix; empty body checks the current one.
pub async fn check_consistency(
    State(state): State<RankingAppState>,
    body: Bytes,
) -> Result<impl IntoResponse, RankingApiError> {
    let query = CheckConsistencyQuery {
        judgments: optional_json::<MatrixRequest>(&body)?.map(Into::into),
    };

    let report = state.check_consistency_handler().handle(query).await?;

    Ok(Json(ConsistencyReportResponse::from(report)))
}

/// POST /api/criteria/weights - Recompute and persist criterion weights
pub async fn recompute_weights(
    State(state): State<RankingAppState>,
    body: Bytes,
) -> Result<impl IntoResponse, RankingApiError> {
    let cmd = RecomputeWeightsCommand {
        judgments: optional_json::<MatrixRequest>(&body)?.map(Into::into),
    };

    let result = state.recompute_weights_handler().handle(cmd).await?;

    Ok(Json(RecomputeWeightsResponse::from(result)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Report Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/reports/ranking - Ranked entities of the latest completed run
pub async fn get_ranking_report(State(state): State<RankingAppState>) -> impl IntoResponse {
    let report = state
        .ranking_report_handler()
        .handle(GetRankingReportQuery)
        .await;
    Json(RankingReportResponse::from(report))
}

/// GET /api/reports/decisions - Ranked entities grouped by decision category
pub async fn get_decision_report(State(state): State<RankingAppState>) -> impl IntoResponse {
    let report = state
        .decision_report_handler()
        .handle(GetDecisionReportQuery)
        .await;
    Json(DecisionReportResponse::from(report))
}

/// Parses a JSON body that may be absent.
fn optional_json<T: DeserializeOwned>(body: &Bytes) -> Result<Option<T>, RankingApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| RankingApiError::InvalidBody(e.to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts engine and port errors to HTTP responses.
#[derive(Debug)]
pub enum RankingApiError {
    Engine(AhpError),
    Domain(DomainError),
    InvalidBody(String),
}

impl From<AhpError> for RankingApiError {
    fn from(err: AhpError) -> Self {
        Self::Engine(err)
    }
}

impl From<DomainError> for RankingApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl IntoResponse for RankingApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match &self {
            RankingApiError::Engine(err) => {
                let status = match err {
                    AhpError::RunAlreadyInProgress => StatusCode::CONFLICT,
                    e if e.is_input_error() => StatusCode::UNPROCESSABLE_ENTITY,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, ErrorResponse::from(err))
            }
            RankingApiError::Domain(err) => {
                let status = match err.code {
                    ErrorCode::NotFound => StatusCode::NOT_FOUND,
                    ErrorCode::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, ErrorResponse::new(err.code.to_string(), err.message.clone()))
            }
            RankingApiError::InvalidBody(reason) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(
                    ErrorCode::ValidationFailed.to_string(),
                    format!("Invalid request body: {}", reason),
                ),
            ),
        };

        (status, Json(body)).into_response()
    }
}
