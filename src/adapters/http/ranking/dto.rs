//! HTTP DTOs (Data Transfer Objects) for the ranking engine endpoints.
//!
//! These types define the JSON request/response structure of the API.
//! They serve as the boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};

use crate::application::{
    ConsistencyReport, DecisionGroup, DecisionReport, RankingReport, RankingRow,
    RecomputeWeightsResult, RunStatusView, StartRunResult,
};
use crate::domain::ahp::{AhpError, ConsistencyResult, Criterion, PairwiseJudgments, PriorityVector};
use crate::domain::computation::{HistoryEntry, RunResult, RunStatus, RunWarning};
use crate::domain::foundation::CriterionId;
use crate::domain::ranking::{to_percentage, RankedEntity};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Optional body for starting a run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartRunRequest {
    /// Return immediately and compute in the background.
    #[serde(default)]
    pub background: Option<bool>,
}

/// Candidate pairwise judgments.
#[derive(Debug, Clone, Deserialize)]
pub struct MatrixRequest {
    /// Row/column order of `matrix`.
    pub criterion_ids: Vec<CriterionId>,
    pub matrix: Vec<Vec<f64>>,
}

impl From<MatrixRequest> for PairwiseJudgments {
    fn from(request: MatrixRequest) -> Self {
        PairwiseJudgments::new(request.criterion_ids, request.matrix)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Shared Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&AhpError> for ErrorResponse {
    fn from(err: &AhpError) -> Self {
        Self::new(err.code().to_string(), err.to_string())
    }
}

/// One criterion weight.
#[derive(Debug, Clone, Serialize)]
pub struct WeightResponse {
    pub criterion_id: String,
    pub weight: f64,
}

fn weights(vector: &PriorityVector) -> Vec<WeightResponse> {
    vector
        .iter()
        .map(|(id, weight)| WeightResponse {
            criterion_id: id.to_string(),
            weight,
        })
        .collect()
}

/// λmax, CI, RI and CR.
#[derive(Debug, Clone, Serialize)]
pub struct ConsistencyResponse {
    pub lambda_max: f64,
    pub ci: f64,
    pub ri: f64,
    pub cr: f64,
}

impl From<&ConsistencyResult> for ConsistencyResponse {
    fn from(result: &ConsistencyResult) -> Self {
        Self {
            lambda_max: result.lambda_max,
            ci: result.ci,
            ri: result.ri,
            cr: result.cr,
        }
    }
}

/// A warning with its human-readable message.
#[derive(Debug, Clone, Serialize)]
pub struct WarningResponse {
    #[serde(flatten)]
    pub warning: RunWarning,
    pub message: String,
}

impl From<&RunWarning> for WarningResponse {
    fn from(warning: &RunWarning) -> Self {
        Self {
            warning: warning.clone(),
            message: warning.to_string(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Computation Responses
// ════════════════════════════════════════════════════════════════════════════════

/// Response to a start request.
#[derive(Debug, Clone, Serialize)]
pub struct StartRunResponse {
    pub accepted: bool,
    pub run_id: Option<String>,
    pub status: RunStatus,
    pub message: String,
}

impl From<StartRunResult> for StartRunResponse {
    fn from(result: StartRunResult) -> Self {
        Self {
            accepted: result.accepted,
            run_id: result.run_id.map(|id| id.to_string()),
            status: result.status,
            message: result.message,
        }
    }
}

/// One ranked entity in a run result.
#[derive(Debug, Clone, Serialize)]
pub struct CompositeResponse {
    pub entity_id: String,
    pub label: Option<String>,
    pub score: f64,
    pub score_percentage: f64,
    pub rank: u32,
    pub category: String,
}

impl From<&RankedEntity> for CompositeResponse {
    fn from(entity: &RankedEntity) -> Self {
        Self {
            entity_id: entity.entity_id.to_string(),
            label: entity.label.clone(),
            score: entity.score,
            score_percentage: to_percentage(entity.score),
            rank: entity.rank,
            category: entity.category.clone(),
        }
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunResultResponse {
    pub priority_vector: Vec<WeightResponse>,
    pub consistency: ConsistencyResponse,
    pub composite: Vec<CompositeResponse>,
    pub warnings: Vec<WarningResponse>,
    pub headline_score: Option<f64>,
}

impl From<&RunResult> for RunResultResponse {
    fn from(result: &RunResult) -> Self {
        Self {
            priority_vector: weights(&result.priority_vector),
            consistency: ConsistencyResponse::from(&result.consistency),
            composite: result.composite.iter().map(CompositeResponse::from).collect(),
            warnings: result.warnings.iter().map(WarningResponse::from).collect(),
            headline_score: result.headline_score(),
        }
    }
}

/// One history entry.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntryResponse {
    pub run_id: String,
    /// ISO 8601.
    pub timestamp: String,
    pub status: RunStatus,
    pub headline_score: Option<f64>,
    pub message: String,
}

impl From<&HistoryEntry> for HistoryEntryResponse {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            run_id: entry.run_id.to_string(),
            timestamp: entry.timestamp.to_string(),
            status: entry.status,
            headline_score: entry.headline_score,
            message: entry.message.clone(),
        }
    }
}

/// Engine status.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: RunStatus,
    pub running: bool,
    pub run_id: Option<String>,
    pub started_at: Option<String>,
    pub completed_at: Option<String>,
    pub message: Option<String>,
    pub result: Option<RunResultResponse>,
    pub error: Option<ErrorResponse>,
    pub history: Vec<HistoryEntryResponse>,
}

impl From<RunStatusView> for StatusResponse {
    fn from(view: RunStatusView) -> Self {
        Self {
            running: view.status == RunStatus::Running,
            status: view.status,
            run_id: view.run_id.map(|id| id.to_string()),
            started_at: view.started_at.map(|t| t.to_string()),
            completed_at: view.completed_at.map(|t| t.to_string()),
            message: view.message,
            result: view.result.as_ref().map(RunResultResponse::from),
            error: view.error.as_ref().map(ErrorResponse::from),
            history: view.history.iter().map(HistoryEntryResponse::from).collect(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Criteria Responses
// ════════════════════════════════════════════════════════════════════════════════

/// Consistency check result.
#[derive(Debug, Clone, Serialize)]
pub struct ConsistencyReportResponse {
    #[serde(flatten)]
    pub consistency: ConsistencyResponse,
    pub threshold: f64,
    pub acceptable: bool,
}

impl From<ConsistencyReport> for ConsistencyReportResponse {
    fn from(report: ConsistencyReport) -> Self {
        Self {
            consistency: ConsistencyResponse::from(&report.consistency),
            threshold: report.threshold,
            acceptable: report.acceptable,
        }
    }
}

/// Persisted weights.
#[derive(Debug, Clone, Serialize)]
pub struct RecomputeWeightsResponse {
    pub priority_vector: Vec<WeightResponse>,
    pub consistency: ConsistencyResponse,
    pub warnings: Vec<WarningResponse>,
}

impl From<RecomputeWeightsResult> for RecomputeWeightsResponse {
    fn from(result: RecomputeWeightsResult) -> Self {
        Self {
            priority_vector: weights(&result.priority_vector),
            consistency: ConsistencyResponse::from(&result.consistency),
            warnings: result.warnings.iter().map(WarningResponse::from).collect(),
        }
    }
}

/// A criterion with its last persisted weight.
#[derive(Debug, Clone, Serialize)]
pub struct CriterionResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub weight: f64,
}

impl From<Criterion> for CriterionResponse {
    fn from(criterion: Criterion) -> Self {
        Self {
            id: criterion.id.to_string(),
            name: criterion.name,
            description: criterion.description,
            weight: criterion.weight,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Report Responses
// ════════════════════════════════════════════════════════════════════════════════

/// One row of a report.
#[derive(Debug, Clone, Serialize)]
pub struct RankingRowResponse {
    pub entity_id: String,
    pub label: String,
    pub score: f64,
    pub score_percentage: f64,
    pub rank: u32,
    pub category: String,
}

impl From<RankingRow> for RankingRowResponse {
    fn from(row: RankingRow) -> Self {
        Self {
            entity_id: row.entity_id.to_string(),
            label: row.label,
            score: row.score,
            score_percentage: row.score_percentage,
            rank: row.rank,
            category: row.category,
        }
    }
}

/// Ranking report.
#[derive(Debug, Clone, Serialize)]
pub struct RankingReportResponse {
    pub run_id: Option<String>,
    pub generated_at: Option<String>,
    pub headline_score: Option<f64>,
    pub rows: Vec<RankingRowResponse>,
}

impl From<RankingReport> for RankingReportResponse {
    fn from(report: RankingReport) -> Self {
        Self {
            run_id: report.run_id.map(|id| id.to_string()),
            generated_at: report.generated_at.map(|t| t.to_string()),
            headline_score: report.headline_score,
            rows: report.rows.into_iter().map(RankingRowResponse::from).collect(),
        }
    }
}

/// Entities in one decision category.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionGroupResponse {
    pub category: String,
    pub description: String,
    pub rows: Vec<RankingRowResponse>,
}

impl From<DecisionGroup> for DecisionGroupResponse {
    fn from(group: DecisionGroup) -> Self {
        Self {
            category: group.category,
            description: group.description,
            rows: group.rows.into_iter().map(RankingRowResponse::from).collect(),
        }
    }
}

/// Decision report.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionReportResponse {
    pub run_id: Option<String>,
    pub generated_at: Option<String>,
    pub groups: Vec<DecisionGroupResponse>,
}

impl From<DecisionReport> for DecisionReportResponse {
    fn from(report: DecisionReport) -> Self {
        Self {
            run_id: report.run_id.map(|id| id.to_string()),
            generated_at: report.generated_at.map(|t| t.to_string()),
            groups: report
                .groups
                .into_iter()
                .map(DecisionGroupResponse::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::computation::fixtures::result_with_scores;

    #[test]
    fn matrix_request_rejects_blank_criterion() {
        let json = r#"{"criterion_ids": ["a", " "], "matrix": [[1, 1], [1, 1]]}"#;
        assert!(serde_json::from_str::<MatrixRequest>(json).is_err());
    }

    #[test]
    fn start_run_request_defaults_to_foreground() {
        let request: StartRunRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.background, None);
    }

    #[test]
    fn warning_serializes_kind_and_message() {
        let response = WarningResponse::from(&RunWarning::HighInconsistency {
            ratio: 0.25,
            threshold: 0.1,
        });
        let json = serde_json::to_value(response).unwrap();

        assert_eq!(json["kind"], "high_inconsistency");
        assert_eq!(json["ratio"], 0.25);
        assert!(json["message"].as_str().unwrap().contains("0.2500"));
    }

    #[test]
    fn run_result_reports_percentages_and_headline() {
        let response = RunResultResponse::from(&result_with_scores(&[0.9, 0.5]));

        assert_eq!(response.composite[0].score_percentage, 90.0);
        assert_eq!(response.headline_score, Some(70.0));
        assert_eq!(response.priority_vector.len(), 2);
    }

    #[test]
    fn error_response_uses_screaming_code() {
        let response = ErrorResponse::from(&AhpError::RunAlreadyInProgress);
        assert_eq!(response.code, "RUN_ALREADY_IN_PROGRESS");
    }
}
