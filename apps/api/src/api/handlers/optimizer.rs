use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::optimizer::{
    AssignmentSuggestion, BatchOutcome, DroppedSuggestion, Optimization, WorkOrderSuggestion,
};

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub complaint_id: String,
    pub worker_id: String,
    pub rationale: String,
}

impl From<&AssignmentSuggestion> for SuggestionResponse {
    fn from(suggestion: &AssignmentSuggestion) -> Self {
        Self {
            complaint_id: suggestion.work_item_id.clone(),
            worker_id: suggestion.agent_id.clone(),
            rationale: suggestion.rationale.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DroppedResponse {
    pub complaint_id: String,
    pub worker_id: String,
    pub reason: String,
}

impl From<&DroppedSuggestion> for DroppedResponse {
    fn from(dropped: &DroppedSuggestion) -> Self {
        Self {
            complaint_id: dropped.suggestion.work_item_id.clone(),
            worker_id: dropped.suggestion.agent_id.clone(),
            reason: dropped.reason.to_string(),
        }
    }
}

/// Response from a batch optimization run
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchResponse {
    Applied {
        run_id: Uuid,
        summary: String,
        applied: Vec<SuggestionResponse>,
        dropped: Vec<DroppedResponse>,
    },
    Skipped {
        reason: String,
    },
}

impl From<BatchOutcome> for BatchResponse {
    fn from(outcome: BatchOutcome) -> Self {
        match outcome {
            BatchOutcome::Applied {
                run_id,
                summary,
                report,
            } => BatchResponse::Applied {
                run_id,
                summary,
                applied: report.applied.iter().map(SuggestionResponse::from).collect(),
                dropped: report.dropped.iter().map(DroppedResponse::from).collect(),
            },
            BatchOutcome::Skipped(reason) => BatchResponse::Skipped {
                reason: reason.to_string(),
            },
        }
    }
}

/// Request body for work order suggestions
#[derive(Debug, Deserialize)]
pub struct WorkOrderRequest {
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct WorkerSuggestionResponse {
    pub worker_id: String,
    pub reasoning: String,
    pub confidence_score: f64,
}

impl From<&WorkOrderSuggestion> for WorkerSuggestionResponse {
    fn from(suggestion: &WorkOrderSuggestion) -> Self {
        Self {
            worker_id: suggestion.agent_id.clone(),
            reasoning: suggestion.reasoning.clone(),
            confidence_score: suggestion.confidence_score,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WorkOrderResponse {
    Suggested {
        suggestions: Vec<WorkerSuggestionResponse>,
    },
    Skipped {
        reason: String,
    },
}

/// Assign pending complaints to on-duty workers
///
/// POST /api/optimizer/assignments
pub async fn optimize_assignments(
    State(state): State<AppState>,
) -> Result<Json<BatchResponse>, ApiError> {
    let outcome = state.dispatch.run_batch_optimization().await?;
    Ok(Json(BatchResponse::from(outcome)))
}

/// Suggest workers for a free-text work order
///
/// POST /api/optimizer/work-order
pub async fn suggest_for_work_order(
    State(state): State<AppState>,
    Json(req): Json<WorkOrderRequest>,
) -> Result<Json<WorkOrderResponse>, ApiError> {
    if req.description.trim().is_empty() {
        return Err(ApiError::bad_request("Work order description cannot be empty"));
    }

    let response = match state.dispatch.suggest_for_work_order(&req.description).await? {
        Optimization::Completed(plan) => WorkOrderResponse::Suggested {
            suggestions: plan
                .suggested_assignments
                .iter()
                .map(WorkerSuggestionResponse::from)
                .collect(),
        },
        Optimization::Skipped(reason) => WorkOrderResponse::Skipped {
            reason: reason.to_string(),
        },
    };

    Ok(Json(response))
}
