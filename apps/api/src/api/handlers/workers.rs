use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::location::GeoPoint;
use crate::domain::worker::{DutyStatus, Worker};

/// Query parameters for listing workers
#[derive(Debug, Deserialize)]
pub struct WorkerQuery {
    #[serde(default)]
    pub on_duty: bool,
    /// Keep only workers whose skills mention this text
    pub skill: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WorkerResponse {
    pub worker_id: String,
    pub name: String,
    pub area: String,
    pub location: Option<GeoPoint>,
    pub skills: Vec<String>,
    pub performance: f64,
    pub tasks_completed: u32,
    pub duty_status: DutyStatus,
}

impl From<&Worker> for WorkerResponse {
    fn from(worker: &Worker) -> Self {
        Self {
            worker_id: worker.worker_id().to_string(),
            name: worker.name().to_string(),
            area: worker.area().to_string(),
            location: worker.location(),
            skills: worker.skills().to_vec(),
            performance: worker.performance(),
            tasks_completed: worker.tasks_completed(),
            duty_status: worker.duty_status(),
        }
    }
}

/// List workers
///
/// GET /api/workers?on_duty=true&skill=hazardous
pub async fn list_workers(
    State(state): State<AppState>,
    Query(query): Query<WorkerQuery>,
) -> Result<Json<Vec<WorkerResponse>>, ApiError> {
    let workers = if query.on_duty {
        state.workers.find_available().await
    } else {
        state.workers.find_all().await
    }
    .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;

    let responses = workers
        .iter()
        .filter(|w| query.skill.as_deref().map_or(true, |skill| w.can_handle(skill)))
        .map(WorkerResponse::from)
        .collect();

    Ok(Json(responses))
}

/// Get a worker by ID
///
/// GET /api/workers/:id
pub async fn get_worker(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WorkerResponse>, ApiError> {
    let worker = state
        .workers
        .find_by_id(&id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found(format!("Worker not found: {}", id)))?;

    Ok(Json(WorkerResponse::from(&worker)))
}
