use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::complaint::{Complaint, ComplaintStatus, WasteCategory};
use crate::domain::location::GeoPoint;

/// Query parameters for listing complaints
#[derive(Debug, Deserialize)]
pub struct ComplaintQuery {
    pub status: Option<ComplaintStatus>,
}

/// Request body for manual assignment
#[derive(Debug, Deserialize)]
pub struct AssignWorkerRequest {
    pub worker_id: String,
}

#[derive(Debug, Serialize)]
pub struct ComplaintResponse {
    pub id: String,
    pub reporter_name: String,
    pub location: String,
    pub coordinates: Option<GeoPoint>,
    pub waste_category: WasteCategory,
    pub status: ComplaintStatus,
    pub assigned_worker: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Complaint> for ComplaintResponse {
    fn from(complaint: &Complaint) -> Self {
        Self {
            id: complaint.id().to_string(),
            reporter_name: complaint.reporter_name().to_string(),
            location: complaint.location().to_string(),
            coordinates: complaint.coordinates(),
            waste_category: complaint.waste_category(),
            status: complaint.status(),
            assigned_worker: complaint.assigned_worker().map(str::to_string),
            created_at: complaint.created_at(),
            updated_at: complaint.updated_at(),
        }
    }
}

/// List complaints, optionally by status
///
/// GET /api/complaints?status=pending
pub async fn list_complaints(
    State(state): State<AppState>,
    Query(query): Query<ComplaintQuery>,
) -> Result<Json<Vec<ComplaintResponse>>, ApiError> {
    let complaints = match query.status {
        Some(status) => state.complaints.find_by_status(status).await,
        None => state.complaints.find_all().await,
    }
    .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;

    Ok(Json(complaints.iter().map(ComplaintResponse::from).collect()))
}

/// Get a complaint by ID
///
/// GET /api/complaints/:id
pub async fn get_complaint(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ComplaintResponse>, ApiError> {
    let complaint = state
        .complaints
        .find_by_id(&id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found(format!("Complaint not found: {}", id)))?;

    Ok(Json(ComplaintResponse::from(&complaint)))
}

/// Put a worker on a complaint
///
/// POST /api/complaints/:id/assign
pub async fn assign_worker(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AssignWorkerRequest>,
) -> Result<Json<ComplaintResponse>, ApiError> {
    if req.worker_id.trim().is_empty() {
        return Err(ApiError::bad_request("worker_id cannot be empty"));
    }

    let complaint = state.dispatch.assign_worker(&id, &req.worker_id).await?;
    Ok(Json(ComplaintResponse::from(&complaint)))
}

/// Mark a complaint as completed
///
/// POST /api/complaints/:id/complete
pub async fn complete_complaint(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ComplaintResponse>, ApiError> {
    let complaint = state.dispatch.complete_complaint(&id).await?;
    Ok(Json(ComplaintResponse::from(&complaint)))
}

/// Reopen a completed complaint
///
/// POST /api/complaints/:id/reopen
pub async fn reopen_complaint(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ComplaintResponse>, ApiError> {
    let complaint = state.dispatch.reopen_complaint(&id).await?;
    Ok(Json(ComplaintResponse::from(&complaint)))
}
