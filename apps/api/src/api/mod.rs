// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};

use handlers::{complaints, optimizer, workers};
pub use state::AppState;

/// Build the application router
///
/// Middleware layers are added by the caller.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Complaint routes
        .route("/api/complaints", get(complaints::list_complaints))
        .route("/api/complaints/:id", get(complaints::get_complaint))
        .route("/api/complaints/:id/assign", post(complaints::assign_worker))
        .route("/api/complaints/:id/complete", post(complaints::complete_complaint))
        .route("/api/complaints/:id/reopen", post(complaints::reopen_complaint))
        // Worker routes
        .route("/api/workers", get(workers::list_workers))
        .route("/api/workers/:id", get(workers::get_worker))
        // Optimizer routes
        .route("/api/optimizer/assignments", post(optimizer::optimize_assignments))
        .route("/api/optimizer/work-order", post(optimizer::suggest_for_work_order))
        .with_state(state)
}
