use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::optimizer::DispatchError;

/// Message returned for every optimization failure
///
/// The underlying cause is logged, never sent to the client.
pub const OPTIMIZATION_FAILED_MESSAGE: &str = "Failed to optimize assignments";

/// API error type with HTTP status code and message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 404 Not Found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Creates a 409 Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// Creates a 502 Bad Gateway error
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    /// Creates a 500 Internal Server Error
    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<String> for ApiError {
    fn from(message: String) -> Self {
        Self::internal_server_error(message)
    }
}

impl From<DispatchError> for ApiError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Optimization(e) => {
                error!(error = %e, cause = ?e.cause(), "Optimization failed");
                Self::bad_gateway(OPTIMIZATION_FAILED_MESSAGE)
            }
            DispatchError::AlreadyRunning => Self::conflict(err.to_string()),
            DispatchError::ComplaintNotFound(_) | DispatchError::WorkerNotFound(_) => {
                Self::not_found(err.to_string())
            }
            DispatchError::InvalidTransition(reason) => Self::bad_request(reason),
            DispatchError::Repository(e) => {
                error!(error = %e, "Repository failure");
                Self::internal_server_error(format!("Database error: {}", e))
            }
        }
    }
}
