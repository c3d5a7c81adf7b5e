pub mod complaints;
pub mod optimizer;
pub mod workers;

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
