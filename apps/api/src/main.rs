use std::sync::Arc;

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use waste_dispatch_api::api::{self, AppState};
use waste_dispatch_api::config::AppConfig;
use waste_dispatch_api::domain::repositories::{ComplaintRepository, WorkerRepository};
use waste_dispatch_api::infrastructure::llm::OpenAiStructuredProvider;
use waste_dispatch_api::infrastructure::repositories::{
    InMemoryComplaintRepository, InMemoryWorkerRepository,
};
use waste_dispatch_api::infrastructure::seed::load_seed_file;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = AppConfig::from_env()?;

    // In-memory storage
    let complaints: Arc<dyn ComplaintRepository> = Arc::new(InMemoryComplaintRepository::new());
    let workers: Arc<dyn WorkerRepository> = Arc::new(InMemoryWorkerRepository::new());

    match &config.seed_path {
        Some(path) => {
            load_seed_file(path, complaints.as_ref(), workers.as_ref()).await?;
        }
        None => tracing::warn!("SEED_DATA_PATH not set, starting with no data"),
    }

    tracing::info!(
        model = %config.llm.model,
        base_url = %config.llm.base_url,
        timeout_ms = config.llm.request_timeout_ms,
        "Configuring completion provider"
    );
    let provider = Arc::new(OpenAiStructuredProvider::new(config.llm)?);

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = api::router(AppState::new(complaints, workers, provider))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Server listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
