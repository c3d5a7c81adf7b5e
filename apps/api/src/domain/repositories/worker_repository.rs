use async_trait::async_trait;

use crate::domain::worker::Worker;

/// Repository trait for workers
#[async_trait]
pub trait WorkerRepository: Send + Sync {
    /// Save a worker (insert or update)
    async fn save(&self, worker: &Worker) -> Result<(), String>;

    /// Find a worker by ID
    async fn find_by_id(&self, worker_id: &str) -> Result<Option<Worker>, String>;

    /// Find every worker
    async fn find_all(&self) -> Result<Vec<Worker>, String>;

    /// Find workers who are currently on duty
    async fn find_available(&self) -> Result<Vec<Worker>, String>;
}
