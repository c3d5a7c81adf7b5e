use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::repositories::WorkerRepository;
use crate::domain::worker::Worker;

/// In-process implementation of WorkerRepository
#[derive(Default)]
pub struct InMemoryWorkerRepository {
    workers: RwLock<Vec<Worker>>,
}

impl InMemoryWorkerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workers(workers: Vec<Worker>) -> Self {
        Self {
            workers: RwLock::new(workers),
        }
    }
}

#[async_trait]
impl WorkerRepository for InMemoryWorkerRepository {
    async fn save(&self, worker: &Worker) -> Result<(), String> {
        let mut store = self.workers.write().await;
        match store.iter_mut().find(|w| w.worker_id() == worker.worker_id()) {
            Some(existing) => *existing = worker.clone(),
            None => store.push(worker.clone()),
        }
        Ok(())
    }

    async fn find_by_id(&self, worker_id: &str) -> Result<Option<Worker>, String> {
        let store = self.workers.read().await;
        Ok(store.iter().find(|w| w.worker_id() == worker_id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Worker>, String> {
        Ok(self.workers.read().await.clone())
    }

    async fn find_available(&self) -> Result<Vec<Worker>, String> {
        let store = self.workers.read().await;
        Ok(store.iter().filter(|w| w.is_available()).cloned().collect())
    }
}
