use std::sync::Arc;

use crate::domain::repositories::{ComplaintRepository, WorkerRepository};
use crate::optimizer::provider::StructuredCompletionProvider;
use crate::optimizer::DispatchService;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub complaints: Arc<dyn ComplaintRepository>,
    pub workers: Arc<dyn WorkerRepository>,
    pub dispatch: Arc<DispatchService>,
}

impl AppState {
    pub fn new(
        complaints: Arc<dyn ComplaintRepository>,
        workers: Arc<dyn WorkerRepository>,
        provider: Arc<dyn StructuredCompletionProvider>,
    ) -> Self {
        let dispatch = Arc::new(DispatchService::new(
            complaints.clone(),
            workers.clone(),
            provider,
        ));
        Self {
            complaints,
            workers,
            dispatch,
        }
    }
}
