use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::complaint::{Complaint, ComplaintStatus};
use crate::domain::repositories::ComplaintRepository;

/// In-process implementation of ComplaintRepository
///
/// Complaints are kept in first-save order. Saving an existing ID replaces
/// the stored copy in place.
#[derive(Default)]
pub struct InMemoryComplaintRepository {
    complaints: RwLock<Vec<Complaint>>,
}

impl InMemoryComplaintRepository {
    /// Creates an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding the given complaints
    pub fn with_complaints(complaints: Vec<Complaint>) -> Self {
        Self {
            complaints: RwLock::new(complaints),
        }
    }
}

fn upsert(store: &mut Vec<Complaint>, complaint: &Complaint) {
    match store.iter_mut().find(|c| c.id() == complaint.id()) {
        Some(existing) => *existing = complaint.clone(),
        None => store.push(complaint.clone()),
    }
}

#[async_trait]
impl ComplaintRepository for InMemoryComplaintRepository {
    async fn save(&self, complaint: &Complaint) -> Result<(), String> {
        let mut store = self.complaints.write().await;
        upsert(&mut store, complaint);
        Ok(())
    }

    async fn save_all(&self, complaints: &[Complaint]) -> Result<(), String> {
        let mut store = self.complaints.write().await;
        for complaint in complaints {
            upsert(&mut store, complaint);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Complaint>, String> {
        let store = self.complaints.read().await;
        Ok(store.iter().find(|c| c.id() == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Complaint>, String> {
        Ok(self.complaints.read().await.clone())
    }

    async fn find_by_status(&self, status: ComplaintStatus) -> Result<Vec<Complaint>, String> {
        let store = self.complaints.read().await;
        Ok(store
            .iter()
            .filter(|c| c.status() == status)
            .cloned()
            .collect())
    }
}
