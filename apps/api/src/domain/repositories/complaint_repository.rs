use async_trait::async_trait;

use crate::domain::complaint::{Complaint, ComplaintStatus};

/// Repository trait for Complaint aggregate
///
/// Defines the contract for storing and retrieving complaints.
/// Listing methods return complaints in the order they were first saved.
#[async_trait]
pub trait ComplaintRepository: Send + Sync {
    /// Save a complaint (insert or update)
    async fn save(&self, complaint: &Complaint) -> Result<(), String>;

    /// Save several complaints in one write
    async fn save_all(&self, complaints: &[Complaint]) -> Result<(), String>;

    /// Find a complaint by its ID
    async fn find_by_id(&self, id: &str) -> Result<Option<Complaint>, String>;

    /// Find every complaint
    async fn find_all(&self) -> Result<Vec<Complaint>, String>;

    /// Find all complaints in the given status
    async fn find_by_status(&self, status: ComplaintStatus) -> Result<Vec<Complaint>, String>;
}
