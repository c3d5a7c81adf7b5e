//! Static seed data
//!
//! Loads complaints and workers from a JSON document of the form
//! `{ "complaints": [...], "workers": [...] }` into the repositories.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::domain::complaint::{Complaint, ComplaintStatus, WasteCategory};
use crate::domain::location::GeoPoint;
use crate::domain::repositories::{ComplaintRepository, WorkerRepository};
use crate::domain::worker::{DutyStatus, Worker};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Seed file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid seed record {id}: {reason}")]
    InvalidRecord { id: String, reason: String },

    #[error("Repository error: {0}")]
    Repository(String),
}

#[derive(Debug, Deserialize)]
struct ComplaintRecord {
    id: String,
    reporter_name: String,
    location: String,
    #[serde(default)]
    coordinates: Option<GeoPoint>,
    waste_category: WasteCategory,
    #[serde(default = "default_status")]
    status: ComplaintStatus,
    #[serde(default)]
    assigned_worker: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

fn default_status() -> ComplaintStatus {
    ComplaintStatus::Pending
}

#[derive(Debug, Deserialize)]
struct WorkerRecord {
    worker_id: String,
    name: String,
    area: String,
    #[serde(default)]
    location: Option<GeoPoint>,
    #[serde(default)]
    skills: Vec<String>,
    performance: f64,
    #[serde(default)]
    tasks_completed: u32,
    #[serde(default = "default_duty")]
    duty_status: DutyStatus,
}

fn default_duty() -> DutyStatus {
    DutyStatus::OnDuty
}

/// Parsed seed document
#[derive(Debug, Default)]
pub struct SeedData {
    pub complaints: Vec<Complaint>,
    pub workers: Vec<Worker>,
}

#[derive(Debug, Deserialize)]
struct SeedDocument {
    #[serde(default)]
    complaints: Vec<ComplaintRecord>,
    #[serde(default)]
    workers: Vec<WorkerRecord>,
}

impl ComplaintRecord {
    fn into_complaint(self) -> Result<Complaint, SeedError> {
        if self.id.trim().is_empty() {
            return Err(SeedError::InvalidRecord {
                id: self.id,
                reason: "complaint ID cannot be empty".to_string(),
            });
        }
        if self.reporter_name.trim().is_empty() {
            return Err(SeedError::InvalidRecord {
                id: self.id,
                reason: "reporter name cannot be empty".to_string(),
            });
        }
        if self.location.trim().is_empty() {
            return Err(SeedError::InvalidRecord {
                id: self.id,
                reason: "location cannot be empty".to_string(),
            });
        }
        // In-progress work always has someone on it
        if self.status == ComplaintStatus::InProgress && self.assigned_worker.is_none() {
            return Err(SeedError::InvalidRecord {
                id: self.id,
                reason: "in_progress complaint has no assigned worker".to_string(),
            });
        }

        Ok(Complaint::from_record(
            self.id,
            self.reporter_name,
            self.location,
            self.coordinates,
            self.waste_category,
            self.status,
            self.assigned_worker,
            self.created_at.unwrap_or_else(Utc::now),
        ))
    }
}

impl WorkerRecord {
    fn into_worker(self) -> Result<Worker, SeedError> {
        let id = self.worker_id.clone();
        let mut worker = Worker::new(self.worker_id, self.name, self.area, self.skills, self.performance)
            .map_err(|reason| SeedError::InvalidRecord { id, reason })?
            .with_tasks_completed(self.tasks_completed);
        if let Some(location) = self.location {
            worker = worker.with_location(location);
        }
        worker.set_duty_status(self.duty_status);
        Ok(worker)
    }
}

/// Parse a seed document
pub fn parse_seed(json: &str) -> Result<SeedData, SeedError> {
    let document: SeedDocument = serde_json::from_str(json)?;

    let complaints = document
        .complaints
        .into_iter()
        .map(ComplaintRecord::into_complaint)
        .collect::<Result<Vec<_>, _>>()?;
    let workers = document
        .workers
        .into_iter()
        .map(WorkerRecord::into_worker)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SeedData { complaints, workers })
}

/// Read a seed file and store its contents
///
/// Returns the number of complaints and workers loaded.
pub async fn load_seed_file(
    path: &Path,
    complaints: &dyn ComplaintRepository,
    workers: &dyn WorkerRepository,
) -> Result<(usize, usize), SeedError> {
    let raw = tokio::fs::read_to_string(path).await?;
    let data = parse_seed(&raw)?;

    complaints
        .save_all(&data.complaints)
        .await
        .map_err(SeedError::Repository)?;
    for worker in &data.workers {
        workers.save(worker).await.map_err(SeedError::Repository)?;
    }

    info!(
        path = %path.display(),
        complaints = data.complaints.len(),
        workers = data.workers.len(),
        "Seed data loaded"
    );
    Ok((data.complaints.len(), data.workers.len()))
}
