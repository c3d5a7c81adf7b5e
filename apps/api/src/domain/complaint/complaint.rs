use super::events::ComplaintEvent;
use super::value_objects::{ComplaintStatus, WasteCategory};
use crate::domain::location::GeoPoint;
use chrono::{DateTime, Utc};

/// Complaint aggregate root
///
/// A citizen report about uncollected or misplaced waste. Owns the rules
/// for who may be put on it and when it counts as resolved.
///
/// # Invariants
/// - ID, reporter and location cannot be empty
/// - A worker is recorded whenever the status is InProgress
/// - Status transitions must follow [`ComplaintStatus::can_transition_to`]
/// - Completed complaints must be reopened before they can be reassigned
///
/// # Example
/// ```
/// use waste_dispatch_api::domain::complaint::{Complaint, ComplaintStatus, WasteCategory};
///
/// let (mut complaint, _) = Complaint::new(
///     "C1",
///     "Ravi Kumar",
///     "Sector 17",
///     WasteCategory::Hazardous,
///     None,
/// ).expect("valid complaint");
///
/// complaint.assign_worker("W1").expect("pending complaints accept a worker");
/// assert_eq!(complaint.status(), ComplaintStatus::InProgress);
/// assert_eq!(complaint.assigned_worker(), Some("W1"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Complaint {
    id: String,
    reporter_name: String,
    location: String,
    coordinates: Option<GeoPoint>,
    waste_category: WasteCategory,
    status: ComplaintStatus,
    assigned_worker: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Complaint {
    /// Creates a new Complaint aggregate
    ///
    /// # Arguments
    /// * `id` - Complaint reference (cannot be empty)
    /// * `reporter_name` - Name of the citizen who filed it (cannot be empty)
    /// * `location` - Free-text location label (cannot be empty)
    /// * `waste_category` - Kind of waste reported
    /// * `coordinates` - Optional GPS fix attached to the report
    ///
    /// # Returns
    /// * `Ok((Complaint, ComplaintEvent))` - New complaint and its Filed event
    /// * `Err(String)` - If any invariant is violated
    pub fn new(
        id: impl Into<String>,
        reporter_name: impl Into<String>,
        location: impl Into<String>,
        waste_category: WasteCategory,
        coordinates: Option<GeoPoint>,
    ) -> Result<(Self, ComplaintEvent), String> {
        let id = id.into();
        let reporter_name = reporter_name.into();
        let location = location.into();

        if id.trim().is_empty() {
            return Err("Complaint ID cannot be empty".to_string());
        }
        if reporter_name.trim().is_empty() {
            return Err("Reporter name cannot be empty".to_string());
        }
        if location.trim().is_empty() {
            return Err("Location cannot be empty".to_string());
        }

        let now = Utc::now();
        let complaint = Self {
            id,
            reporter_name,
            location,
            coordinates,
            waste_category,
            status: ComplaintStatus::Pending,
            assigned_worker: None,
            created_at: now,
            updated_at: now,
        };

        let event = ComplaintEvent::Filed {
            complaint_id: complaint.id.clone(),
            location: complaint.location.clone(),
        };

        Ok((complaint, event))
    }

    /// Puts a worker on this complaint and moves it to InProgress
    ///
    /// Assigning the worker that already holds an in-progress complaint
    /// changes nothing and yields no event, so repeated merges of the same
    /// suggestion leave the aggregate untouched.
    ///
    /// # Returns
    /// * `Ok(Some(ComplaintEvent))` - Assigned event when state changed
    /// * `Ok(None)` - Worker was already assigned
    /// * `Err(String)` - Empty worker ID or complaint already completed
    pub fn assign_worker(&mut self, worker_id: &str) -> Result<Option<ComplaintEvent>, String> {
        if worker_id.trim().is_empty() {
            return Err("Worker ID cannot be empty".to_string());
        }

        if self.status == ComplaintStatus::Completed {
            return Err(format!(
                "Cannot assign a worker to complaint {} in {} status",
                self.id, self.status
            ));
        }

        let next_status = ComplaintStatus::InProgress;
        if !self.status.can_transition_to(next_status) {
            return Err(format!(
                "Cannot assign complaint {} in {} status",
                self.id, self.status
            ));
        }

        if self.status == next_status && self.assigned_worker.as_deref() == Some(worker_id) {
            return Ok(None);
        }

        let previous_worker = self.assigned_worker.replace(worker_id.to_string());
        self.status = next_status;
        self.updated_at = Utc::now();

        Ok(Some(ComplaintEvent::Assigned {
            complaint_id: self.id.clone(),
            worker_id: worker_id.to_string(),
            previous_worker,
        }))
    }

    /// Marks the complaint as resolved
    pub fn complete(&mut self) -> Result<ComplaintEvent, String> {
        let next_status = ComplaintStatus::Completed;
        if !self.status.can_transition_to(next_status) {
            return Err(format!(
                "Cannot complete complaint {} in {} status",
                self.id, self.status
            ));
        }

        self.status = next_status;
        self.updated_at = Utc::now();

        Ok(ComplaintEvent::Completed {
            complaint_id: self.id.clone(),
        })
    }

    /// Reopens a completed complaint
    ///
    /// The previously assigned worker stays on it. A complaint closed
    /// without any worker cannot be reopened, since InProgress always
    /// names a worker.
    pub fn reopen(&mut self) -> Result<ComplaintEvent, String> {
        if self.status != ComplaintStatus::Completed {
            return Err(format!(
                "Cannot reopen complaint {} in {} status",
                self.id, self.status
            ));
        }
        if self.assigned_worker.is_none() {
            return Err(format!(
                "Cannot reopen complaint {} without an assigned worker",
                self.id
            ));
        }

        self.status = ComplaintStatus::InProgress;
        self.updated_at = Utc::now();

        Ok(ComplaintEvent::Reopened {
            complaint_id: self.id.clone(),
        })
    }

    // ===== Getters =====

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn reporter_name(&self) -> &str {
        &self.reporter_name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn coordinates(&self) -> Option<GeoPoint> {
        self.coordinates
    }

    pub fn waste_category(&self) -> WasteCategory {
        self.waste_category
    }

    pub fn status(&self) -> ComplaintStatus {
        self.status
    }

    /// Returns the ID of the worker currently responsible, if any
    pub fn assigned_worker(&self) -> Option<&str> {
        self.assigned_worker.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Reconstructs a Complaint from stored data
    ///
    /// Bypasses the lifecycle rules since the record was validated when it
    /// was first written.
    ///
    /// # Note
    /// Only to be used by repository and seed loaders.
    #[allow(clippy::too_many_arguments)]
    pub fn from_record(
        id: String,
        reporter_name: String,
        location: String,
        coordinates: Option<GeoPoint>,
        waste_category: WasteCategory,
        status: ComplaintStatus,
        assigned_worker: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            reporter_name,
            location,
            coordinates,
            waste_category,
            status,
            assigned_worker,
            created_at,
            updated_at: created_at,
        }
    }
}
