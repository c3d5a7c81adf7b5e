use super::value_objects::DutyStatus;
use crate::domain::location::GeoPoint;

/// Upper bound of the performance score scale
pub const MAX_PERFORMANCE: f64 = 100.0;

/// A member of the collection crew
///
/// `performance` is a 0-100 score built from completion time and quality
/// reviews. Workers start on duty.
#[derive(Debug, Clone, PartialEq)]
pub struct Worker {
    worker_id: String,
    name: String,
    area: String,
    location: Option<GeoPoint>,
    skills: Vec<String>,
    performance: f64,
    tasks_completed: u32,
    duty_status: DutyStatus,
}

impl Worker {
    /// Creates a new on-duty worker
    ///
    /// # Returns
    /// * `Err(String)` - Empty ID, name or area, or a performance score
    ///   outside 0-100
    pub fn new(
        worker_id: impl Into<String>,
        name: impl Into<String>,
        area: impl Into<String>,
        skills: Vec<String>,
        performance: f64,
    ) -> Result<Self, String> {
        let worker_id = worker_id.into();
        let name = name.into();
        let area = area.into();

        if worker_id.trim().is_empty() {
            return Err("Worker ID cannot be empty".to_string());
        }
        if name.trim().is_empty() {
            return Err("Worker name cannot be empty".to_string());
        }
        if area.trim().is_empty() {
            return Err("Worker area cannot be empty".to_string());
        }
        if !performance.is_finite() || !(0.0..=MAX_PERFORMANCE).contains(&performance) {
            return Err(format!(
                "Performance must be between 0 and {}, got {}",
                MAX_PERFORMANCE, performance
            ));
        }

        Ok(Self {
            worker_id,
            name,
            area,
            location: None,
            skills,
            performance,
            tasks_completed: 0,
            duty_status: DutyStatus::OnDuty,
        })
    }

    pub fn with_location(mut self, location: GeoPoint) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_tasks_completed(mut self, tasks_completed: u32) -> Self {
        self.tasks_completed = tasks_completed;
        self
    }

    pub fn set_duty_status(&mut self, duty_status: DutyStatus) {
        self.duty_status = duty_status;
    }

    /// Only on-duty workers are offered to the optimizer
    pub fn is_available(&self) -> bool {
        self.duty_status == DutyStatus::OnDuty
    }

    /// Check if any of this worker's skills mention the given category
    pub fn can_handle(&self, category: &str) -> bool {
        let category = category.to_lowercase();
        self.skills
            .iter()
            .any(|skill| skill.to_lowercase().contains(&category))
    }

    /// Human-readable position: the area, plus GPS when known
    pub fn location_label(&self) -> String {
        match self.location {
            Some(point) => format!("{} ({})", self.area, point),
            None => self.area.clone(),
        }
    }

    // ===== Getters =====

    pub fn worker_id(&self) -> &str {
        &self.worker_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn area(&self) -> &str {
        &self.area
    }

    pub fn location(&self) -> Option<GeoPoint> {
        self.location
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn performance(&self) -> f64 {
        self.performance
    }

    pub fn tasks_completed(&self) -> u32 {
        self.tasks_completed
    }

    pub fn duty_status(&self) -> DutyStatus {
        self.duty_status
    }
}
