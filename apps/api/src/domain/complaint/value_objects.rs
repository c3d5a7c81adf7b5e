use serde::{Deserialize, Serialize};

/// Represents the lifecycle status of a complaint
///
/// # Status Transitions
/// ```text
/// Pending -> InProgress -> Completed
/// Pending -> Completed
/// InProgress -> InProgress   (reassignment)
/// Completed -> InProgress    (reopened)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    /// Reported and waiting for a worker
    Pending,
    /// A worker has been assigned
    InProgress,
    /// Resolved
    Completed,
}

impl ComplaintStatus {
    /// Checks if a transition from current status to next status is valid
    ///
    /// # Valid Transitions
    /// - Pending -> InProgress
    /// - InProgress -> InProgress
    /// - Pending -> Completed
    /// - InProgress -> Completed
    /// - Completed -> InProgress
    ///
    /// # Example
    /// ```
    /// use waste_dispatch_api::domain::complaint::ComplaintStatus;
    ///
    /// assert!(ComplaintStatus::Pending.can_transition_to(ComplaintStatus::InProgress));
    /// assert!(!ComplaintStatus::Completed.can_transition_to(ComplaintStatus::Pending));
    /// ```
    pub fn can_transition_to(&self, next: ComplaintStatus) -> bool {
        use ComplaintStatus::*;
        matches!(
            (self, next),
            (Pending, InProgress)
                | (InProgress, InProgress)
                | (Pending, Completed)
                | (InProgress, Completed)
                | (Completed, InProgress)
        )
    }
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComplaintStatus::Pending => write!(f, "pending"),
            ComplaintStatus::InProgress => write!(f, "in_progress"),
            ComplaintStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Kind of waste a complaint is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WasteCategory {
    Organic,
    Recyclable,
    Hazardous,
    Mixed,
}

impl std::fmt::Display for WasteCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WasteCategory::Organic => write!(f, "Organic"),
            WasteCategory::Recyclable => write!(f, "Recyclable"),
            WasteCategory::Hazardous => write!(f, "Hazardous"),
            WasteCategory::Mixed => write!(f, "Mixed"),
        }
    }
}
