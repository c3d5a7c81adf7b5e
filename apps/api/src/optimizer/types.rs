use serde::{Deserialize, Serialize};

use crate::domain::complaint::Complaint;
use crate::domain::worker::Worker;

/// A complaint as the optimizer sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: String,
    pub location: String,
    pub category: String,
}

impl From<&Complaint> for WorkItem {
    fn from(complaint: &Complaint) -> Self {
        Self {
            id: complaint.id().to_string(),
            location: complaint.location().to_string(),
            category: complaint.waste_category().to_string(),
        }
    }
}

/// A worker offered to the batch optimizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateAgent {
    pub agent_id: String,
    pub name: String,
    pub skills: Vec<String>,
    pub area: String,
}

impl From<&Worker> for CandidateAgent {
    fn from(worker: &Worker) -> Self {
        Self {
            agent_id: worker.worker_id().to_string(),
            name: worker.name().to_string(),
            skills: worker.skills().to_vec(),
            area: worker.area().to_string(),
        }
    }
}

/// A worker offered for a single free-text work order
///
/// `past_performance` uses the 0-100 scale of [`Worker::performance`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedAgent {
    pub agent_id: String,
    pub location: String,
    pub skills: Vec<String>,
    pub past_performance: f64,
}

impl From<&Worker> for RatedAgent {
    fn from(worker: &Worker) -> Self {
        Self {
            agent_id: worker.worker_id().to_string(),
            location: worker.location_label(),
            skills: worker.skills().to_vec(),
            past_performance: worker.performance(),
        }
    }
}

/// One complaint-to-worker pairing proposed by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentSuggestion {
    pub work_item_id: String,
    pub agent_id: String,
    pub rationale: String,
}

/// Validated batch response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentPlan {
    pub assignments: Vec<AssignmentSuggestion>,
    pub summary: String,
}

/// One ranked candidate for a free-text work order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderSuggestion {
    pub agent_id: String,
    pub reasoning: String,
    /// Always within 0.0..=1.0 once validated
    pub confidence_score: f64,
}

/// Validated single-order response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderPlan {
    pub suggested_assignments: Vec<WorkOrderSuggestion>,
}

/// Why an optimization request never reached the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Nothing is waiting for a worker
    NoWorkItems,
    /// Nobody is available to take the work
    NoAgents,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoWorkItems => write!(f, "There are no pending complaints to assign."),
            SkipReason::NoAgents => write!(f, "There are no available workers."),
        }
    }
}

/// Outcome of an optimizer call that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum Optimization<T> {
    /// The provider answered with a validated plan
    Completed(T),
    /// Short-circuited before any provider call
    Skipped(SkipReason),
}

impl<T> Optimization<T> {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Optimization::Skipped(_))
    }

    /// Returns the plan, if one was produced
    pub fn completed(self) -> Option<T> {
        match self {
            Optimization::Completed(plan) => Some(plan),
            Optimization::Skipped(_) => None,
        }
    }
}
