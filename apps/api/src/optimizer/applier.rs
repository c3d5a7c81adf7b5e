use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use super::types::{AssignmentSuggestion, CandidateAgent};
use crate::domain::complaint::{Complaint, ComplaintEvent};

/// Why a suggestion was not merged
#[derive(Debug, Clone, PartialEq)]
pub enum DropReason {
    /// No complaint in the collection has this ID
    UnknownWorkItem,
    /// The worker was not part of the request
    UnknownAgent,
    /// A later suggestion names the same complaint
    Superseded,
    /// The complaint changed while the provider was working
    ChangedDuringRun,
    /// The complaint refused the assignment
    Rejected(String),
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DropReason::UnknownWorkItem => write!(f, "unknown complaint"),
            DropReason::UnknownAgent => write!(f, "unknown worker"),
            DropReason::Superseded => write!(f, "superseded by a later suggestion"),
            DropReason::ChangedDuringRun => write!(f, "complaint changed during optimization"),
            DropReason::Rejected(reason) => write!(f, "{}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DroppedSuggestion {
    pub suggestion: AssignmentSuggestion,
    pub reason: DropReason,
}

/// What happened to each suggestion during a merge
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplyReport {
    /// Suggestions now reflected in the collection, including no-op repeats
    pub applied: Vec<AssignmentSuggestion>,
    pub dropped: Vec<DroppedSuggestion>,
    /// Events for complaints whose state actually changed
    pub events: Vec<ComplaintEvent>,
}

impl ApplyReport {
    /// IDs of complaints that changed, in merge order without repeats
    pub fn changed_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.events
            .iter()
            .map(ComplaintEvent::complaint_id)
            .filter(|id| seen.insert(*id))
            .collect()
    }

    fn drop_suggestion(&mut self, suggestion: &AssignmentSuggestion, reason: DropReason) {
        warn!(
            complaint_id = %suggestion.work_item_id,
            worker_id = %suggestion.agent_id,
            reason = %reason,
            "Dropping suggestion"
        );
        self.dropped.push(DroppedSuggestion {
            suggestion: suggestion.clone(),
            reason,
        });
    }
}

/// Merge a validated plan into a complaint collection
///
/// Suggestions naming a complaint missing from `complaints`, or a worker
/// missing from `roster`, are dropped and logged. When several valid
/// suggestions name the same complaint only the last one is merged; the
/// earlier ones are reported as superseded. A complaint that refuses the
/// transition is left as it was.
///
/// Each complaint is mutated at most once per call, so applying the same
/// suggestions twice leaves the collection as after the first pass.
pub fn apply_assignments(
    complaints: &mut [Complaint],
    suggestions: &[AssignmentSuggestion],
    roster: &[CandidateAgent],
) -> ApplyReport {
    let known_agents: HashSet<&str> = roster.iter().map(|a| a.agent_id.as_str()).collect();
    let mut report = ApplyReport::default();

    // Index of the last valid suggestion per complaint
    let mut winners: HashMap<&str, usize> = HashMap::new();
    let mut valid: Vec<usize> = Vec::with_capacity(suggestions.len());
    for (index, suggestion) in suggestions.iter().enumerate() {
        if !complaints.iter().any(|c| c.id() == suggestion.work_item_id) {
            report.drop_suggestion(suggestion, DropReason::UnknownWorkItem);
        } else if !known_agents.contains(suggestion.agent_id.as_str()) {
            report.drop_suggestion(suggestion, DropReason::UnknownAgent);
        } else {
            winners.insert(suggestion.work_item_id.as_str(), index);
            valid.push(index);
        }
    }

    for index in valid {
        let suggestion = &suggestions[index];
        if winners.get(suggestion.work_item_id.as_str()) != Some(&index) {
            report.drop_suggestion(suggestion, DropReason::Superseded);
            continue;
        }

        let Some(complaint) = complaints
            .iter_mut()
            .find(|c| c.id() == suggestion.work_item_id)
        else {
            continue;
        };

        match complaint.assign_worker(&suggestion.agent_id) {
            Ok(event) => {
                debug!(
                    complaint_id = %suggestion.work_item_id,
                    worker_id = %suggestion.agent_id,
                    changed = event.is_some(),
                    "Applied suggestion"
                );
                report.events.extend(event);
                report.applied.push(suggestion.clone());
            }
            Err(reason) => report.drop_suggestion(suggestion, DropReason::Rejected(reason)),
        }
    }

    report
}
