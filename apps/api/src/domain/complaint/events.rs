/// Domain events that occur within the Complaint aggregate
///
/// Each event marks a change an operator would want to see in the audit
/// trail: a complaint being filed, a crew being put on it, or the complaint
/// being closed and reopened.
///
/// # Example
/// ```
/// use waste_dispatch_api::domain::complaint::ComplaintEvent;
///
/// let event = ComplaintEvent::Completed {
///     complaint_id: "C1".to_string(),
/// };
/// assert_eq!(event.complaint_id(), "C1");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ComplaintEvent {
    /// Fired when a complaint is registered
    Filed {
        /// ID of the new complaint
        complaint_id: String,
        /// Where the waste was reported
        location: String,
    },
    /// Fired when a worker is put on a complaint
    Assigned {
        /// ID of the assigned complaint
        complaint_id: String,
        /// Worker now responsible for it
        worker_id: String,
        /// Worker that held it before, if this was a reassignment
        previous_worker: Option<String>,
    },
    /// Fired when a complaint is marked resolved
    Completed {
        /// ID of the resolved complaint
        complaint_id: String,
    },
    /// Fired when a resolved complaint is opened again
    Reopened {
        /// ID of the reopened complaint
        complaint_id: String,
    },
}

impl ComplaintEvent {
    /// Returns the complaint_id for this event
    pub fn complaint_id(&self) -> &str {
        match self {
            ComplaintEvent::Filed { complaint_id, .. } => complaint_id,
            ComplaintEvent::Assigned { complaint_id, .. } => complaint_id,
            ComplaintEvent::Completed { complaint_id } => complaint_id,
            ComplaintEvent::Reopened { complaint_id } => complaint_id,
        }
    }
}
