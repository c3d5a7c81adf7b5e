use serde::{Deserialize, Serialize};

/// Whether a worker is currently on shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyStatus {
    OnDuty,
    OffDuty,
}

impl std::fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DutyStatus::OnDuty => write!(f, "on_duty"),
            DutyStatus::OffDuty => write!(f, "off_duty"),
        }
    }
}
