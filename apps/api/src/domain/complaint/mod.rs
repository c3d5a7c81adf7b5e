// Complaint domain module
// Contains the complaint aggregate root, value objects, and domain events

#![allow(clippy::module_inception)]

pub mod complaint;
pub mod events;
pub mod value_objects;

// Re-export main types for convenience
pub use complaint::Complaint;
pub use events::ComplaintEvent;
pub use value_objects::{ComplaintStatus, WasteCategory};
