// Worker domain module
// Field staff who can be put on complaints

#![allow(clippy::module_inception)]

pub mod value_objects;
pub mod worker;

pub use value_objects::DutyStatus;
pub use worker::Worker;
