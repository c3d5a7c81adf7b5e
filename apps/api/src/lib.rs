//! Waste Dispatch API Library
//!
//! This library provides the core functionality for the waste dispatch
//! service, including the complaint domain, the LLM-backed assignment
//! optimizer, repositories and the HTTP layer.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod optimizer;
