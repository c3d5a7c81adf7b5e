// Assignment optimizer
//
// Builds prompts from pending complaints and available workers, asks a
// structured-output LLM for assignments, validates the reply against the
// declared schema and merges the result into complaint state.

#![allow(clippy::module_inception)]

pub mod applier;
pub mod builder;
pub mod dispatch;
pub mod errors;
pub mod optimizer;
pub mod prompts;
pub mod provider;
pub mod schema;
pub mod types;

// Re-export main types
pub use applier::{apply_assignments, ApplyReport, DropReason, DroppedSuggestion};
pub use dispatch::{BatchOutcome, DispatchError, DispatchService};
pub use errors::{FailureCause, OptimizationError};
pub use optimizer::AssignmentOptimizer;
pub use provider::{CompletionRequest, ProviderError, StructuredCompletionProvider};
pub use types::{
    AssignmentPlan, AssignmentSuggestion, CandidateAgent, Optimization, RatedAgent, SkipReason,
    WorkItem, WorkOrderPlan, WorkOrderSuggestion,
};
