use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::builder::{build_assignment_request, build_work_order_request, AssignmentRequest};
use super::errors::{FailureCause, OptimizationError, OptimizationResult};
use super::provider::StructuredCompletionProvider;
use super::schema::StructuredOutput;
use super::types::{
    AssignmentPlan, CandidateAgent, Optimization, RatedAgent, SkipReason, WorkItem, WorkOrderPlan,
};

/// Client that turns complaints and workers into validated assignment plans
///
/// One provider call per invocation, no retries. Serializing concurrent
/// triggers is the caller's job (see `DispatchService`).
#[derive(Clone)]
pub struct AssignmentOptimizer {
    provider: Arc<dyn StructuredCompletionProvider>,
}

impl AssignmentOptimizer {
    pub fn new(provider: Arc<dyn StructuredCompletionProvider>) -> Self {
        Self { provider }
    }

    /// Ask for a plan that gives every work item exactly one agent
    ///
    /// Returns `Skipped` without calling the provider when there is nothing
    /// to assign or nobody to assign it to. Suggestions naming unknown IDs
    /// are passed through; the applier drops them.
    pub async fn optimize_assignments(
        &self,
        work_items: &[WorkItem],
        agents: &[CandidateAgent],
    ) -> OptimizationResult<Optimization<AssignmentPlan>> {
        if work_items.is_empty() {
            info!("No work items supplied, skipping assignment optimization");
            return Ok(Optimization::Skipped(SkipReason::NoWorkItems));
        }
        if agents.is_empty() {
            info!("No agents supplied, skipping assignment optimization");
            return Ok(Optimization::Skipped(SkipReason::NoAgents));
        }

        let request = build_assignment_request(work_items, agents);
        let plan: AssignmentPlan = self.invoke(&request).await?;

        info!(
            work_items = work_items.len(),
            suggestions = plan.assignments.len(),
            "Received assignment plan"
        );
        Ok(Optimization::Completed(plan))
    }

    /// Rank agents for one free-text work order
    ///
    /// Suggestions for agents that were not offered are discarded.
    pub async fn suggest_for_work_order(
        &self,
        description: &str,
        agents: &[RatedAgent],
    ) -> OptimizationResult<Optimization<WorkOrderPlan>> {
        if description.trim().is_empty() {
            info!("Empty work order description, skipping suggestion request");
            return Ok(Optimization::Skipped(SkipReason::NoWorkItems));
        }
        if agents.is_empty() {
            info!("No agents supplied, skipping suggestion request");
            return Ok(Optimization::Skipped(SkipReason::NoAgents));
        }

        let request = build_work_order_request(description, agents);
        let mut plan: WorkOrderPlan = self.invoke(&request).await?;

        let known: HashSet<&str> = agents.iter().map(|a| a.agent_id.as_str()).collect();
        plan.suggested_assignments.retain(|suggestion| {
            let keep = known.contains(suggestion.agent_id.as_str());
            if !keep {
                warn!(
                    agent_id = %suggestion.agent_id,
                    "Dropping suggestion for unknown agent"
                );
            }
            keep
        });

        Ok(Optimization::Completed(plan))
    }

    async fn invoke<T: StructuredOutput>(&self, request: &AssignmentRequest) -> OptimizationResult<T> {
        debug!(
            template = %request.template.name,
            version = %request.template.version,
            schema = request.schema.name,
            prompt_len = request.prompt.len(),
            "Sending structured completion request"
        );

        let payload = self
            .provider
            .complete(&request.to_completion_request())
            .await
            .map_err(|e| {
                warn!(error = %e, schema = request.schema.name, "Completion provider failed");
                OptimizationError::failed(e)
            })?;

        if payload.is_null() {
            warn!(schema = request.schema.name, "Completion provider returned null");
            return Err(OptimizationError::failed(FailureCause::EmptyResult(
                "provider returned null".to_string(),
            )));
        }

        T::from_structured(payload).map_err(|violation| {
            warn!(
                path = %violation.path,
                reason = %violation.message,
                schema = request.schema.name,
                "Completion did not match the declared schema"
            );
            OptimizationError::failed(violation)
        })
    }
}
