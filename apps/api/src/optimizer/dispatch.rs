use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use super::applier::{apply_assignments, ApplyReport, DropReason, DroppedSuggestion};
use super::errors::OptimizationError;
use super::optimizer::AssignmentOptimizer;
use super::provider::StructuredCompletionProvider;
use super::types::{CandidateAgent, Optimization, RatedAgent, SkipReason, WorkItem, WorkOrderPlan};
use crate::domain::complaint::{Complaint, ComplaintStatus};
use crate::domain::repositories::{ComplaintRepository, WorkerRepository};

/// Errors raised by dispatch operations
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Optimization(#[from] OptimizationError),

    #[error("An optimization run is already in progress")]
    AlreadyRunning,

    #[error("Complaint not found: {0}")]
    ComplaintNotFound(String),

    #[error("Worker not found: {0}")]
    WorkerNotFound(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Repository error: {0}")]
    Repository(String),
}

pub type DispatchResult<T> = Result<T, DispatchError>;

/// Result of a batch run that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    Applied {
        run_id: Uuid,
        summary: String,
        report: ApplyReport,
    },
    Skipped(SkipReason),
}

/// Coordinates complaints, workers and the optimizer
///
/// At most one optimization runs at a time; a second trigger while one is
/// waiting on the provider fails fast with `AlreadyRunning`. Every
/// load-mutate-save of complaints, manual or batch, holds `merge_lock`.
pub struct DispatchService {
    complaints: Arc<dyn ComplaintRepository>,
    workers: Arc<dyn WorkerRepository>,
    optimizer: AssignmentOptimizer,
    run_guard: Mutex<()>,
    merge_lock: Mutex<()>,
}

impl DispatchService {
    pub fn new(
        complaints: Arc<dyn ComplaintRepository>,
        workers: Arc<dyn WorkerRepository>,
        provider: Arc<dyn StructuredCompletionProvider>,
    ) -> Self {
        Self {
            complaints,
            workers,
            optimizer: AssignmentOptimizer::new(provider),
            run_guard: Mutex::new(()),
            merge_lock: Mutex::new(()),
        }
    }

    /// Assign every pending complaint to an on-duty worker
    ///
    /// Nothing is written unless the provider returns a valid plan. The
    /// merge runs against freshly loaded complaints; any complaint that is
    /// no longer pending by then keeps its current state and its
    /// suggestions are dropped as `ChangedDuringRun`.
    pub async fn run_batch_optimization(&self) -> DispatchResult<BatchOutcome> {
        let _guard = self
            .run_guard
            .try_lock()
            .map_err(|_| DispatchError::AlreadyRunning)?;
        let run_id = Uuid::new_v4();

        let pending = self
            .complaints
            .find_by_status(ComplaintStatus::Pending)
            .await
            .map_err(DispatchError::Repository)?;
        let available = self
            .workers
            .find_available()
            .await
            .map_err(DispatchError::Repository)?;

        let work_items: Vec<WorkItem> = pending.iter().map(WorkItem::from).collect();
        let agents: Vec<CandidateAgent> = available.iter().map(CandidateAgent::from).collect();
        info!(
            %run_id,
            work_items = work_items.len(),
            agents = agents.len(),
            "Starting batch assignment optimization"
        );

        let plan = match self.optimizer.optimize_assignments(&work_items, &agents).await {
            Ok(Optimization::Completed(plan)) => plan,
            Ok(Optimization::Skipped(reason)) => {
                info!(%run_id, %reason, "Batch optimization skipped");
                return Ok(BatchOutcome::Skipped(reason));
            }
            Err(e) => {
                warn!(%run_id, error = %e, "Batch optimization failed, no changes applied");
                return Err(e.into());
            }
        };

        let _merge = self.merge_lock.lock().await;

        let mut targets: Vec<Complaint> = Vec::with_capacity(work_items.len());
        let mut changed_meanwhile: HashSet<String> = HashSet::new();
        for item in &work_items {
            match self
                .complaints
                .find_by_id(&item.id)
                .await
                .map_err(DispatchError::Repository)?
            {
                Some(complaint) if complaint.status() == ComplaintStatus::Pending => {
                    targets.push(complaint);
                }
                _ => {
                    changed_meanwhile.insert(item.id.clone());
                }
            }
        }

        let (stale, fresh): (Vec<_>, Vec<_>) = plan
            .assignments
            .into_iter()
            .partition(|s| changed_meanwhile.contains(&s.work_item_id));

        let mut report = apply_assignments(&mut targets, &fresh, &agents);
        for suggestion in stale {
            warn!(
                %run_id,
                complaint_id = %suggestion.work_item_id,
                "Complaint changed during optimization, keeping its current state"
            );
            report.dropped.push(DroppedSuggestion {
                suggestion,
                reason: DropReason::ChangedDuringRun,
            });
        }
        let changed: Vec<Complaint> = {
            let ids = report.changed_ids();
            targets
                .into_iter()
                .filter(|c| ids.contains(&c.id()))
                .collect()
        };
        self.complaints
            .save_all(&changed)
            .await
            .map_err(DispatchError::Repository)?;

        info!(
            %run_id,
            applied = report.applied.len(),
            dropped = report.dropped.len(),
            changed = changed.len(),
            "Batch optimization applied"
        );

        Ok(BatchOutcome::Applied {
            run_id,
            summary: plan.summary,
            report,
        })
    }

    /// Rank on-duty workers for a free-text work order without changing state
    pub async fn suggest_for_work_order(
        &self,
        description: &str,
    ) -> DispatchResult<Optimization<WorkOrderPlan>> {
        let _guard = self
            .run_guard
            .try_lock()
            .map_err(|_| DispatchError::AlreadyRunning)?;

        let available = self
            .workers
            .find_available()
            .await
            .map_err(DispatchError::Repository)?;
        let agents: Vec<RatedAgent> = available.iter().map(RatedAgent::from).collect();

        Ok(self
            .optimizer
            .suggest_for_work_order(description, &agents)
            .await?)
    }

    /// Manually put a worker on a complaint
    pub async fn assign_worker(&self, complaint_id: &str, worker_id: &str) -> DispatchResult<Complaint> {
        let _merge = self.merge_lock.lock().await;
        let mut complaint = self.load_complaint(complaint_id).await?;

        self.workers
            .find_by_id(worker_id)
            .await
            .map_err(DispatchError::Repository)?
            .ok_or_else(|| DispatchError::WorkerNotFound(worker_id.to_string()))?;

        let event = complaint
            .assign_worker(worker_id)
            .map_err(DispatchError::InvalidTransition)?;

        if let Some(event) = event {
            self.complaints
                .save(&complaint)
                .await
                .map_err(DispatchError::Repository)?;
            info!(complaint_id, worker_id, ?event, "Worker assigned manually");
        }

        Ok(complaint)
    }

    /// Mark a complaint as resolved
    pub async fn complete_complaint(&self, complaint_id: &str) -> DispatchResult<Complaint> {
        let _merge = self.merge_lock.lock().await;
        let mut complaint = self.load_complaint(complaint_id).await?;
        let event = complaint
            .complete()
            .map_err(DispatchError::InvalidTransition)?;
        self.complaints
            .save(&complaint)
            .await
            .map_err(DispatchError::Repository)?;

        info!(complaint_id, ?event, "Complaint completed");
        Ok(complaint)
    }

    /// Reopen a resolved complaint
    pub async fn reopen_complaint(&self, complaint_id: &str) -> DispatchResult<Complaint> {
        let _merge = self.merge_lock.lock().await;
        let mut complaint = self.load_complaint(complaint_id).await?;
        let event = complaint
            .reopen()
            .map_err(DispatchError::InvalidTransition)?;
        self.complaints
            .save(&complaint)
            .await
            .map_err(DispatchError::Repository)?;

        info!(complaint_id, ?event, "Complaint reopened");
        Ok(complaint)
    }

    async fn load_complaint(&self, complaint_id: &str) -> DispatchResult<Complaint> {
        self.complaints
            .find_by_id(complaint_id)
            .await
            .map_err(DispatchError::Repository)?
            .ok_or_else(|| DispatchError::ComplaintNotFound(complaint_id.to_string()))
    }
}
