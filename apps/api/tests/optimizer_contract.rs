//! Contract tests for the assignment optimizer
//!
//! These tests drive the optimizer and dispatch service through a mock
//! completion provider and verify:
//! - No provider call when there is nothing to do
//! - Plans validate against their own schema
//! - Merging is idempotent and ignores dangling references
//! - Malformed responses never change complaint state

mod common;

use std::sync::Arc;

use serde_json::json;

use common::{complaint, worker, MockProvider};
use waste_dispatch_api::domain::complaint::{ComplaintStatus, WasteCategory};
use waste_dispatch_api::domain::repositories::ComplaintRepository;
use waste_dispatch_api::infrastructure::repositories::{
    InMemoryComplaintRepository, InMemoryWorkerRepository,
};
use waste_dispatch_api::optimizer::schema::{assignment_plan_schema, StructuredOutput};
use waste_dispatch_api::optimizer::{
    apply_assignments, AssignmentOptimizer, AssignmentPlan, AssignmentSuggestion, BatchOutcome,
    CandidateAgent, DispatchError, DispatchService, DropReason, FailureCause, Optimization,
    ProviderError, SkipReason, WorkItem,
};

fn hazardous_c1() -> WorkItem {
    WorkItem {
        id: "C1".to_string(),
        location: "Sector 17".to_string(),
        category: "Hazardous".to_string(),
    }
}

fn asha() -> CandidateAgent {
    CandidateAgent {
        agent_id: "W1".to_string(),
        name: "Asha".to_string(),
        skills: vec!["Hazardous Waste Handling".to_string()],
        area: "Sector 17".to_string(),
    }
}

fn service_with(
    provider: Arc<MockProvider>,
) -> (Arc<InMemoryComplaintRepository>, DispatchService) {
    let complaints = Arc::new(InMemoryComplaintRepository::with_complaints(vec![
        complaint("C1", "Sector 17", WasteCategory::Hazardous),
        complaint("C2", "Ward 3", WasteCategory::Organic),
    ]));
    let workers = Arc::new(InMemoryWorkerRepository::with_workers(vec![
        worker("W1", "Asha", "Sector 17", &["Hazardous Waste Handling"]),
        worker("W2", "Binod", "Ward 3", &["Organic Composting"]),
    ]));
    let service = DispatchService::new(complaints.clone(), workers, provider);
    (complaints, service)
}

// =============================================================================
// No-op on empty input
// =============================================================================

#[tokio::test]
async fn test_empty_work_items_skip_without_provider_call() {
    let provider = MockProvider::replying(Ok(json!({ "assignments": [], "summary": "" })));
    let optimizer = AssignmentOptimizer::new(provider.clone());

    let result = optimizer.optimize_assignments(&[], &[asha()]).await.unwrap();

    assert_eq!(result, Optimization::Skipped(SkipReason::NoWorkItems));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_batch_run_with_no_pending_complaints_is_skipped() {
    let provider = MockProvider::replying(Ok(json!({})));
    let complaints = Arc::new(InMemoryComplaintRepository::new());
    let workers = Arc::new(InMemoryWorkerRepository::with_workers(vec![worker(
        "W1", "Asha", "Sector 17", &[],
    )]));
    let service = DispatchService::new(complaints, workers, provider.clone());

    let outcome = service.run_batch_optimization().await.unwrap();

    assert_eq!(outcome, BatchOutcome::Skipped(SkipReason::NoWorkItems));
    assert_eq!(provider.calls(), 0);
}

// =============================================================================
// Schema round trip
// =============================================================================

#[test]
fn test_valid_plan_round_trips_through_schema() {
    let plan = AssignmentPlan {
        assignments: vec![AssignmentSuggestion {
            work_item_id: "C1".to_string(),
            agent_id: "W1".to_string(),
            rationale: "Same sector and trained for hazardous waste".to_string(),
        }],
        summary: "Matched by sector".to_string(),
    };
    let value = serde_json::to_value(&plan).unwrap();

    assert!(assignment_plan_schema().validate(&value).is_ok());
    assert_eq!(AssignmentPlan::from_structured(value).unwrap(), plan);
}

#[test]
fn test_strict_schema_lists_every_field_as_required() {
    let schema = assignment_plan_schema().to_json_schema();
    let item = &schema["properties"]["assignments"]["items"];

    assert_eq!(schema["additionalProperties"], false);
    assert_eq!(schema["required"], json!(["assignments", "summary"]));
    assert_eq!(item["required"], json!(["workItemId", "agentId", "rationale"]));
    assert_eq!(item["additionalProperties"], false);
}

// =============================================================================
// Idempotent merge and dangling references
// =============================================================================

fn binod() -> CandidateAgent {
    CandidateAgent {
        agent_id: "W2".to_string(),
        name: "Binod".to_string(),
        skills: vec![],
        area: "Ward 3".to_string(),
    }
}

#[test]
fn test_applying_twice_matches_applying_once() {
    let suggestions = vec![
        AssignmentSuggestion {
            work_item_id: "C1".to_string(),
            agent_id: "W1".to_string(),
            rationale: "nearby".to_string(),
        },
        AssignmentSuggestion {
            work_item_id: "C1".to_string(),
            agent_id: "W2".to_string(),
            rationale: "free this afternoon".to_string(),
        },
    ];
    let roster = [asha(), binod()];
    let mut once = vec![complaint("C1", "Sector 17", WasteCategory::Hazardous)];
    let first = apply_assignments(&mut once, &suggestions, &roster);
    let mut twice = once.clone();

    let second = apply_assignments(&mut twice, &suggestions, &roster);

    assert_eq!(once, twice);
    assert_eq!(once[0].assigned_worker(), Some("W2"));
    assert_eq!(first.events.len(), 1);
    assert!(second.events.is_empty());
    assert_eq!(second.dropped[0].reason, DropReason::Superseded);
}

#[test]
fn test_dangling_references_are_dropped_and_rest_applied() {
    let mut collection = vec![complaint("C1", "Sector 17", WasteCategory::Hazardous)];
    let suggestions = vec![
        AssignmentSuggestion {
            work_item_id: "C9".to_string(),
            agent_id: "W1".to_string(),
            rationale: "invented complaint".to_string(),
        },
        AssignmentSuggestion {
            work_item_id: "C1".to_string(),
            agent_id: "W7".to_string(),
            rationale: "invented worker".to_string(),
        },
        AssignmentSuggestion {
            work_item_id: "C1".to_string(),
            agent_id: "W1".to_string(),
            rationale: "same sector".to_string(),
        },
    ];

    let report = apply_assignments(&mut collection, &suggestions, &[asha()]);

    assert_eq!(report.dropped.len(), 2);
    assert_eq!(report.dropped[0].reason, DropReason::UnknownWorkItem);
    assert_eq!(report.dropped[1].reason, DropReason::UnknownAgent);
    assert_eq!(collection[0].assigned_worker(), Some("W1"));
}

// =============================================================================
// Malformed responses
// =============================================================================

#[tokio::test]
async fn test_missing_rationale_fails_without_partial_merge() {
    let provider = MockProvider::replying(Ok(json!({
        "assignments": [
            { "workItemId": "C1", "agentId": "W1", "rationale": "same sector" },
            { "workItemId": "C2", "agentId": "W2" }
        ],
        "summary": "two assignments"
    })));
    let (complaints, service) = service_with(provider);

    let err = service.run_batch_optimization().await.unwrap_err();

    match err {
        DispatchError::Optimization(e) => match e.cause() {
            FailureCause::SchemaValidation(violation) => {
                assert_eq!(violation.path, "$.assignments[1].rationale");
            }
            other => panic!("Expected schema violation, got {:?}", other),
        },
        other => panic!("Expected optimization failure, got {:?}", other),
    }
    let pending = complaints
        .find_by_status(ComplaintStatus::Pending)
        .await
        .unwrap();
    assert_eq!(pending.len(), 2);
}

#[tokio::test]
async fn test_blank_rationale_is_rejected() {
    let provider = MockProvider::replying(Ok(json!({
        "assignments": [ { "workItemId": "C1", "agentId": "W1", "rationale": "   " } ],
        "summary": "s"
    })));
    let optimizer = AssignmentOptimizer::new(provider);

    let err = optimizer
        .optimize_assignments(&[hazardous_c1()], &[asha()])
        .await
        .unwrap_err();

    assert!(matches!(err.cause(), FailureCause::SchemaValidation(_)));
}

#[tokio::test]
async fn test_transport_failure_leaves_state_untouched() {
    let provider = MockProvider::replying(Err(ProviderError::Timeout(60_000)));
    let (complaints, service) = service_with(provider);
    let before = complaints.find_all().await.unwrap();

    let err = service.run_batch_optimization().await.unwrap_err();

    assert!(matches!(err, DispatchError::Optimization(_)));
    assert_eq!(complaints.find_all().await.unwrap(), before);
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn test_hazardous_complaint_goes_to_skilled_worker() {
    let provider = MockProvider::replying(Ok(json!({
        "assignments": [
            { "workItemId": "C1", "agentId": "W1", "rationale": "W1 covers Sector 17 and handles hazardous waste" }
        ],
        "summary": "Matched hazardous complaint to the certified worker in the same sector"
    })));
    let (complaints, service) = service_with(provider.clone());

    let outcome = service.run_batch_optimization().await.unwrap();

    let BatchOutcome::Applied { summary, report, .. } = outcome else {
        panic!("Expected applied outcome");
    };
    assert!(summary.contains("hazardous"));
    assert_eq!(report.applied.len(), 1);
    let c1 = complaints.find_by_id("C1").await.unwrap().unwrap();
    assert_eq!(c1.status(), ComplaintStatus::InProgress);
    assert_eq!(c1.assigned_worker(), Some("W1"));

    let request = provider.last_request().unwrap();
    assert!(request
        .prompt
        .contains("- Complaint ID: C1, Location: Sector 17, Category: Hazardous"));
    assert!(request.prompt.contains("Skills: Hazardous Waste Handling"));
}

#[tokio::test]
async fn test_unknown_complaint_is_dropped_and_summary_surfaced() {
    let provider = MockProvider::replying(Ok(json!({
        "assignments": [
            { "workItemId": "C9", "agentId": "W1", "rationale": "closest worker" }
        ],
        "summary": "Assigned the outstanding complaint"
    })));
    let (complaints, service) = service_with(provider);
    let before = complaints.find_all().await.unwrap();

    let outcome = service.run_batch_optimization().await.unwrap();

    let BatchOutcome::Applied { summary, report, .. } = outcome else {
        panic!("Expected applied outcome");
    };
    assert_eq!(summary, "Assigned the outstanding complaint");
    assert!(report.applied.is_empty());
    assert_eq!(report.dropped.len(), 1);
    assert_eq!(report.dropped[0].suggestion.work_item_id, "C9");
    assert_eq!(complaints.find_all().await.unwrap(), before);
}
