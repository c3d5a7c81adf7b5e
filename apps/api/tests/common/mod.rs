//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Notify;

use waste_dispatch_api::domain::complaint::{Complaint, WasteCategory};
use waste_dispatch_api::domain::worker::Worker;
use waste_dispatch_api::optimizer::{CompletionRequest, ProviderError, StructuredCompletionProvider};

/// Provider that replies with a fixed payload and records every call
pub struct MockProvider {
    reply: Mutex<Result<Value, ProviderError>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
    gate: Option<Gate>,
}

/// Lets a test hold a provider call open
#[derive(Clone, Default)]
pub struct Gate {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl MockProvider {
    pub fn replying(reply: Result<Value, ProviderError>) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(reply),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            gate: None,
        })
    }

    pub fn gated(reply: Result<Value, ProviderError>, gate: Gate) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(reply),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            gate: Some(gate),
        })
    }

    pub fn set_reply(&self, reply: Result<Value, ProviderError>) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl StructuredCompletionProvider for MockProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<Value, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        self.reply.lock().unwrap().clone()
    }
}

pub fn complaint(id: &str, location: &str, category: WasteCategory) -> Complaint {
    Complaint::new(id, "Test Reporter", location, category, None)
        .expect("valid complaint")
        .0
}

pub fn worker(id: &str, name: &str, area: &str, skills: &[&str]) -> Worker {
    Worker::new(
        id,
        name,
        area,
        skills.iter().map(|s| s.to_string()).collect(),
        85.0,
    )
    .expect("valid worker")
}
