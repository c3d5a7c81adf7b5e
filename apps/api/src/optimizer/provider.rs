use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Everything a provider needs for one structured completion
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    /// Identifier for the schema, echoed in provider logs
    pub schema_name: String,
    /// JSON Schema the response must follow
    pub schema: Value,
}

/// Errors raised by a completion provider
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Provider returned no result: {0}")]
    Empty(String),

    #[error("Completion is not valid JSON: {0}")]
    InvalidPayload(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// A generative text service that can be held to a JSON Schema
///
/// Implementations make exactly one request per call. Retrying, caching
/// and rate limiting are left to the transport.
#[async_trait]
pub trait StructuredCompletionProvider: Send + Sync {
    /// Executes one structured completion and returns the decoded JSON payload
    async fn complete(&self, request: &CompletionRequest) -> Result<Value, ProviderError>;
}
