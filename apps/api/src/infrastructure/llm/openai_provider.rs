//! Structured completions over an OpenAI-compatible chat API
//!
//! The request carries the output schema as a strict `json_schema`
//! response format, so the model's reply is a single JSON document.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::LlmSettings;
use crate::optimizer::provider::{CompletionRequest, ProviderError, StructuredCompletionProvider};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat<'a>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    json_schema: JsonSchemaFormat<'a>,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'a str,
    schema: &'a Value,
    strict: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    refusal: Option<String>,
}

/// Provider backed by any server speaking the `chat/completions` protocol
pub struct OpenAiStructuredProvider {
    client: Client,
    endpoint: Url,
    api_key: SecretString,
    model: String,
    temperature: f32,
    timeout_ms: u64,
}

impl OpenAiStructuredProvider {
    /// Creates a provider from settings
    ///
    /// Fails if the HTTP client cannot be built or the endpoint URL cannot
    /// be derived from `base_url`.
    pub fn new(settings: LlmSettings) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(settings.request_timeout_ms))
            .build()
            .map_err(|e| ProviderError::Configuration(format!("HTTP client: {}", e)))?;

        let endpoint = settings
            .base_url
            .join("chat/completions")
            .map_err(|e| ProviderError::Configuration(format!("Invalid URL join: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            api_key: settings.api_key,
            model: settings.model,
            temperature: settings.temperature,
            timeout_ms: settings.request_timeout_ms,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn body<'a>(&'a self, request: &'a CompletionRequest) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: &request.schema_name,
                    schema: &request.schema,
                    strict: true,
                },
            },
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout(self.timeout_ms)
        } else {
            ProviderError::Transport(e.to_string())
        }
    }
}

/// Pull the JSON payload out of a successful chat response
fn extract_payload(response: ChatResponse) -> Result<Value, ProviderError> {
    let message = response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message)
        .ok_or_else(|| ProviderError::Empty("response contained no choices".to_string()))?;

    if let Some(refusal) = message.refusal.filter(|r| !r.trim().is_empty()) {
        return Err(ProviderError::Empty(format!("model refused: {}", refusal)));
    }

    let content = message
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ProviderError::Empty("response content was empty".to_string()))?;

    serde_json::from_str(&content).map_err(|e| ProviderError::InvalidPayload(e.to_string()))
}

#[async_trait]
impl StructuredCompletionProvider for OpenAiStructuredProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<Value, ProviderError> {
        debug!(
            model = %self.model,
            schema = %request.schema_name,
            "Calling chat completions endpoint"
        );

        let res = self
            .client
            .post(self.endpoint.clone())
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&self.body(request))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = res.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("Completion provider rate limited the request");
            return Err(ProviderError::RateLimited);
        }
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Completion provider returned an error");
            return Err(ProviderError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let text = res.text().await.map_err(|e| self.map_send_error(e))?;
        let envelope: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        extract_payload(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings(base: &str) -> LlmSettings {
        LlmSettings {
            api_key: SecretString::new("sk-test".into()),
            base_url: Url::parse(base).unwrap(),
            model: "gpt-4o-mini".to_string(),
            request_timeout_ms: 1_000,
            temperature: 0.2,
        }
    }

    fn response(value: Value) -> ChatResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let provider = OpenAiStructuredProvider::new(settings("http://localhost:9000/v1/")).unwrap();

        assert_eq!(
            provider.endpoint().as_str(),
            "http://localhost:9000/v1/chat/completions"
        );
    }

    #[test]
    fn body_declares_strict_schema() {
        let provider = OpenAiStructuredProvider::new(settings("http://localhost/")).unwrap();
        let request = CompletionRequest {
            system: "You are a dispatcher.".to_string(),
            prompt: "Assign C1".to_string(),
            schema_name: "assignment_plan".to_string(),
            schema: json!({ "type": "object" }),
        };

        let body = serde_json::to_value(provider.body(&request)).unwrap();

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "Assign C1");
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["name"], "assignment_plan");
        assert_eq!(body["response_format"]["json_schema"]["strict"], true);
    }

    #[test]
    fn payload_is_parsed_from_content() {
        let payload = extract_payload(response(json!({
            "choices": [{ "message": { "content": "{\"summary\":\"ok\"}" } }]
        })))
        .unwrap();

        assert_eq!(payload["summary"], "ok");
    }

    #[test]
    fn no_choices_is_empty() {
        let err = extract_payload(response(json!({ "choices": [] }))).unwrap_err();

        assert!(matches!(err, ProviderError::Empty(_)));
    }

    #[test]
    fn refusal_is_empty() {
        let err = extract_payload(response(json!({
            "choices": [{ "message": { "content": null, "refusal": "I can't help with that" } }]
        })))
        .unwrap_err();

        assert!(matches!(err, ProviderError::Empty(msg) if msg.contains("refused")));
    }

    #[test]
    fn non_json_content_is_invalid_payload() {
        let err = extract_payload(response(json!({
            "choices": [{ "message": { "content": "Sure! Here are the assignments." } }]
        })))
        .unwrap_err();

        assert!(matches!(err, ProviderError::InvalidPayload(_)));
    }
}
