//! Environment-driven configuration
//!
//! Values come from the process environment, optionally seeded from a
//! `.env` file by `main`.

use std::net::SocketAddr;
use std::path::PathBuf;

use reqwest::Url;
use secrecy::SecretString;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1/";
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings for the structured completion provider
#[derive(Debug)]
pub struct LlmSettings {
    pub api_key: SecretString,
    /// Always ends with `/` so endpoint paths can be joined onto it
    pub base_url: Url,
    pub model: String,
    /// Applied to every request; there is no separate cancellation
    pub request_timeout_ms: u64,
    pub temperature: f32,
}

#[derive(Debug)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub llm: LlmSettings,
    pub seed_path: Option<PathBuf>,
}

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "BIND_ADDR",
                value: bind_raw.clone(),
                reason: e.to_string(),
            })?;

        let api_key = get("LLM_API_KEY").ok_or(ConfigError::Missing("LLM_API_KEY"))?;

        let base_raw = get("LLM_BASE_URL").unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string());
        let base_url = parse_base_url(&base_raw)?;

        let model = get("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string());

        let request_timeout_ms = match get("LLM_REQUEST_TIMEOUT_MS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        key: "LLM_REQUEST_TIMEOUT_MS",
                        value: raw,
                        reason: "must be greater than zero".to_string(),
                    })
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        key: "LLM_REQUEST_TIMEOUT_MS",
                        value: raw,
                        reason: e.to_string(),
                    })
                }
            },
            None => DEFAULT_REQUEST_TIMEOUT_MS,
        };

        let temperature = match get("LLM_TEMPERATURE") {
            Some(raw) => match raw.trim().parse::<f32>() {
                Ok(t) if (0.0..=2.0).contains(&t) => t,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "LLM_TEMPERATURE",
                        value: raw,
                        reason: "expected a number between 0 and 2".to_string(),
                    })
                }
            },
            None => DEFAULT_TEMPERATURE,
        };

        Ok(Self {
            bind_addr,
            llm: LlmSettings {
                api_key: SecretString::new(api_key.into()),
                base_url,
                model,
                request_timeout_ms,
                temperature,
            },
            seed_path: get("SEED_DATA_PATH").map(PathBuf::from),
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };

    Url::parse(&normalized).map_err(|e| ConfigError::Invalid {
        key: "LLM_BASE_URL",
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
