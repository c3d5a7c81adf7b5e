use thiserror::Error;

use super::provider::ProviderError;
use super::schema::SchemaViolation;

/// Underlying reason an optimization failed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FailureCause {
    #[error("transport failure: {0}")]
    Transport(#[source] ProviderError),

    #[error("schema validation failure at {0}")]
    SchemaValidation(#[from] SchemaViolation),

    #[error("empty result: {0}")]
    EmptyResult(String),
}

impl From<ProviderError> for FailureCause {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::Empty(reason) => FailureCause::EmptyResult(reason),
            ProviderError::InvalidPayload(reason) => {
                FailureCause::SchemaValidation(SchemaViolation::new("$", reason))
            }
            other => FailureCause::Transport(other),
        }
    }
}

/// Errors that can occur while asking the provider for assignments
///
/// Every failure collapses into one category. Callers that need more than
/// the message can inspect [`OptimizationError::cause`].
#[derive(Debug, Error)]
pub enum OptimizationError {
    #[error("Optimization failed: {message}")]
    OptimizationFailed {
        message: String,
        #[source]
        cause: FailureCause,
    },
}

impl OptimizationError {
    pub fn failed(cause: impl Into<FailureCause>) -> Self {
        let cause = cause.into();
        Self::OptimizationFailed {
            message: cause.to_string(),
            cause,
        }
    }

    pub fn cause(&self) -> &FailureCause {
        match self {
            OptimizationError::OptimizationFailed { cause, .. } => cause,
        }
    }
}

pub type OptimizationResult<T> = Result<T, OptimizationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_provider_result_maps_to_empty_cause() {
        let cause = FailureCause::from(ProviderError::Empty("refused".to_string()));
        assert_eq!(cause, FailureCause::EmptyResult("refused".to_string()));
    }

    #[test]
    fn invalid_payload_maps_to_schema_validation() {
        let cause = FailureCause::from(ProviderError::InvalidPayload("eof".to_string()));
        assert!(matches!(cause, FailureCause::SchemaValidation(_)));
    }

    #[test]
    fn network_errors_map_to_transport() {
        let cause = FailureCause::from(ProviderError::RateLimited);
        assert_eq!(cause, FailureCause::Transport(ProviderError::RateLimited));
    }

    #[test]
    fn failed_carries_cause_in_message() {
        let error = OptimizationError::failed(ProviderError::Timeout(500));

        assert!(error.to_string().contains("timed out after 500 ms"));
        assert!(matches!(error.cause(), FailureCause::Transport(_)));
    }
}
