use crate::types::plan::Domain;
use thiserror::Error;

/// Main error type for the planner
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid trip request: {0}")]
    InvalidRequest(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} error: {message}")]
    Api { status: u16, message: String },

    #[error("Rate limit exceeded: retry after {retry_after}s")]
    RateLimit { retry_after: u64 },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{domain} step failed: {source}")]
    StepFailed {
        domain: Domain,
        #[source]
        source: Box<PlannerError>,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// Wrap a model-invocation failure with the domain it happened in
    pub fn step_failed(domain: Domain, source: PlannerError) -> Self {
        PlannerError::StepFailed {
            domain,
            source: Box::new(source),
        }
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::Config(_) => "CONFIG_ERROR",
            PlannerError::InvalidRequest(_) => "INVALID_REQUEST",
            PlannerError::Http(_) => "HTTP_ERROR",
            PlannerError::Api { .. } => "API_ERROR",
            PlannerError::RateLimit { .. } => "RATE_LIMIT_ERROR",
            PlannerError::InvalidResponse(_) => "INVALID_RESPONSE",
            PlannerError::Serialization(_) => "SERIALIZATION_ERROR",
            PlannerError::Io(_) => "IO_ERROR",
            PlannerError::StepFailed { .. } => "STEP_FAILED",
        }
    }

    /// The domain whose model call failed, if this is a step failure
    pub fn failed_domain(&self) -> Option<Domain> {
        match self {
            PlannerError::StepFailed { domain, .. } => Some(*domain),
            _ => None,
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_failed_keeps_domain_and_source() {
        let err = PlannerError::step_failed(
            Domain::Hotel,
            PlannerError::Api {
                status: 401,
                message: "invalid api key".to_string(),
            },
        );

        assert_eq!(err.error_code(), "STEP_FAILED");
        assert_eq!(err.failed_domain(), Some(Domain::Hotel));
        assert!(err.to_string().contains("hotel"));
        assert!(err.to_string().contains("invalid api key"));
    }

    #[test]
    fn test_error_payload() {
        let err = PlannerError::InvalidRequest("destination is required".to_string());
        let payload = err.to_error_payload();
        assert_eq!(payload["error"]["code"], "INVALID_REQUEST");
        assert!(payload["error"]["message"]
            .as_str()
            .unwrap()
            .contains("destination"));
    }
}
