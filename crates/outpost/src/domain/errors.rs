//! Domain Errors
//!
//! Error types for the outbound call pipeline.

use thiserror::Error;

/// Machine-readable error codes shared with callers of the API boundary.
pub mod codes {
    /// Business-level failure reported by a remote system (including the
    /// "HTTP 200 with an error payload" channel some systems use).
    pub const REMOTE_FAILED: &str = "FEIGN_FAILED";

    /// Transport-level failure code for a non-2xx status.
    pub fn http_status(status: u16) -> String {
        format!("HTTP_{status}")
    }
}

/// Errors produced by the interception pipeline.
#[derive(Debug, Error)]
pub enum OutboundError {
    /// Transport or business failure from a remote system, already
    /// normalized to a stable code/message pair.
    #[error("{code}: {message}")]
    Remote { code: String, message: String },

    /// A strategy lookup failed. This means an integration was deployed
    /// without registering its handlers and is intentionally fatal.
    #[error("missing registration: {0}")]
    Configuration(String),

    /// Record store failure.
    #[error("repository error: {0}")]
    Repository(String),

    /// The outcome event could not be enqueued.
    #[error("event publish failed: {0}")]
    Publish(String),
}

impl OutboundError {
    pub fn remote(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Remote {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Uniform error for a non-2xx response, carrying the raw body.
    pub fn http_status(status: u16, body: &str) -> Self {
        Self::Remote {
            code: codes::http_status(status),
            message: format!("HTTP Error: {status}, body={body}"),
        }
    }

    /// The stable code exposed at the API boundary.
    pub fn code(&self) -> &str {
        match self {
            Self::Remote { code, .. } => code,
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Repository(_) => "REPOSITORY_ERROR",
            Self::Publish(_) => "EVENT_PUBLISH_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_carries_code_and_body() {
        let err = OutboundError::http_status(503, "upstream down");
        assert_eq!(err.code(), "HTTP_503");
        assert!(err.to_string().contains("upstream down"));
    }

    #[test]
    fn remote_failure_uses_stable_code() {
        let err = OutboundError::remote(codes::REMOTE_FAILED, "token missing");
        assert_eq!(err.code(), "FEIGN_FAILED");
    }
}
