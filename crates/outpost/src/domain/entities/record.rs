//! OutboundRecord - Audit Record for one Outbound Call
//!
//! One row per intercepted call to an external system, created PENDING
//! before the call executes and moved to exactly one terminal status by
//! the response handler that observes the outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::commands::{RecordFailureCommand, RecordRequest, RecordSuccessCommand};

/// Call status. Transitions only Pending→Success or Pending→Failed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordStatus {
    Pending,
    Success,
    Failed,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::str::FromStr for RecordStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "SUCCESS" => Ok(Self::Success),
            "FAILED" => Ok(Self::Failed),
            other => Err(format!("unknown record status: {other}")),
        }
    }
}

/// Audit record for one outbound API call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundRecord {
    /// Store-assigned identifier, immutable after creation
    pub id: i64,
    /// External system name
    pub system: String,
    /// HTTP method (GET / POST / ...), known once the transport ran
    pub http_method: Option<String>,
    /// Logical method name of the intercepted call
    pub method: String,
    /// Final endpoint URL, known once the transport ran
    pub url: Option<String>,
    /// Request snapshot (size-capped JSON)
    pub request_body: Option<String>,
    /// Response snapshot, set on completion
    pub response_body: Option<String>,
    /// Error message, set on failure
    pub error_message: Option<String>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OutboundRecord {
    /// Create the initial PENDING record from the request snapshot.
    /// The id is a placeholder until the store assigns one.
    pub fn pending(request: RecordRequest) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            system: request.system,
            http_method: None,
            method: request.method,
            url: None,
            request_body: request.request_body,
            response_body: None,
            error_message: None,
            status: RecordStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Transition to SUCCESS and fill in the response-side fields.
    pub fn mark_success(&mut self, command: &RecordSuccessCommand) {
        self.status = RecordStatus::Success;
        self.response_body = command.response_body.clone();
        self.url = Some(command.endpoint.clone());
        self.http_method = Some(command.http_method.clone());
        self.updated_at = Utc::now();
    }

    /// Transition to FAILED and record the error.
    pub fn mark_failed(&mut self, command: &RecordFailureCommand) {
        self.status = RecordStatus::Failed;
        self.error_message = Some(command.error_message.clone());
        self.response_body = command.response_body.clone();
        self.url = Some(command.endpoint.clone());
        self.http_method = Some(command.http_method.clone());
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RecordRequest {
        RecordRequest {
            system: "AuthService".to_string(),
            method: "login".to_string(),
            request_body: Some(r#"[{"username":"u"}]"#.to_string()),
            request_params: None,
            path_variables: None,
        }
    }

    #[test]
    fn pending_record_has_no_response_fields() {
        let record = OutboundRecord::pending(request());
        assert_eq!(record.status, RecordStatus::Pending);
        assert!(record.response_body.is_none());
        assert!(record.error_message.is_none());
        assert!(record.url.is_none());
    }

    #[test]
    fn mark_success_fills_response_side() {
        let mut record = OutboundRecord::pending(request());
        record.mark_success(&RecordSuccessCommand {
            record_id: 1,
            endpoint: "https://auth/api/v1/login".to_string(),
            http_method: "POST".to_string(),
            response_body: Some(r#"{"token":"t1"}"#.to_string()),
        });
        assert_eq!(record.status, RecordStatus::Success);
        assert_eq!(record.http_method.as_deref(), Some("POST"));
        assert!(record.response_body.is_some());
        assert!(record.error_message.is_none());
    }

    #[test]
    fn mark_failed_records_error_message() {
        let mut record = OutboundRecord::pending(request());
        record.mark_failed(&RecordFailureCommand {
            record_id: 1,
            endpoint: "https://auth/api/v1/login".to_string(),
            http_method: "POST".to_string(),
            error_message: "HTTP_500: boom".to_string(),
            response_body: None,
        });
        assert_eq!(record.status, RecordStatus::Failed);
        assert_eq!(record.error_message.as_deref(), Some("HTTP_500: boom"));
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            RecordStatus::Pending,
            RecordStatus::Success,
            RecordStatus::Failed,
        ] {
            assert_eq!(status.as_str().parse::<RecordStatus>().unwrap(), status);
        }
    }
}
