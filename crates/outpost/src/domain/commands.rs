//! Outcome Commands
//!
//! The only inputs the record-update logic accepts. Handlers never see
//! raw errors or transport objects, only these normalized commands.

use serde::{Deserialize, Serialize};

/// Metadata of an intercepted call, captured before it executes.
#[derive(Debug, Clone)]
pub struct OutboundCall {
    pub system: String,
    pub method: String,
    pub args: Vec<serde_json::Value>,
}

/// Request-side snapshot resolved before the real call executes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordRequest {
    /// External system name (e.g. "AuthService")
    pub system: String,
    /// Logical method name of the intercepted call
    pub method: String,
    /// JSON serialization of all arguments, size-capped
    pub request_body: Option<String>,
    /// Map-typed arguments, merged (query-style calls)
    pub request_params: Option<String>,
    /// Primitive arguments recorded as a best-effort fallback
    pub path_variables: Option<String>,
}

/// Marks a record SUCCESS with the final response snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSuccessCommand {
    pub record_id: i64,
    pub endpoint: String,
    pub http_method: String,
    pub response_body: Option<String>,
}

/// Marks a record FAILED with the error message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordFailureCommand {
    pub record_id: i64,
    pub endpoint: String,
    pub http_method: String,
    pub error_message: String,
    pub response_body: Option<String>,
}
