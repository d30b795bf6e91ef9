//! API DTOs
//!
//! Request/response bodies for the HTTP boundary and the upstream auth
//! service wire format. Successful boundary responses wrap their data
//! in a `{code, message, data}` envelope; failures use the flat
//! `{code, message}` shape.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Credentials forwarded to the external auth service.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Token pair returned by the auth service. Either field may come back
/// null; the login validation strategy decides whether that is a
/// business failure.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenData {
    pub token: Option<String>,
    #[serde(rename = "refreshToken")]
    pub refresh_token: Option<String>,
}

/// Permission payload returned by the auth service, passed through
/// untouched. No validation strategy is registered for this endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PermissionData {
    pub data: Option<serde_json::Value>,
}

/// Successful login envelope at the API boundary.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub code: String,
    pub message: String,
    pub data: Option<TokenData>,
}

impl LoginResponse {
    pub fn success(data: TokenData) -> Self {
        Self {
            code: "200".to_string(),
            message: "Success".to_string(),
            data: Some(data),
        }
    }
}

/// Successful permission envelope at the API boundary.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PermissionResponse {
    pub code: String,
    pub message: String,
    pub data: Option<PermissionData>,
}

impl PermissionResponse {
    pub fn success(data: PermissionData) -> Self {
        Self {
            code: "200".to_string(),
            message: "Success".to_string(),
            data: Some(data),
        }
    }
}

/// Uniform error envelope at the API boundary.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable code, e.g. `FEIGN_FAILED` or `HTTP_500`
    pub code: String,
    pub message: String,
}
