//! HTTP Routes
//!
//! - POST /login - audited login against the auth service
//! - GET  /permission?username= - audited permission lookup
//!
//! Remote failures render as HTTP 200 with a `{code, message}` envelope
//! so callers branch on the code, not the transport status. Internal
//! failures (configuration, repository) render as HTTP 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use outpost::OutboundError;

use crate::models::ErrorResponse;

pub mod auth;
pub mod swagger;

/// Boundary wrapper turning pipeline errors into the envelope.
pub struct ApiError(pub OutboundError);

impl From<OutboundError> for ApiError {
    fn from(err: OutboundError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let envelope = ErrorResponse {
            code: self.0.code().to_string(),
            message: self.0.to_string(),
        };
        let status = match self.0 {
            OutboundError::Remote { .. } => StatusCode::OK,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(envelope)).into_response()
    }
}
