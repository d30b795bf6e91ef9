//! Auth Application Service
//!
//! Wraps every call to the external auth service in the interception
//! pipeline: a PENDING record before the call, validation of the
//! decoded response, and an outcome event afterwards. The transport is
//! a trait so tests can drive the full pipeline without a network.

use std::sync::Arc;

use async_trait::async_trait;

use outpost::{ContextHandle, Interceptor, OutboundError};

use crate::models::{LoginRequest, PermissionData, TokenData};

/// System name every auth strategy registers under.
pub const AUTH_SYSTEM: &str = "AuthService";

/// Upstream login endpoint, also the validation strategy key.
pub const LOGIN_ENDPOINT: &str = "/api/v1/login";

/// Upstream permission lookup endpoint. No validation registered.
pub const PERMISSIONS_ENDPOINT: &str = "/api/v1/auth/permissions";

/// The actual wire calls to the auth service. Implementations must fill
/// the per-call context (method, URL, endpoint) before sending.
#[async_trait]
pub trait AuthTransport: Send + Sync {
    async fn login(
        &self,
        context: &ContextHandle,
        request: &LoginRequest,
    ) -> Result<TokenData, OutboundError>;

    async fn permissions(
        &self,
        context: &ContextHandle,
        username: &str,
    ) -> Result<PermissionData, OutboundError>;
}

/// Audited facade over the auth service.
pub struct AuthService {
    interceptor: Arc<Interceptor>,
    transport: Arc<dyn AuthTransport>,
}

impl AuthService {
    pub fn new(interceptor: Arc<Interceptor>, transport: Arc<dyn AuthTransport>) -> Self {
        Self {
            interceptor,
            transport,
        }
    }

    /// Authenticate against the auth service. A response with a null
    /// token or refresh token is rejected by the login validation
    /// strategy even though the transport succeeded.
    pub async fn login(&self, request: LoginRequest) -> Result<TokenData, OutboundError> {
        let args = vec![serde_json::to_value(&request).unwrap_or(serde_json::Value::Null)];
        let transport = self.transport.clone();
        self.interceptor
            .intercept(AUTH_SYSTEM, "login", args, |context| async move {
                transport.login(&context, &request).await
            })
            .await
    }

    /// Fetch permissions for a user. This endpoint has no validation
    /// strategy, so any decodable response passes through.
    pub async fn permissions(&self, username: String) -> Result<PermissionData, OutboundError> {
        let args = vec![serde_json::Value::String(username.clone())];
        let transport = self.transport.clone();
        self.interceptor
            .intercept(AUTH_SYSTEM, "permissions", args, |context| async move {
                transport.permissions(&context, &username).await
            })
            .await
    }
}
