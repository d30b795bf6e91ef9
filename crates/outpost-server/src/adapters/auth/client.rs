//! HTTP Auth Transport
//!
//! reqwest-based implementation of [`AuthTransport`]. Fills the per-call
//! context before sending, attaches the configured bearer token, and
//! normalizes every failure through the exception mapper chain.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use outpost::{codes, CallContext, ContextHandle, ExceptionMapperChain, OutboundError};

use crate::application::{AuthTransport, AUTH_SYSTEM, LOGIN_ENDPOINT, PERMISSIONS_ENDPOINT};
use crate::config::AuthServiceConfig;
use crate::models::{LoginRequest, PermissionData, TokenData};

pub struct HttpAuthClient {
    http: reqwest::Client,
    config: AuthServiceConfig,
    mappers: Arc<ExceptionMapperChain>,
}

impl HttpAuthClient {
    pub fn new(config: AuthServiceConfig, mappers: Arc<ExceptionMapperChain>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            mappers,
        }
    }

    fn context(&self, method: &str, endpoint: &str) -> CallContext {
        CallContext {
            system: AUTH_SYSTEM.to_string(),
            http_method: method.to_string(),
            url: format!("{}{}", self.config.endpoint, endpoint),
            endpoint: endpoint.to_string(),
        }
    }

    /// Read the response through the mapper chain: non-2xx statuses and
    /// 2xx bodies that fail to decode both become uniform errors.
    async fn decode<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        context: &CallContext,
    ) -> Result<T, OutboundError> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(&e))?;

        if !(200..300).contains(&status) {
            return Err(self.mappers.map(status, &body, context));
        }

        serde_json::from_str(&body).map_err(|err| {
            tracing::warn!(
                system = AUTH_SYSTEM,
                endpoint = %context.endpoint,
                error = %err,
                "undecodable 2xx body from auth service"
            );
            self.mappers.map(status, &body, context)
        })
    }
}

#[async_trait]
impl AuthTransport for HttpAuthClient {
    async fn login(
        &self,
        slot: &ContextHandle,
        request: &LoginRequest,
    ) -> Result<TokenData, OutboundError> {
        let context = self.context("POST", LOGIN_ENDPOINT);
        slot.set(context.clone());

        let response = self
            .http
            .post(&context.url)
            .bearer_auth(&self.config.token)
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        self.decode(response, &context).await
    }

    async fn permissions(
        &self,
        slot: &ContextHandle,
        username: &str,
    ) -> Result<PermissionData, OutboundError> {
        let context = self.context("GET", PERMISSIONS_ENDPOINT);
        slot.set(context.clone());

        let response = self
            .http
            .get(&context.url)
            .bearer_auth(&self.config.token)
            .query(&[("username", username)])
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        self.decode(response, &context).await
    }
}

/// Network-level failures have no status to map, so they carry the
/// stable remote-failure code directly.
fn transport_error(err: &reqwest::Error) -> OutboundError {
    OutboundError::remote(codes::REMOTE_FAILED, format!("transport error: {err}"))
}
