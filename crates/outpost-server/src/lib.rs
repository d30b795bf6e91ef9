//! Outpost API Server
//!
//! Wires the interception pipeline: strategy registries built at
//! startup, the outcome event bus, the audited auth service facade and
//! the HTTP boundary. Postgres backs the record store when
//! DATABASE_URL is set; otherwise the in-memory store is used for
//! development.

use std::sync::Arc;

use anyhow::Context;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use outpost::{
    EventBus, EventBusConfig, ExceptionMapperChain, HandlerRegistry, InMemoryRecordStore,
    Interceptor, OutboundError, OutcomeEventHandler, RecordRepository, ValidatorRegistry,
};

pub mod adapters;
pub mod application;
pub mod config;
pub mod models;
pub mod routes;

use adapters::{
    AuthExceptionMapper, AuthRequestHandler, AuthResponseHandler, HttpAuthClient,
    PgRecordRepository,
};
use application::{AuthService, AuthTransport};
use config::AppConfig;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
}

/// Assemble the pipeline around a record store and a transport. The
/// registries are built here, once; a duplicate or missing registration
/// surfaces before the server accepts traffic.
pub fn build_with_transport(
    records: Arc<dyn RecordRepository>,
    events: EventBusConfig,
    transport: Arc<dyn AuthTransport>,
) -> Result<(AppState, EventBus), OutboundError> {
    let request_handlers = Arc::new(HandlerRegistry::request_handlers(vec![Arc::new(
        AuthRequestHandler::new(),
    )])?);
    let response_handlers = Arc::new(HandlerRegistry::response_handlers(vec![Arc::new(
        AuthResponseHandler::new(records.clone()),
    )])?);
    let validators = Arc::new(ValidatorRegistry::build(vec![Arc::new(
        adapters::LoginTokenValidation,
    )])?);

    let bus = EventBus::spawn(
        Arc::new(OutcomeEventHandler::new(response_handlers)),
        events,
    );

    let interceptor = Arc::new(Interceptor::new(
        request_handlers,
        validators,
        records,
        bus.publisher(),
    ));

    let state = AppState {
        auth_service: Arc::new(AuthService::new(interceptor, transport)),
    };
    Ok((state, bus))
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(routes::swagger::ApiDoc::openapi())
}

/// Build the full router with shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(routes::auth::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run the server until the listener fails, then drain the event bus.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let records: Arc<dyn RecordRepository> = match &config.database_url {
        Some(url) => {
            let pool = sqlx::PgPool::connect(url)
                .await
                .context("failed to connect to Postgres")?;
            sqlx::migrate!()
                .run(&pool)
                .await
                .context("failed to run database migrations")?;
            tracing::info!("database migrations completed");
            Arc::new(PgRecordRepository::new(pool))
        }
        None => {
            tracing::warn!("no DATABASE_URL set, records are kept in memory");
            Arc::new(InMemoryRecordStore::new())
        }
    };

    let mappers = Arc::new(ExceptionMapperChain::with_default_fallback(vec![Arc::new(
        AuthExceptionMapper,
    )]));
    let transport = Arc::new(HttpAuthClient::new(config.auth.clone(), mappers));

    let (state, bus) = build_with_transport(records, config.events.clone(), transport)?;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "outpost server listening");

    axum::serve(listener, router(state)).await?;

    bus.close().await;
    Ok(())
}
