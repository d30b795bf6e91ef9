//! Auth Routes

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::models::{LoginRequest, LoginResponse, PermissionResponse};
use crate::routes::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct PermissionQuery {
    pub username: String,
}

/// Authenticate against the external auth service
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token pair, or an error envelope for remote failures", body = LoginResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let tokens = state.auth_service.login(payload).await?;
    Ok(Json(LoginResponse::success(tokens)))
}

/// Fetch permissions for a user from the external auth service
#[utoipa::path(
    get,
    path = "/permission",
    params(PermissionQuery),
    responses(
        (status = 200, description = "Permission payload, or an error envelope for remote failures", body = PermissionResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn permission(
    State(state): State<AppState>,
    Query(query): Query<PermissionQuery>,
) -> Result<Json<PermissionResponse>, ApiError> {
    let permissions = state.auth_service.permissions(query.username).await?;
    Ok(Json(PermissionResponse::success(permissions)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/permission", get(permission))
}
