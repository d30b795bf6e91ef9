//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa. The document is served
//! as plain JSON at /api-docs/openapi.json.

use utoipa::OpenApi;

use crate::models::{
    ErrorResponse, LoginRequest, LoginResponse, PermissionData, PermissionResponse, TokenData,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::auth::login,
        super::auth::permission,
    ),
    components(schemas(
        LoginRequest,
        LoginResponse,
        TokenData,
        PermissionData,
        PermissionResponse,
        ErrorResponse,
    )),
    tags(
        (name = "Auth", description = "Audited calls to the external auth service")
    ),
    info(
        title = "Outpost API",
        description = "Outbound call interception and audit pipeline"
    )
)]
pub struct ApiDoc;
