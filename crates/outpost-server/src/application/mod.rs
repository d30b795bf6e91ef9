//! Application Services

pub mod auth_service;

pub use auth_service::{AuthService, AuthTransport, AUTH_SYSTEM, LOGIN_ENDPOINT, PERMISSIONS_ENDPOINT};
