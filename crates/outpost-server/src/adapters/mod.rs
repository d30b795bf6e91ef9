//! Infrastructure Adapters
//!
//! Concrete implementations of the domain ports: the Postgres record
//! store and the auth service integration (HTTP client, per-system
//! strategies, exception mapper).

pub mod auth;
pub mod postgres;

pub use auth::{
    AuthExceptionMapper, AuthRequestHandler, AuthResponseHandler, HttpAuthClient,
    LoginTokenValidation,
};
pub use postgres::PgRecordRepository;
