//! Auth Service Integration
//!
//! Everything the pipeline needs to talk to the external auth service:
//! the reqwest transport, the request/response handler pair, the login
//! validation strategy and the per-system exception mapper.

pub mod client;
pub mod handlers;
pub mod mapper;
pub mod validation;

pub use client::HttpAuthClient;
pub use handlers::{AuthRequestHandler, AuthResponseHandler};
pub use mapper::AuthExceptionMapper;
pub use validation::LoginTokenValidation;
