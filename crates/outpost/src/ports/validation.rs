//! Response Validation Port
//!
//! Business-success checks over decoded responses. A strategy is scoped
//! to exactly one (system, endpoint) pair; registering one is opt-in,
//! and absence means pass-through.

use crate::domain::errors::OutboundError;
use crate::domain::value_objects::CallContext;

/// Per-endpoint business validation of a decoded response.
///
/// Strategies are side-effect free with respect to the record: they
/// only inspect the payload and fail with a uniform error, leaving all
/// recording to the interceptor.
pub trait ValidationStrategy: Send + Sync {
    /// The system this strategy belongs to.
    fn system(&self) -> &str;

    /// The endpoint path this strategy validates (e.g. /api/v1/login).
    fn endpoint(&self) -> &str;

    /// Return Ok for business success, or a `Remote` error when the
    /// payload signals failure despite transport success.
    fn validate(&self, response: &serde_json::Value, context: &CallContext)
        -> Result<(), OutboundError>;
}
