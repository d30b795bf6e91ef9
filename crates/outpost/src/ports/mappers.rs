//! Exception Mapper Port
//!
//! Converts raw failure data from a remote system into the uniform
//! internal error. Used for transport failures and for systems that
//! signal business failure through unconventional channels (e.g. HTTP
//! 200 with an error payload).

use crate::domain::errors::OutboundError;
use crate::domain::value_objects::CallContext;

/// Per-system failure normalization.
pub trait ExceptionMapper: Send + Sync {
    /// Whether this mapper handles the given system.
    fn supports(&self, system: &str) -> bool;

    /// Convert a raw failure (transport status + body) into the uniform
    /// error carrying a machine-readable code and a message.
    fn map(&self, status: u16, body: &str, context: &CallContext) -> OutboundError;
}
