//! Request / Response Handler Ports
//!
//! Per-system strategies selected by registry lookup. A request handler
//! and a response handler must exist for every integrated system;
//! missing registrations are configuration errors, not runtime
//! conditions.

use async_trait::async_trait;

use crate::domain::commands::{
    OutboundCall, RecordFailureCommand, RecordRequest, RecordSuccessCommand,
};
use crate::domain::errors::OutboundError;

/// Resolves an intercepted call into a recordable request snapshot.
pub trait RequestHandler: Send + Sync {
    /// The system this handler is registered for.
    fn system(&self) -> &str;

    /// Build the request snapshot. Must not fail; serialization problems
    /// degrade to a fallback representation inside the resolver.
    fn resolve(&self, call: &OutboundCall) -> RecordRequest;
}

/// Applies a terminal outcome to the persisted record.
#[async_trait]
pub trait ResponseHandler: Send + Sync {
    /// The system this handler is registered for.
    fn system(&self) -> &str;

    /// Transition the record to SUCCESS. A missing record is a soft
    /// no-op: the caller already has its result and must not be failed
    /// by bookkeeping.
    async fn handle_success(&self, command: RecordSuccessCommand) -> Result<(), OutboundError>;

    /// Transition the record to FAILED. Same no-op rule for missing
    /// records.
    async fn handle_failure(&self, command: RecordFailureCommand) -> Result<(), OutboundError>;
}
