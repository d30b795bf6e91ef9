//! Event Publisher Port

use crate::domain::errors::OutboundError;
use crate::domain::events::OutcomeEvent;

/// Enqueues outcome events for asynchronous bookkeeping.
///
/// `publish` must not block the caller past enqueue time. Delivery is
/// fire-and-forget: a full queue is reported as an error but the
/// interception path treats it as log-worthy, never caller-visible.
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: OutcomeEvent) -> Result<(), OutboundError>;
}
