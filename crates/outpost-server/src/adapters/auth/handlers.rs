//! Auth Request/Response Handlers
//!
//! The per-system strategy pair registered for the auth service. The
//! request side snapshots arguments through the shared resolver; the
//! response side applies terminal outcomes to the persisted record.

use std::sync::Arc;

use async_trait::async_trait;

use outpost::{
    OutboundCall, OutboundError, RecordFailureCommand, RecordRepository, RecordRequest,
    RecordSuccessCommand, RequestHandler, RequestResolver, ResponseHandler,
};

use crate::application::AUTH_SYSTEM;

/// Request-side snapshot strategy for the auth service.
pub struct AuthRequestHandler {
    resolver: RequestResolver,
}

impl AuthRequestHandler {
    pub fn new() -> Self {
        Self {
            resolver: RequestResolver::new(),
        }
    }
}

impl Default for AuthRequestHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestHandler for AuthRequestHandler {
    fn system(&self) -> &str {
        AUTH_SYSTEM
    }

    fn resolve(&self, call: &OutboundCall) -> RecordRequest {
        self.resolver.resolve(call)
    }
}

/// Response-side bookkeeping strategy for the auth service. Consumed on
/// the event bus workers, never on the interception path.
pub struct AuthResponseHandler {
    records: Arc<dyn RecordRepository>,
}

impl AuthResponseHandler {
    pub fn new(records: Arc<dyn RecordRepository>) -> Self {
        Self { records }
    }

    /// Load the record if it still needs an outcome. Missing records and
    /// records already in a terminal status are soft no-ops.
    async fn load_pending(
        &self,
        record_id: i64,
    ) -> Result<Option<outpost::OutboundRecord>, OutboundError> {
        let Some(record) = self.records.find_by_id(record_id).await? else {
            tracing::warn!(record_id, "outcome for unknown record, skipping");
            return Ok(None);
        };
        if record.status.is_terminal() {
            tracing::warn!(
                record_id,
                status = record.status.as_str(),
                "record already closed, skipping outcome"
            );
            return Ok(None);
        }
        Ok(Some(record))
    }
}

#[async_trait]
impl ResponseHandler for AuthResponseHandler {
    fn system(&self) -> &str {
        AUTH_SYSTEM
    }

    async fn handle_success(&self, command: RecordSuccessCommand) -> Result<(), OutboundError> {
        let Some(mut record) = self.load_pending(command.record_id).await? else {
            return Ok(());
        };
        record.mark_success(&command);
        self.records.update(&record).await?;
        tracing::info!(record_id = command.record_id, "record closed as SUCCESS");
        Ok(())
    }

    async fn handle_failure(&self, command: RecordFailureCommand) -> Result<(), OutboundError> {
        let Some(mut record) = self.load_pending(command.record_id).await? else {
            return Ok(());
        };
        record.mark_failed(&command);
        self.records.update(&record).await?;
        tracing::info!(
            record_id = command.record_id,
            error = %command.error_message,
            "record closed as FAILED"
        );
        Ok(())
    }
}
