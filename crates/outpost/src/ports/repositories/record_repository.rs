//! OutboundRecord Repository Port
//!
//! Abstract interface for audit record persistence.

use async_trait::async_trait;

use crate::domain::entities::OutboundRecord;
use crate::domain::errors::OutboundError;

/// Repository interface for outbound call records.
///
/// The store assigns identifiers on create and updates whole rows by id.
/// A record is written once as PENDING and updated at most once with its
/// terminal status, so no locking beyond atomic update-by-id is needed.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Persist a new record. The input id is ignored; the returned
    /// record carries the store-assigned identifier.
    async fn create(&self, record: &OutboundRecord) -> Result<OutboundRecord, OutboundError>;

    /// Find a record by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<OutboundRecord>, OutboundError>;

    /// Replace the stored row for `record.id`. Updating an id that does
    /// not exist is a no-op.
    async fn update(&self, record: &OutboundRecord) -> Result<(), OutboundError>;
}
