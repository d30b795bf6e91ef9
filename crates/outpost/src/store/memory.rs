//! In-Memory Record Store
//!
//! Default store when no database is configured, and the substrate for
//! pipeline tests. Same contract as the Postgres adapter: ids are
//! assigned on create, updates replace whole rows by id.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entities::OutboundRecord;
use crate::domain::errors::OutboundError;
use crate::ports::repositories::RecordRepository;

#[derive(Default)]
pub struct InMemoryRecordStore {
    records: RwLock<HashMap<i64, OutboundRecord>>,
    sequence: AtomicI64,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, for tests and diagnostics.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordRepository for InMemoryRecordStore {
    async fn create(&self, record: &OutboundRecord) -> Result<OutboundRecord, OutboundError> {
        let id = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let mut stored = record.clone();
        stored.id = id;
        self.records.write().await.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<OutboundRecord>, OutboundError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn update(&self, record: &OutboundRecord) -> Result<(), OutboundError> {
        let mut records = self.records.write().await;
        if let Some(existing) = records.get_mut(&record.id) {
            *existing = record.clone();
        }
        Ok(())
    }
}
