//! Domain Entities

mod record;

pub use record::{OutboundRecord, RecordStatus};
