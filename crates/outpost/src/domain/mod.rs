//! Domain Layer
//!
//! Entities, value objects, commands, events and errors for the
//! outbound call audit pipeline.

pub mod commands;
pub mod entities;
pub mod errors;
pub mod events;
pub mod value_objects;

pub use commands::{OutboundCall, RecordFailureCommand, RecordRequest, RecordSuccessCommand};
pub use entities::{OutboundRecord, RecordStatus};
pub use errors::{codes, OutboundError};
pub use events::{Outcome, OutcomeEvent};
pub use value_objects::{CallContext, ContextGuard, ContextHandle, ContextSlot};
