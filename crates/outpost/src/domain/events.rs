//! Outcome Events
//!
//! Asynchronous envelopes around outcome commands, used when record
//! updates are deferred off the calling task.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::commands::{RecordFailureCommand, RecordSuccessCommand};

/// Terminal outcome of one intercepted call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Succeeded(RecordSuccessCommand),
    Failed(RecordFailureCommand),
}

/// Event delivered to the worker pool for asynchronous bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeEvent {
    /// Unique event id, for tracing and log correlation
    pub event_id: Uuid,
    /// External system the call went to
    pub system: String,
    pub outcome: Outcome,
}

impl OutcomeEvent {
    pub fn succeeded(system: impl Into<String>, command: RecordSuccessCommand) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            system: system.into(),
            outcome: Outcome::Succeeded(command),
        }
    }

    pub fn failed(system: impl Into<String>, command: RecordFailureCommand) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            system: system.into(),
            outcome: Outcome::Failed(command),
        }
    }

    /// Record id this event targets, for logging.
    pub fn record_id(&self) -> i64 {
        match &self.outcome {
            Outcome::Succeeded(c) => c.record_id,
            Outcome::Failed(c) => c.record_id,
        }
    }
}
