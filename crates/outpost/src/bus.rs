//! Outcome Event Bus
//!
//! Bounded work queue plus a small worker pool consuming outcome
//! events, so record updates never block the interception path. Events
//! are fire-and-forget: `publish` only enqueues, and every failure on
//! the consuming side is absorbed with a log line because the original
//! caller already has its result.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::domain::errors::OutboundError;
use crate::domain::events::{Outcome, OutcomeEvent};
use crate::ports::events::EventPublisher;
use crate::ports::handlers::ResponseHandler;
use crate::registry::HandlerRegistry;

/// Bus sizing.
#[derive(Debug, Clone)]
pub struct EventBusConfig {
    /// Queue capacity; publishes beyond this are rejected, not blocked
    pub capacity: usize,
    /// Number of consumer tasks
    pub workers: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            capacity: 256,
            workers: 2,
        }
    }
}

/// Translates outcome events into record updates via the response
/// handler registered for the event's system.
pub struct OutcomeEventHandler {
    response_handlers: Arc<HandlerRegistry<dyn ResponseHandler>>,
}

impl OutcomeEventHandler {
    pub fn new(response_handlers: Arc<HandlerRegistry<dyn ResponseHandler>>) -> Self {
        Self { response_handlers }
    }

    /// Consume one event. Never propagates: the async path absorbs its
    /// own failures.
    pub async fn handle(&self, event: OutcomeEvent) {
        let handler = match self.response_handlers.get(&event.system) {
            Ok(handler) => handler,
            Err(err) => {
                tracing::error!(
                    system = %event.system,
                    event_id = %event.event_id,
                    error = %err,
                    "no response handler for outcome event"
                );
                return;
            }
        };

        let record_id = event.record_id();
        let result = match event.outcome {
            Outcome::Succeeded(command) => handler.handle_success(command).await,
            Outcome::Failed(command) => handler.handle_failure(command).await,
        };

        if let Err(err) = result {
            tracing::warn!(record_id, error = %err, "outcome handling failed");
        }
    }
}

/// Bounded queue + worker pool. Owns the worker tasks; hand out
/// [`EventBus::publisher`] clones to producers.
pub struct EventBus {
    tx: mpsc::Sender<OutcomeEvent>,
    handles: Vec<JoinHandle<()>>,
}

impl EventBus {
    pub fn spawn(handler: Arc<OutcomeEventHandler>, config: EventBusConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.capacity.max(1));
        let rx = Arc::new(Mutex::new(rx));

        let handles = (0..config.workers.max(1))
            .map(|worker| {
                let rx = rx.clone();
                let handler = handler.clone();
                tokio::spawn(async move {
                    loop {
                        // Lock only to receive; handling runs unlocked so
                        // workers consume in parallel.
                        let event = { rx.lock().await.recv().await };
                        match event {
                            Some(event) => handler.handle(event).await,
                            None => break,
                        }
                    }
                    tracing::debug!(worker, "outcome worker stopped");
                })
            })
            .collect();

        Self { tx, handles }
    }

    /// Publisher handle for the interception path.
    pub fn publisher(&self) -> Arc<dyn EventPublisher> {
        Arc::new(BusPublisher {
            tx: self.tx.clone(),
        })
    }

    /// Drop the bus-owned sender and wait for the workers to drain the
    /// queue. Outstanding publisher clones must be dropped first or the
    /// workers keep waiting for more events.
    pub async fn close(self) {
        drop(self.tx);
        for handle in self.handles {
            let _ = handle.await;
        }
    }
}

struct BusPublisher {
    tx: mpsc::Sender<OutcomeEvent>,
}

impl EventPublisher for BusPublisher {
    fn publish(&self, event: OutcomeEvent) -> Result<(), OutboundError> {
        self.tx.try_send(event).map_err(|err| match err {
            TrySendError::Full(event) => OutboundError::Publish(format!(
                "outcome queue full, dropping event {}",
                event.event_id
            )),
            TrySendError::Closed(event) => OutboundError::Publish(format!(
                "outcome queue closed, dropping event {}",
                event.event_id
            )),
        })
    }
}
