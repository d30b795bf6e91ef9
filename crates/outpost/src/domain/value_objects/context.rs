//! CallContext - Per-call Transport Context
//!
//! The transport layer knows the HTTP method and resolved URL only at
//! request-build time, after the interceptor has already started the
//! call. `ContextSlot` is the hand-off point: the interceptor creates
//! one slot per call, the transport fills it in before sending, and the
//! interceptor reads it back when recording the outcome.
//!
//! The slot is scoped to exactly one call. `ContextGuard` clears it on
//! every exit path, so a reused slot handle can never leak context into
//! an unrelated call.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// Contextual data for one outbound call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallContext {
    /// External system name
    pub system: String,
    /// HTTP method (GET / POST / PUT / PATCH / DELETE)
    pub http_method: String,
    /// Fully resolved URL
    pub url: String,
    /// Endpoint path relative to the system base (e.g. /api/v1/login),
    /// used for validator selection
    pub endpoint: String,
}

/// Shared handle to the per-call context slot.
pub type ContextHandle = Arc<ContextSlot>;

/// Interior-mutability cell holding the context for one call in flight.
#[derive(Debug, Default)]
pub struct ContextSlot {
    inner: Mutex<Option<CallContext>>,
}

impl ContextSlot {
    pub fn new() -> ContextHandle {
        Arc::new(Self::default())
    }

    /// Set the context for the call in flight.
    pub fn set(&self, context: CallContext) {
        // A poisoned lock only happens if a panic hit mid-set; the
        // context is best-effort audit data, so recover the value.
        let mut slot = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(context);
    }

    /// Snapshot of the current context, if the transport set one.
    pub fn get(&self) -> Option<CallContext> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn clear(&self) {
        let mut slot = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }
}

/// Clears the slot when dropped, covering every interceptor exit path.
pub struct ContextGuard {
    slot: ContextHandle,
}

impl ContextGuard {
    pub fn new(slot: ContextHandle) -> Self {
        Self { slot }
    }
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        self.slot.clear();
    }
}
