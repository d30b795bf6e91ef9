//! Value Objects

mod context;

pub use context::{CallContext, ContextGuard, ContextHandle, ContextSlot};
