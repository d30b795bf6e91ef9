//! Exception Mapper Chain
//!
//! Ordered list of per-system mappers with a dedicated fallback slot.
//! The fallback accepts every system and is always evaluated last, so
//! resolution can never fail.

use std::sync::Arc;

use crate::domain::errors::{codes, OutboundError};
use crate::domain::value_objects::CallContext;
use crate::ports::mappers::ExceptionMapper;

/// Resolves the first mapper supporting a system, falling back to the
/// catch-all default.
pub struct ExceptionMapperChain {
    mappers: Vec<Arc<dyn ExceptionMapper>>,
    fallback: Arc<dyn ExceptionMapper>,
}

impl ExceptionMapperChain {
    /// Build the chain. `mappers` are evaluated in list order; the
    /// fallback sits in its own slot and always matches last.
    pub fn new(mappers: Vec<Arc<dyn ExceptionMapper>>, fallback: Arc<dyn ExceptionMapper>) -> Self {
        Self { mappers, fallback }
    }

    /// Default chain: no per-system mappers, default fallback.
    pub fn with_default_fallback(mappers: Vec<Arc<dyn ExceptionMapper>>) -> Self {
        Self::new(mappers, Arc::new(DefaultExceptionMapper))
    }

    pub fn resolve(&self, system: &str) -> &dyn ExceptionMapper {
        self.mappers
            .iter()
            .find(|mapper| mapper.supports(system))
            .unwrap_or(&self.fallback)
            .as_ref()
    }

    /// Resolve and map in one step.
    pub fn map(&self, status: u16, body: &str, context: &CallContext) -> OutboundError {
        self.resolve(&context.system).map(status, body, context)
    }
}

/// Catch-all mapper used when no per-system mapper matches.
pub struct DefaultExceptionMapper;

impl ExceptionMapper for DefaultExceptionMapper {
    fn supports(&self, _system: &str) -> bool {
        true
    }

    fn map(&self, status: u16, body: &str, context: &CallContext) -> OutboundError {
        if !(200..300).contains(&status) {
            return OutboundError::http_status(status, body);
        }
        OutboundError::remote(
            codes::REMOTE_FAILED,
            format!("call to external system {} failed", context.system),
        )
    }
}
