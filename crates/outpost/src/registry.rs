//! Strategy Registries
//!
//! Immutable lookup tables from system name (or system + endpoint) to a
//! strategy implementation, built once at startup from the full set of
//! registered strategies. Request/response handling must exist for
//! every integrated system, so a miss there is a fatal configuration
//! error. Per-endpoint validation is opt-in, so a miss there means
//! pass-through.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::errors::OutboundError;
use crate::ports::handlers::{RequestHandler, ResponseHandler};
use crate::ports::validation::ValidationStrategy;

/// Exact-match registry keyed by system name.
pub struct HandlerRegistry<T: ?Sized> {
    kind: &'static str,
    entries: HashMap<String, Arc<T>>,
}

impl<T: ?Sized> HandlerRegistry<T> {
    fn build_keyed(
        kind: &'static str,
        handlers: Vec<Arc<T>>,
        key_of: impl Fn(&T) -> String,
    ) -> Result<Self, OutboundError> {
        let mut entries = HashMap::with_capacity(handlers.len());
        for handler in handlers {
            let key = key_of(&handler);
            if entries.insert(key.clone(), handler).is_some() {
                return Err(OutboundError::Configuration(format!(
                    "duplicate {kind} for system {key}"
                )));
            }
        }
        Ok(Self { kind, entries })
    }

    /// Look up the strategy for a system. A miss is a configuration
    /// error and must surface immediately.
    pub fn get(&self, system: &str) -> Result<Arc<T>, OutboundError> {
        self.entries.get(system).cloned().ok_or_else(|| {
            OutboundError::Configuration(format!("no {} registered for system {system}", self.kind))
        })
    }

    pub fn systems(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl HandlerRegistry<dyn RequestHandler> {
    pub fn request_handlers(
        handlers: Vec<Arc<dyn RequestHandler>>,
    ) -> Result<Self, OutboundError> {
        Self::build_keyed("request handler", handlers, |h| h.system().to_string())
    }
}

impl HandlerRegistry<dyn ResponseHandler> {
    pub fn response_handlers(
        handlers: Vec<Arc<dyn ResponseHandler>>,
    ) -> Result<Self, OutboundError> {
        Self::build_keyed("response handler", handlers, |h| h.system().to_string())
    }
}

/// Registry of validation strategies keyed `system:endpoint`.
pub struct ValidatorRegistry {
    entries: HashMap<String, Arc<dyn ValidationStrategy>>,
}

impl ValidatorRegistry {
    pub fn build(strategies: Vec<Arc<dyn ValidationStrategy>>) -> Result<Self, OutboundError> {
        let mut entries = HashMap::with_capacity(strategies.len());
        for strategy in strategies {
            let key = Self::key(strategy.system(), strategy.endpoint());
            if entries.insert(key.clone(), strategy).is_some() {
                return Err(OutboundError::Configuration(format!(
                    "duplicate validation strategy for {key}"
                )));
            }
        }
        Ok(Self { entries })
    }

    /// `None` means no validation is defined for the pair, which the
    /// caller must treat as pass-through, never as a failure.
    pub fn get(&self, system: &str, endpoint: &str) -> Option<Arc<dyn ValidationStrategy>> {
        self.entries.get(&Self::key(system, endpoint)).cloned()
    }

    fn key(system: &str, endpoint: &str) -> String {
        format!("{system}:{endpoint}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::{OutboundCall, RecordRequest};
    use crate::domain::value_objects::CallContext;
    use crate::resolver::RequestResolver;

    struct StubRequestHandler {
        system: String,
    }

    impl RequestHandler for StubRequestHandler {
        fn system(&self) -> &str {
            &self.system
        }

        fn resolve(&self, call: &OutboundCall) -> RecordRequest {
            RequestResolver::new().resolve(call)
        }
    }

    struct StubValidator {
        system: String,
        endpoint: String,
    }

    impl ValidationStrategy for StubValidator {
        fn system(&self) -> &str {
            &self.system
        }

        fn endpoint(&self) -> &str {
            &self.endpoint
        }

        fn validate(
            &self,
            _response: &serde_json::Value,
            _context: &CallContext,
        ) -> Result<(), OutboundError> {
            Ok(())
        }
    }

    fn request_handler(system: &str) -> Arc<dyn RequestHandler> {
        Arc::new(StubRequestHandler {
            system: system.to_string(),
        })
    }

    #[test]
    fn lookup_hits_registered_system() {
        let registry =
            HandlerRegistry::request_handlers(vec![request_handler("AuthService")]).unwrap();
        assert!(registry.get("AuthService").is_ok());
    }

    #[test]
    fn missing_system_is_a_configuration_error() {
        let registry =
            HandlerRegistry::request_handlers(vec![request_handler("AuthService")]).unwrap();
        let err = registry.get("UnknownSystem").err().unwrap();
        assert!(matches!(err, OutboundError::Configuration(_)));
    }

    #[test]
    fn duplicate_registration_fails_at_build() {
        let result = HandlerRegistry::request_handlers(vec![
            request_handler("AuthService"),
            request_handler("AuthService"),
        ]);
        assert!(matches!(result, Err(OutboundError::Configuration(_))));
    }

    #[test]
    fn validator_miss_is_none_not_error() {
        let registry = ValidatorRegistry::build(vec![Arc::new(StubValidator {
            system: "AuthService".to_string(),
            endpoint: "/api/v1/login".to_string(),
        })])
        .unwrap();

        assert!(registry.get("AuthService", "/api/v1/login").is_some());
        assert!(registry.get("AuthService", "/api/v1/other").is_none());
        assert!(registry.get("OtherSystem", "/api/v1/login").is_none());
    }
}
