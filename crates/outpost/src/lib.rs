//! Outpost Domain Library
//!
//! Core types and machinery for the outbound call audit pipeline:
//! every call to an external system is intercepted, recorded under an
//! at-most-one PENDING row, validated at the business level, and closed
//! out asynchronously through an outcome event bus.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal principles:
//!
//! - **Domain Layer** (`domain/`): entities, value objects, commands,
//!   events and errors
//! - **Ports** (`ports/`): abstract interfaces (traits) for persistence,
//!   per-system strategies, validation, failure mapping and event
//!   delivery
//! - **Pipeline**: the request resolver, strategy registries, exception
//!   mapper chain, interceptor and outcome event bus
//!
//! Adapters (Postgres, concrete system integrations, HTTP transport)
//! live in the server crate.

pub mod bus;
pub mod domain;
pub mod interceptor;
pub mod mappers;
pub mod ports;
pub mod registry;
pub mod resolver;
pub mod store;

// Re-export commonly used types
pub use bus::{EventBus, EventBusConfig, OutcomeEventHandler};
pub use domain::{
    codes, CallContext, ContextGuard, ContextHandle, ContextSlot, Outcome, OutboundCall,
    OutboundError, OutboundRecord, OutcomeEvent, RecordFailureCommand, RecordRequest,
    RecordStatus, RecordSuccessCommand,
};
pub use interceptor::Interceptor;
pub use mappers::{DefaultExceptionMapper, ExceptionMapperChain};
pub use ports::{
    EventPublisher, ExceptionMapper, RecordRepository, RequestHandler, ResponseHandler,
    ValidationStrategy,
};
pub use registry::{HandlerRegistry, ValidatorRegistry};
pub use resolver::RequestResolver;
pub use store::InMemoryRecordStore;
