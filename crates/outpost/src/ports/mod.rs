//! Ports - Abstract Interfaces
//!
//! Trait seams between the pipeline and its collaborators: persistence,
//! per-system strategies, validation, failure mapping and event
//! delivery.

pub mod events;
pub mod handlers;
pub mod mappers;
pub mod repositories;
pub mod validation;

pub use events::EventPublisher;
pub use handlers::{RequestHandler, ResponseHandler};
pub use mappers::ExceptionMapper;
pub use repositories::RecordRepository;
pub use validation::ValidationStrategy;
