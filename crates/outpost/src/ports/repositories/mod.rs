//! Repository Ports

mod record_repository;

pub use record_repository::RecordRepository;
