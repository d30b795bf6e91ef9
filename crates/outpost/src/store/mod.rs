//! Record Stores

mod memory;

pub use memory::InMemoryRecordStore;
