//! Record provider adapters. In-memory record set, loaded from JSON.

pub mod json_file;
pub mod memory;

pub use json_file::load_records;
pub use memory::InMemoryRecords;
