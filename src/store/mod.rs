// src/store/mod.rs

pub mod memory;
pub mod sqlite;
pub mod traits;

pub use memory::MemoryRecordStore;
pub use sqlite::SqliteRecordStore;
pub use traits::RecordStore;
