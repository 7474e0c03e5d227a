// src/store/sqlite/mod.rs

pub mod migration;
pub mod store;

pub use migration::run_migrations;
pub use store::SqliteRecordStore;
