// src/lib.rs

pub mod analysis;
pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod records;
pub mod services;
pub mod state;
pub mod store;

pub use error::{AnalyzerError, Result};
pub use state::AppState;
