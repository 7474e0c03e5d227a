// src/api/mod.rs

pub mod error;
pub mod http;

pub use error::{ApiError, ApiResult};
pub use http::router::create_router;
