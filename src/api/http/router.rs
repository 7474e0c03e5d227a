// src/api/http/router.rs

use axum::{routing::get, Router};
use axum::http::HeaderValue;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::handlers::{health_handler, home_handler};
use super::strings::{
    create_string, delete_natural_language_segment, delete_string, filter_by_natural_language,
    get_string, list_strings,
};
use crate::state::AppState;

/// Full HTTP surface. `cors_origin` of "*" allows any origin.
pub fn create_router(app_state: Arc<AppState>, cors_origin: &str, timeout: Duration) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .route("/strings", get(list_strings).post(create_string))
        .route(
            "/strings/filter-by-natural-language",
            get(filter_by_natural_language).delete(delete_natural_language_segment),
        )
        .route("/strings/{value}", get(get_string).delete(delete_string))
        .layer(cors_layer(cors_origin))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origin == "*" {
        return cors.allow_origin(Any);
    }
    match HeaderValue::from_str(origin) {
        Ok(value) => cors.allow_origin(value),
        Err(_) => {
            warn!("Invalid CORS origin '{}', allowing any origin", origin);
            cors.allow_origin(Any)
        }
    }
}
