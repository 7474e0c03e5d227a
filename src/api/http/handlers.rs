// src/api/http/handlers.rs

use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::state::AppState;

pub async fn home_handler() -> Json<Value> {
    Json(json!({ "message": "nothing here." }))
}

/// Health check handler
pub async fn health_handler(State(app_state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let records = app_state.strings.count().await?;
    let uptime = Utc::now() - app_state.started_at;

    Ok(Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "records": records,
        "uptime_secs": uptime.num_seconds(),
        "timestamp": Utc::now().to_rfc3339()
    })))
}
