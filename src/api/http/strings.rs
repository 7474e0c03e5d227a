// src/api/http/strings.rs
// REST handlers for /strings

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::api::error::{ApiError, ApiResult};
use crate::filters::{FilterParams, ParsedFilterSet};
use crate::records::StringRecord;
use crate::services::{FilteredStrings, NaturalLanguageResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NaturalLanguageParams {
    pub query: Option<String>,
}

/// Stored value that collides with the natural-language route segment
pub const NATURAL_LANGUAGE_SEGMENT: &str = "filter-by-natural-language";

pub async fn create_string(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<StringRecord>)> {
    let Json(payload) = payload?;
    let record = app_state.strings.ingest(&payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn list_strings(
    State(app_state): State<Arc<AppState>>,
    params: Result<Query<FilterParams>, QueryRejection>,
) -> ApiResult<Json<FilteredStrings>> {
    let Query(params) = params?;
    let filters = ParsedFilterSet::try_from(params)?;
    debug!(?filters, "structured string query");

    Ok(Json(app_state.strings.list(filters).await?))
}

pub async fn filter_by_natural_language(
    State(app_state): State<Arc<AppState>>,
    params: Result<Query<NaturalLanguageParams>, QueryRejection>,
) -> ApiResult<Json<NaturalLanguageResult>> {
    let Query(params) = params?;
    let query = params
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing query parameter"))?;

    Ok(Json(app_state.strings.search_natural_language(&query).await?))
}

pub async fn get_string(
    State(app_state): State<Arc<AppState>>,
    Path(value): Path<String>,
) -> ApiResult<Json<StringRecord>> {
    Ok(Json(app_state.strings.get(&value).await?))
}

pub async fn delete_string(
    State(app_state): State<Arc<AppState>>,
    Path(value): Path<String>,
) -> ApiResult<StatusCode> {
    app_state.strings.delete(&value).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE on the natural-language route removes the record whose value is the segment itself,
/// since the static route shadows `/strings/{value}` for that one literal.
pub async fn delete_natural_language_segment(
    State(app_state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    app_state.strings.delete(NATURAL_LANGUAGE_SEGMENT).await?;
    Ok(StatusCode::NO_CONTENT)
}
