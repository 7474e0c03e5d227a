// src/services/strings.rs
// Ingestion, lookup, deletion and filtered listing of string records

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::analysis::sha256_hex;
use crate::error::{AnalyzerError, Result};
use crate::filters::{self, ParsedFilterSet};
use crate::records::StringRecord;
use crate::store::RecordStore;

/// Result of a structured listing
#[derive(Debug, Clone, Serialize)]
pub struct FilteredStrings {
    pub data: Vec<StringRecord>,
    pub count: usize,
    pub filters_applied: ParsedFilterSet,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterpretedQuery {
    /// The query as the rules saw it: trimmed and lowercased
    pub original: String,
    pub parsed_filters: ParsedFilterSet,
}

/// Result of a natural-language search
#[derive(Debug, Clone, Serialize)]
pub struct NaturalLanguageResult {
    pub data: Vec<StringRecord>,
    pub count: usize,
    pub interpreted_query: InterpretedQuery,
}

#[derive(Clone)]
pub struct StringService {
    store: Arc<dyn RecordStore>,
}

impl StringService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Validate an ingestion payload (`{"value": <string>}`) and store it
    pub async fn ingest(&self, payload: &Value) -> Result<StringRecord> {
        let value = payload
            .as_object()
            .and_then(|body| body.get("value"))
            .ok_or(AnalyzerError::MissingValue)?;

        match value {
            Value::String(value) => self.create(value).await,
            other => {
                warn!(kind = json_kind(other), "rejected non-string value");
                Err(AnalyzerError::InvalidValueType)
            }
        }
    }

    /// Analyze and store `value`. Duplicates are caught by id before any analysis runs;
    /// the store's atomic insert covers the race between concurrent callers.
    pub async fn create(&self, value: &str) -> Result<StringRecord> {
        let id = sha256_hex(value);
        if self.store.contains_id(&id).await? {
            debug!(%id, "duplicate string rejected");
            return Err(AnalyzerError::DuplicateValue(value.to_string()));
        }

        let record = self.store.insert_if_absent(StringRecord::new(value)).await?;
        info!(id = %record.id, length = record.properties.length, "ingested string");
        Ok(record)
    }

    pub async fn get(&self, value: &str) -> Result<StringRecord> {
        self.store
            .find_by_value(value)
            .await?
            .ok_or_else(|| AnalyzerError::RecordNotFound(value.to_string()))
    }

    pub async fn delete(&self, value: &str) -> Result<()> {
        if !self.store.delete_by_value(value).await? {
            return Err(AnalyzerError::RecordNotFound(value.to_string()));
        }
        info!(id = %sha256_hex(value), "deleted string");
        Ok(())
    }

    /// List records matching structured filters. Empty filters list everything.
    pub async fn list(&self, filters: ParsedFilterSet) -> Result<FilteredStrings> {
        let predicate = filters::compile(&filters);
        let data = self.store.query(&predicate).await?;

        Ok(FilteredStrings {
            count: data.len(),
            data,
            filters_applied: filters,
        })
    }

    /// Translate `query` into filters, then list as `list` does
    pub async fn search_natural_language(&self, query: &str) -> Result<NaturalLanguageResult> {
        let parsed_filters = filters::translate(query)?;
        let predicate = filters::compile(&parsed_filters);
        let data = self.store.query(&predicate).await?;

        Ok(NaturalLanguageResult {
            count: data.len(),
            data,
            interpreted_query: InterpretedQuery {
                original: filters::normalize_query(query),
                parsed_filters,
            },
        })
    }

    pub async fn count(&self) -> Result<usize> {
        self.store.count().await
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
