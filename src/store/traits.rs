// src/store/traits.rs

//! Storage seam for string records.
//! The service layer only talks to this trait; no direct DB calls in business logic.

use async_trait::async_trait;

use crate::error::Result;
use crate::filters::FilterPredicate;
use crate::records::StringRecord;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert `record` unless its value is already stored.
    /// At most one concurrent insert per value succeeds; the rest get `DuplicateValue`.
    async fn insert_if_absent(&self, record: StringRecord) -> Result<StringRecord>;

    /// Cheap existence check by content id
    async fn contains_id(&self, id: &str) -> Result<bool>;

    async fn find_by_value(&self, value: &str) -> Result<Option<StringRecord>>;

    /// Remove the record holding `value`. Returns false when nothing was stored.
    async fn delete_by_value(&self, value: &str) -> Result<bool>;

    /// All records matching `predicate`, in insertion order
    async fn query(&self, predicate: &FilterPredicate) -> Result<Vec<StringRecord>>;

    async fn count(&self) -> Result<usize>;
}
