// src/store/memory.rs
//! In-process RecordStore. Used by tests and by `serve --in-memory`.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::traits::RecordStore;
use crate::analysis::sha256_hex;
use crate::error::{AnalyzerError, Result};
use crate::filters::FilterPredicate;
use crate::records::StringRecord;

#[derive(Default)]
struct Inner {
    next_seq: u64,
    // Insertion sequence -> record; iteration order is insertion order
    records: BTreeMap<u64, StringRecord>,
    by_id: HashMap<String, u64>,
    // Inverted index: frequency-map key -> records containing it
    by_character: HashMap<String, BTreeSet<u64>>,
}

impl Inner {
    fn seq_for_value(&self, value: &str) -> Option<u64> {
        let seq = *self.by_id.get(&sha256_hex(value))?;
        // Guard against a hash collision handing back a different value
        (self.records.get(&seq)?.value == value).then_some(seq)
    }
}

#[derive(Default)]
pub struct MemoryRecordStore {
    inner: RwLock<Inner>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert_if_absent(&self, record: StringRecord) -> Result<StringRecord> {
        let mut inner = self.inner.write().await;
        if inner.by_id.contains_key(&record.id) {
            return Err(AnalyzerError::DuplicateValue(record.value));
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        for key in record.properties.character_frequency_map.keys() {
            inner.by_character.entry(key.clone()).or_default().insert(seq);
        }
        inner.by_id.insert(record.id.clone(), seq);
        inner.records.insert(seq, record.clone());

        Ok(record)
    }

    async fn contains_id(&self, id: &str) -> Result<bool> {
        Ok(self.inner.read().await.by_id.contains_key(id))
    }

    async fn find_by_value(&self, value: &str) -> Result<Option<StringRecord>> {
        let inner = self.inner.read().await;
        Ok(inner
            .seq_for_value(value)
            .and_then(|seq| inner.records.get(&seq).cloned()))
    }

    async fn delete_by_value(&self, value: &str) -> Result<bool> {
        let mut inner = self.inner.write().await;
        let Some(seq) = inner.seq_for_value(value) else {
            return Ok(false);
        };
        let Some(record) = inner.records.remove(&seq) else {
            return Ok(false);
        };

        inner.by_id.remove(&record.id);
        for key in record.properties.character_frequency_map.keys() {
            if let Some(seqs) = inner.by_character.get_mut(key) {
                seqs.remove(&seq);
                if seqs.is_empty() {
                    inner.by_character.remove(key);
                }
            }
        }
        Ok(true)
    }

    async fn query(&self, predicate: &FilterPredicate) -> Result<Vec<StringRecord>> {
        let inner = self.inner.read().await;

        let matches: Vec<StringRecord> = match predicate.required_character() {
            Some(c) => {
                let Some(seqs) = inner.by_character.get(&c.to_string()) else {
                    return Ok(Vec::new());
                };
                seqs.iter()
                    .filter_map(|seq| inner.records.get(seq))
                    .filter(|r| predicate.matches(r))
                    .cloned()
                    .collect()
            }
            None => inner
                .records
                .values()
                .filter(|r| predicate.matches(r))
                .cloned()
                .collect(),
        };

        debug!(matched = matches.len(), total = inner.records.len(), "memory store query");
        Ok(matches)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.inner.read().await.records.len())
    }
}
