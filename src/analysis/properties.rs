// src/analysis/properties.rs
//! Derived properties of a raw string.
//!
//! Every function here is total over `&str`: empty input, whitespace-only input and
//! text without any alphanumeric characters all produce well-defined results.
//! Lowercasing uses Unicode case mapping, so scripts without case (CJK, digits,
//! punctuation) pass through unchanged.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::hasher::sha256_hex;

/// Character -> occurrence count over the lowercased, space-stripped text.
pub type FrequencyMap = BTreeMap<String, usize>;

/// Full property set computed at ingestion time. Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringProperties {
    pub length: usize,
    pub is_palindrome: bool,
    pub unique_characters: usize,
    pub word_count: usize,
    pub sha256_hash: String,
    pub character_frequency_map: FrequencyMap,
}

impl StringProperties {
    pub fn extract(value: &str) -> Self {
        Self {
            length: length(value),
            is_palindrome: is_palindrome(value),
            unique_characters: unique_characters(value),
            word_count: word_count(value),
            sha256_hash: sha256_hex(value),
            character_frequency_map: character_frequency_map(value),
        }
    }
}

/// Number of Unicode scalar values
pub fn length(value: &str) -> usize {
    value.chars().count()
}

/// Case-insensitive palindrome check over the alphanumeric characters only.
/// Text with nothing alphanumeric left is a palindrome.
pub fn is_palindrome(value: &str) -> bool {
    let cleaned: String = value.chars().filter(|c| c.is_alphanumeric()).collect();
    let cleaned = cleaned.to_lowercase();
    cleaned.chars().eq(cleaned.chars().rev())
}

/// Count of non-empty tokens between runs of whitespace
pub fn word_count(value: &str) -> usize {
    value.split_whitespace().count()
}

pub fn unique_characters(value: &str) -> usize {
    stripped_lowercase(value).into_iter().collect::<BTreeSet<char>>().len()
}

pub fn character_frequency_map(value: &str) -> FrequencyMap {
    let mut counts = FrequencyMap::new();
    for c in stripped_lowercase(value) {
        *counts.entry(c.to_string()).or_insert(0) += 1;
    }
    counts
}

// Only U+0020 is removed; tabs and newlines are counted like any other character.
fn stripped_lowercase(value: &str) -> Vec<char> {
    value.to_lowercase().chars().filter(|c| *c != ' ').collect()
}
