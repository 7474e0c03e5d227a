// src/filters/types.rs

use serde::{Deserialize, Serialize};

use crate::error::{AnalyzerError, Result};

/// Structured constraints of a query. `None` means "no constraint on that dimension".
/// Serializes only the constrained fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFilterSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_character: Option<char>,
}

impl ParsedFilterSet {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Raw query-string parameters for structured filtering, before validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    pub is_palindrome: Option<String>,
    pub min_length: Option<String>,
    pub max_length: Option<String>,
    pub word_count: Option<String>,
    pub contains_character: Option<String>,
}

impl TryFrom<FilterParams> for ParsedFilterSet {
    type Error = AnalyzerError;

    fn try_from(params: FilterParams) -> Result<Self> {
        Ok(Self {
            // Anything other than "true" reads as false
            is_palindrome: params.is_palindrome.map(|v| v.trim().eq_ignore_ascii_case("true")),
            min_length: parse_int("min_length", params.min_length)?,
            max_length: parse_int("max_length", params.max_length)?,
            word_count: parse_int("word_count", params.word_count)?,
            contains_character: parse_char(params.contains_character)?,
        })
    }
}

/// Lowercase form of `c` as used for frequency-map keys
pub fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

// An empty parameter (`?min_length=`) is the same as an absent one
fn parse_int(field: &'static str, raw: Option<String>) -> Result<Option<i64>> {
    match raw.filter(|r| !r.trim().is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| AnalyzerError::invalid_filter(field, format!("'{raw}' is not an integer"))),
    }
}

fn parse_char(raw: Option<String>) -> Result<Option<char>> {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return Ok(None);
    };
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Some(fold_char(c))),
        _ => Err(AnalyzerError::invalid_filter(
            "contains_character",
            format!("expected a single character, got '{raw}'"),
        )),
    }
}
