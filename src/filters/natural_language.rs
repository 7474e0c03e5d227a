// src/filters/natural_language.rs
//! Phrase-pattern translation of free-text queries into `ParsedFilterSet`.
//!
//! Rules live in one ordered table and are all tried against the lowercased,
//! trimmed query. Every rule that matches contributes its field, so
//! "palindromic strings longer than 5" sets both `is_palindrome` and `min_length`.
//! No negation, disjunction or spelled-out numbers.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::types::ParsedFilterSet;
use crate::error::{AnalyzerError, Result};

static LONGER_THAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"longer than (\d+)").expect("valid regex"));
static SHORTER_THAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"shorter than (\d+)").expect("valid regex"));
static CONTAINS_LETTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"contain(?:s|ing)?(?: the letter)? ([a-zA-Z])").expect("valid regex")
});

/// A named phrase matcher. `apply` writes its field and reports whether it fired.
pub struct Rule {
    pub name: &'static str,
    apply: fn(&str, &mut ParsedFilterSet) -> bool,
}

impl Rule {
    pub fn apply(&self, query: &str, filters: &mut ParsedFilterSet) -> bool {
        (self.apply)(query, filters)
    }
}

pub static RULES: [Rule; 5] = [
    Rule { name: "single_word", apply: single_word },
    Rule { name: "palindrome", apply: palindrome },
    Rule { name: "longer_than", apply: longer_than },
    Rule { name: "shorter_than", apply: shorter_than },
    Rule { name: "contains_letter", apply: contains_letter },
];

/// Lowercased, trimmed form the rules match against
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Translate free text into structured filters.
///
/// Fails with `UnparsableQuery` when the query is blank or no rule fires.
pub fn translate(query: &str) -> Result<ParsedFilterSet> {
    let normalized = normalize_query(query);
    if normalized.is_empty() {
        return Err(AnalyzerError::UnparsableQuery("query is empty".to_string()));
    }

    let mut filters = ParsedFilterSet::default();
    for rule in &RULES {
        if rule.apply(&normalized, &mut filters) {
            debug!(rule = rule.name, query = %normalized, "natural language rule matched");
        }
    }

    if filters.is_empty() {
        return Err(AnalyzerError::UnparsableQuery(normalized));
    }
    Ok(filters)
}

fn single_word(query: &str, filters: &mut ParsedFilterSet) -> bool {
    if query.contains("single word") {
        filters.word_count = Some(1);
        return true;
    }
    false
}

fn palindrome(query: &str, filters: &mut ParsedFilterSet) -> bool {
    if query.contains("palindromic") || query.contains("palindrome") {
        filters.is_palindrome = Some(true);
        return true;
    }
    false
}

fn longer_than(query: &str, filters: &mut ParsedFilterSet) -> bool {
    match captured_number(&LONGER_THAN, query).and_then(|n| n.checked_add(1)) {
        Some(min) => {
            filters.min_length = Some(min);
            true
        }
        None => false,
    }
}

fn shorter_than(query: &str, filters: &mut ParsedFilterSet) -> bool {
    match captured_number(&SHORTER_THAN, query).and_then(|n| n.checked_sub(1)) {
        Some(max) => {
            filters.max_length = Some(max);
            true
        }
        None => false,
    }
}

fn contains_letter(query: &str, filters: &mut ParsedFilterSet) -> bool {
    let letter = CONTAINS_LETTER
        .captures(query)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next());

    match letter {
        Some(c) => {
            filters.contains_character = Some(c.to_ascii_lowercase());
            true
        }
        None => false,
    }
}

// Digit runs that overflow i64 are treated as no match
fn captured_number(re: &Regex, query: &str) -> Option<i64> {
    re.captures(query)?.get(1)?.as_str().parse().ok()
}
