// src/filters/compiler.rs
//! Turns a `ParsedFilterSet` into a conjunction of record constraints.
//!
//! The constraint list is also what storage backends push down into their own
//! query language, so `FilterPredicate::matches` and a backend's native query must agree.

use super::types::{ParsedFilterSet, fold_char};
use crate::records::StringRecord;

/// One constraint on one record dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    IsPalindrome(bool),
    MinLength(i64),
    MaxLength(i64),
    WordCount(i64),
    ContainsCharacter(char),
}

impl Constraint {
    pub fn matches(&self, record: &StringRecord) -> bool {
        let props = &record.properties;
        match *self {
            Constraint::IsPalindrome(expected) => props.is_palindrome == expected,
            Constraint::MinLength(min) => as_i64(props.length) >= min,
            Constraint::MaxLength(max) => as_i64(props.length) <= max,
            Constraint::WordCount(count) => as_i64(props.word_count) == count,
            Constraint::ContainsCharacter(c) => props
                .character_frequency_map
                .contains_key(&fold_char(c).to_string()),
        }
    }
}

/// ANDed constraints; an empty predicate matches every record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPredicate {
    constraints: Vec<Constraint>,
}

impl FilterPredicate {
    pub fn match_all() -> Self {
        Self::default()
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn matches(&self, record: &StringRecord) -> bool {
        self.constraints.iter().all(|c| c.matches(record))
    }

    /// The first character constraint, if any. Lets stores start from an inverted index.
    pub fn required_character(&self) -> Option<char> {
        self.constraints.iter().find_map(|c| match c {
            Constraint::ContainsCharacter(ch) => Some(fold_char(*ch)),
            _ => None,
        })
    }
}

pub fn compile(filters: &ParsedFilterSet) -> FilterPredicate {
    let constraints = [
        filters.is_palindrome.map(Constraint::IsPalindrome),
        filters.min_length.map(Constraint::MinLength),
        filters.max_length.map(Constraint::MaxLength),
        filters.word_count.map(Constraint::WordCount),
        filters.contains_character.map(Constraint::ContainsCharacter),
    ]
    .into_iter()
    .flatten()
    .collect();

    FilterPredicate { constraints }
}

fn as_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
