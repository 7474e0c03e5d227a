// src/filters/mod.rs
// Structured filters, their compilation into predicates, and free-text translation

pub mod compiler;
pub mod natural_language;
pub mod types;

pub use compiler::{Constraint, FilterPredicate, compile};
pub use natural_language::{normalize_query, translate};
pub use types::{FilterParams, ParsedFilterSet};
