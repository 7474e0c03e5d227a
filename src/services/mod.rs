// src/services/mod.rs

pub mod strings;

pub use strings::{FilteredStrings, InterpretedQuery, NaturalLanguageResult, StringService};
