// src/analysis/mod.rs
// Pure string analysis: content hashing and derived properties

pub mod hasher;
pub mod properties;

pub use hasher::sha256_hex;
pub use properties::{FrequencyMap, StringProperties};
