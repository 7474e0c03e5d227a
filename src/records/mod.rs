// src/records/mod.rs
//! The stored unit: a string value, its content id and its cached properties.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{StringProperties, sha256_hex};

/// A stored string. `id` and every property are pure functions of `value`;
/// records are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringRecord {
    pub id: String,
    pub value: String,
    pub properties: StringProperties,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl StringRecord {
    /// Analyze `value` and stamp it with the current time
    pub fn new(value: impl Into<String>) -> Self {
        Self::with_created_at(value, Utc::now())
    }

    pub fn with_created_at(value: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        let value = value.into();
        Self {
            id: sha256_hex(&value),
            properties: StringProperties::extract(&value),
            value,
            created_at: created_at.trunc_subsecs(3),
        }
    }
}

/// `created_at` text form: ISO-8601, millisecond precision, `Z` suffix
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc))
}

mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}
