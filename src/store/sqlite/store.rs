//! Implements RecordStore for SQLite.

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::analysis::{FrequencyMap, StringProperties};
use crate::error::{AnalyzerError, Result};
use crate::filters::types::fold_char;
use crate::filters::{Constraint, FilterPredicate};
use crate::records::{StringRecord, format_timestamp, parse_timestamp};
use crate::store::traits::RecordStore;

const SELECT_COLUMNS: &str = "SELECT id, value, length, is_palindrome, unique_characters, word_count, \
     sha256_hash, character_frequency_map, created_at FROM strings";

#[derive(Clone)]
pub struct SqliteRecordStore {
    pub pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct StringRow {
    id: String,
    value: String,
    length: i64,
    is_palindrome: bool,
    unique_characters: i64,
    word_count: i64,
    sha256_hash: String,
    character_frequency_map: String,
    created_at: String,
}

impl TryFrom<StringRow> for StringRecord {
    type Error = AnalyzerError;

    fn try_from(row: StringRow) -> Result<Self> {
        let corrupt = |reason: String| AnalyzerError::CorruptRecord {
            id: row.id.clone(),
            reason,
        };
        let count = |field: &str, n: i64| {
            usize::try_from(n).map_err(|_| corrupt(format!("negative {field}: {n}")))
        };

        let frequencies: FrequencyMap = serde_json::from_str(&row.character_frequency_map)
            .map_err(|e| corrupt(format!("character_frequency_map: {e}")))?;
        let created_at = parse_timestamp(&row.created_at)
            .map_err(|e| corrupt(format!("created_at '{}': {e}", row.created_at)))?;

        let properties = StringProperties {
            length: count("length", row.length)?,
            is_palindrome: row.is_palindrome,
            unique_characters: count("unique_characters", row.unique_characters)?,
            word_count: count("word_count", row.word_count)?,
            sha256_hash: row.sha256_hash,
            character_frequency_map: frequencies,
        };

        Ok(StringRecord {
            id: row.id,
            value: row.value,
            properties,
            created_at,
        })
    }
}

impl SqliteRecordStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn push_constraint(builder: &mut QueryBuilder<'_, Sqlite>, constraint: &Constraint) {
        match *constraint {
            Constraint::IsPalindrome(v) => {
                builder.push(" AND is_palindrome = ").push_bind(v);
            }
            Constraint::MinLength(v) => {
                builder.push(" AND length >= ").push_bind(v);
            }
            Constraint::MaxLength(v) => {
                builder.push(" AND length <= ").push_bind(v);
            }
            Constraint::WordCount(v) => {
                builder.push(" AND word_count = ").push_bind(v);
            }
            Constraint::ContainsCharacter(c) => {
                builder
                    .push(" AND id IN (SELECT string_id FROM string_characters WHERE character = ")
                    .push_bind(fold_char(c).to_string())
                    .push(")");
            }
        }
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn insert_if_absent(&self, record: StringRecord) -> Result<StringRecord> {
        let props = &record.properties;
        let frequencies = serde_json::to_string(&props.character_frequency_map)?;

        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO strings (
                id, value, length, is_palindrome, unique_characters,
                word_count, sha256_hash, character_frequency_map, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(&record.id)
        .bind(&record.value)
        .bind(props.length as i64)
        .bind(props.is_palindrome)
        .bind(props.unique_characters as i64)
        .bind(props.word_count as i64)
        .bind(&props.sha256_hash)
        .bind(frequencies)
        .bind(format_timestamp(&record.created_at))
        .execute(&mut *tx)
        .await?;

        if inserted.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AnalyzerError::DuplicateValue(record.value));
        }

        for character in props.character_frequency_map.keys() {
            sqlx::query("INSERT INTO string_characters (character, string_id) VALUES (?, ?)")
                .bind(character)
                .bind(&record.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        info!(id = %record.id, "stored string record");
        Ok(record)
    }

    async fn contains_id(&self, id: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM strings WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn find_by_value(&self, value: &str) -> Result<Option<StringRecord>> {
        let row: Option<StringRow> = sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE value = ?"))
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(StringRecord::try_from).transpose()
    }

    async fn delete_by_value(&self, value: &str) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "DELETE FROM string_characters WHERE string_id IN (SELECT id FROM strings WHERE value = ?)",
        )
        .bind(value)
        .execute(&mut *tx)
        .await?;

        let deleted = sqlx::query("DELETE FROM strings WHERE value = ?")
            .bind(value)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(deleted.rows_affected() > 0)
    }

    async fn query(&self, predicate: &FilterPredicate) -> Result<Vec<StringRecord>> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_COLUMNS);
        builder.push(" WHERE 1 = 1");
        for constraint in predicate.constraints() {
            Self::push_constraint(&mut builder, constraint);
        }
        builder.push(" ORDER BY rowid");

        debug!(sql = builder.sql(), "sqlite store query");

        let rows: Vec<StringRow> = builder.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter().map(StringRecord::try_from).collect()
    }

    async fn count(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM strings")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as usize)
    }
}
