// src/store/sqlite/migration.rs
//! Schema for the SQLite record store.
//! Run at startup; every statement is idempotent.

use sqlx::{Executor, SqlitePool};
use tracing::info;

use crate::error::Result;

/// One row per stored string. Derived columns are written once at insert.
const CREATE_STRINGS: &str = r#"
CREATE TABLE IF NOT EXISTS strings (
    id TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL UNIQUE,
    length INTEGER NOT NULL,
    is_palindrome BOOLEAN NOT NULL,
    unique_characters INTEGER NOT NULL,
    word_count INTEGER NOT NULL,
    sha256_hash TEXT NOT NULL,
    character_frequency_map TEXT NOT NULL,
    created_at TEXT NOT NULL
);
"#;

/// Inverted index: frequency-map key -> owning string
const CREATE_STRING_CHARACTERS: &str = r#"
CREATE TABLE IF NOT EXISTS string_characters (
    character TEXT NOT NULL,
    string_id TEXT NOT NULL,
    PRIMARY KEY (character, string_id),
    FOREIGN KEY (string_id) REFERENCES strings(id) ON DELETE CASCADE
);
"#;

const CREATE_INDICES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_strings_length ON strings(length);
CREATE INDEX IF NOT EXISTS idx_strings_word_count ON strings(word_count);
CREATE INDEX IF NOT EXISTS idx_string_characters_string_id ON string_characters(string_id);
"#;

pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    pool.execute(CREATE_STRINGS).await?;
    pool.execute(CREATE_STRING_CHARACTERS).await?;
    pool.execute(CREATE_INDICES).await?;

    info!("SQLite schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = create_memory_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name LIKE 'string%' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(tables, ["string_characters", "strings"]);
    }
}
