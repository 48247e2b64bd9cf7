//! `SQLite` implementation of the `KeyValueStore` trait.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use dexkeep_core::{KeyValueStore, RepositoryError};

/// `SQLite` implementation of the `KeyValueStore` trait.
///
/// Each key maps to one row of the `kv_store` table; writes replace the row.
pub struct SqliteKeyValueStore {
    pool: SqlitePool,
}

impl SqliteKeyValueStore {
    /// Create a new `SQLite` key-value store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Ensure the key-value table exists.
    ///
    /// `setup_database` already does this; call it when wiring a bare pool.
    pub async fn ensure_table(&self) -> Result<(), RepositoryError> {
        crate::setup::create_schema(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        Ok(row.map(|r| r.get::<String, _>("value")))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        let updated_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

        sqlx::query("INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)")
            .bind(key)
            .bind(value)
            .bind(&updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        tracing::trace!(key, bytes = value.len(), "kv_store row written");
        Ok(())
    }
}
