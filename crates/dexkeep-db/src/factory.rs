//! Composition utilities for building `AppCore` with `SQLite` backends.
//!
//! This module is focused purely on construction and should not contain
//! any domain logic.

use sqlx::SqlitePool;
use std::sync::Arc;

use dexkeep_core::{AppCore, CollectionConfig, KeyValueStore};

use crate::repositories::SqliteKeyValueStore;

/// Factory for creating store instances with `SQLite` backends.
///
/// Composition utilities only; no domain logic.
pub struct CoreFactory;

impl CoreFactory {
    /// Create a key-value store from a pool.
    pub fn key_value_store(pool: SqlitePool) -> Arc<SqliteKeyValueStore> {
        Arc::new(SqliteKeyValueStore::new(pool))
    }

    /// Build a complete `AppCore` over a pool prepared by `setup_database()`.
    ///
    /// Equivalent to:
    ///
    /// ```ignore
    /// let store = CoreFactory::key_value_store(pool);
    /// let core = AppCore::open(store, config).await;
    /// ```
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn build_app_core(pool: SqlitePool, config: CollectionConfig) -> AppCore {
        let store: Arc<dyn KeyValueStore> = Self::key_value_store(pool);
        AppCore::open(store, config).await
    }
}
