//! Key-value storage port.
//!
//! This port defines the durable storage substrate the collection managers
//! write their snapshots to. Each collection occupies one fixed key and is
//! always written as a complete serialized value.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::RepositoryError;

/// Durable string-to-string storage.
///
/// # Design Rules
///
/// - No `sqlx` types in signatures
/// - Values are opaque strings; callers own the serialization format
/// - `set` replaces any previous value for the key wholesale
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing was stored.
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError>;
}

/// Process-local store backed by a `HashMap`.
///
/// Nothing survives the process. Used by tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.insert(key, value);
        store
    }

    /// Synchronously insert an entry.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
    }

    /// Synchronously read an entry.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        Ok(self.peek(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        self.insert(key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    // Verify the trait is object-safe
    fn _assert_object_safe(_: Arc<dyn KeyValueStore>) {}

    #[tokio::test]
    async fn test_get_missing_key_is_none() {
        let store = InMemoryKeyValueStore::new();
        assert_eq!(store.get("@nothing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_replaces_value() {
        let store = InMemoryKeyValueStore::with_entry("k", "old");
        store.set("k", "new").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("new"));
    }
}
