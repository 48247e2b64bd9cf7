//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` or `reqwest` types in any signature
//! - Storage is a plain key-value substrate; snapshot encoding lives in core
//! - The catalog is read-only and never called by the collection managers

pub mod catalog;
pub mod key_value_store;

use thiserror::Error;

pub use catalog::{CatalogError, CatalogPort, CatalogQuery, CatalogResult};
pub use key_value_store::{InMemoryKeyValueStore, KeyValueStore};

/// Domain-specific errors for storage operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors)
/// and provides a clean interface for services to handle storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Storage backend error (database, filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Core error type for semantic domain errors.
///
/// Adapters should map this to their own error types (CLI exit codes, etc.).
/// Routine collection outcomes (full group, duplicate member) are never
/// reported through this type; the managers return `bool` for those.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Catalog lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Group creation input was rejected.
    #[error(transparent)]
    Group(#[from] crate::services::GroupError),

    /// Data directory resolution failed.
    #[error(transparent)]
    Path(#[from] crate::paths::PathError),
}
