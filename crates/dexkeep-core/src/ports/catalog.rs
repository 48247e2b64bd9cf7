//! Catalog lookup port.
//!
//! The remote catalog is a fixed, read-only data source. The collection
//! managers never call it; presentation surfaces use it to build the
//! [`EntityRef`] values they hand to the managers.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{EntityId, EntityRef};

/// What to look up in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogQuery {
    /// Numeric catalog identifier.
    Id(EntityId),
    /// Lowercased entity name.
    Name(String),
}

impl CatalogQuery {
    /// Interpret free-form user text as a query.
    ///
    /// All-digit input becomes [`CatalogQuery::Id`]; anything else is trimmed
    /// and lowercased into [`CatalogQuery::Name`]. Blank input yields `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(id) = trimmed.parse::<EntityId>() {
            if id > 0 {
                return Some(Self::Id(id));
            }
        }
        Some(Self::Name(trimmed.to_lowercase()))
    }

    /// Path segment identifying the entity in the remote API.
    pub fn path_segment(&self) -> String {
        match self {
            Self::Id(id) => id.to_string(),
            Self::Name(name) => name.clone(),
        }
    }
}

impl fmt::Display for CatalogQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Errors from catalog port operations.
///
/// Implementation-specific errors (HTTP, JSON) are mapped to these.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No entity matched the query.
    #[error("No catalog entry found for '{query}'")]
    NotFound { query: String },

    /// API rate limit exceeded.
    #[error("Rate limit exceeded, try again later")]
    RateLimited,

    /// Network or connectivity error.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The API answered with something we could not interpret.
    #[error("Invalid API response: {message}")]
    InvalidResponse { message: String },

    /// Client misconfiguration (bad base URL, etc.).
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Result type alias for catalog port operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Port trait for catalog lookups.
#[async_trait]
pub trait CatalogPort: Send + Sync {
    /// Look up a single entity by id or name.
    async fn lookup(&self, query: &CatalogQuery) -> CatalogResult<EntityRef>;
}
