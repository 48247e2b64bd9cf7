//! Internal error types for catalog HTTP operations.
//!
//! These errors stay inside `dexkeep-catalog` and are mapped to the core
//! `CatalogError` at the port boundary.

use thiserror::Error;

pub type CatalogHttpResult<T> = Result<T, CatalogHttpError>;

#[derive(Debug, Error)]
pub enum CatalogHttpError {
    /// API request failed with an HTTP error status.
    #[error("Catalog API request failed with status {status}: {url}")]
    ApiRequestFailed { status: u16, url: String },

    /// API returned an invalid or unexpected response.
    #[error("Invalid response from catalog API: {message}")]
    InvalidResponse { message: String },

    /// The requested entry does not exist.
    #[error("Catalog entry '{query}' not found")]
    EntryNotFound { query: String },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
