//! `CatalogPort` implementation for `CatalogClient`.
//!
//! Converts between the wire types and core `EntityRef`, and maps internal
//! HTTP errors onto `CatalogError`.

use async_trait::async_trait;
use dexkeep_core::{CatalogError, CatalogPort, CatalogQuery, CatalogResult, EntityRef};

use crate::client::CatalogClient;
use crate::error::CatalogHttpError;
use crate::http::HttpBackend;
use crate::models::PokemonResponse;

// ============================================================================
// Error Mapping
// ============================================================================

fn map_error(err: CatalogHttpError, query: &CatalogQuery) -> CatalogError {
    match err {
        CatalogHttpError::ApiRequestFailed { status, url } => match status {
            404 => CatalogError::NotFound {
                query: query.to_string(),
            },
            429 => CatalogError::RateLimited,
            _ => CatalogError::Network {
                message: format!("API request failed with status {status}: {url}"),
            },
        },
        CatalogHttpError::EntryNotFound { .. } => CatalogError::NotFound {
            query: query.to_string(),
        },
        CatalogHttpError::InvalidResponse { message } => CatalogError::InvalidResponse { message },
        CatalogHttpError::Network(e) => CatalogError::Network {
            message: e.to_string(),
        },
        CatalogHttpError::InvalidUrl(e) => CatalogError::Configuration {
            message: e.to_string(),
        },
        CatalogHttpError::JsonParse(e) => CatalogError::InvalidResponse {
            message: e.to_string(),
        },
    }
}

impl From<CatalogHttpError> for CatalogError {
    fn from(err: CatalogHttpError) -> Self {
        match err {
            CatalogHttpError::InvalidUrl(e) => Self::Configuration {
                message: e.to_string(),
            },
            CatalogHttpError::Network(e) => Self::Configuration {
                message: format!("Failed to create HTTP client: {e}"),
            },
            other => Self::InvalidResponse {
                message: other.to_string(),
            },
        }
    }
}

// ============================================================================
// Type Conversions
// ============================================================================

/// Reduce a catalog entry to the reference kept in collections.
///
/// Type names are ordered by slot; a missing sprite becomes an empty string.
fn to_entity_ref(entry: PokemonResponse) -> EntityRef {
    let mut types = entry.types;
    types.sort_by_key(|t| t.slot);

    EntityRef::new(
        entry.id,
        entry.name,
        entry.sprites.front_default.unwrap_or_default(),
        types.into_iter().map(|t| t.kind.name).collect(),
    )
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend + Send + Sync> CatalogPort for CatalogClient<B> {
    async fn lookup(&self, query: &CatalogQuery) -> CatalogResult<EntityRef> {
        let entry = self
            .fetch_entry(query)
            .await
            .map_err(|e| map_error(e, query))?;

        if entry.name.trim().is_empty() {
            return Err(CatalogError::InvalidResponse {
                message: format!("entry {} has no name", entry.id),
            });
        }

        let entity = to_entity_ref(entry);
        tracing::debug!(entity_id = entity.id, name = %entity.name, "Catalog lookup resolved");
        Ok(entity)
    }
}
