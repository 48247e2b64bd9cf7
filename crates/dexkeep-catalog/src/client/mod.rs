//! Catalog client for looking up single entries.

use dexkeep_core::CatalogQuery;

use crate::config::CatalogClientConfig;
use crate::error::CatalogHttpResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::{CatalogConfig, PokemonResponse};
use crate::url::build_entry_url;

/// Default catalog client using the reqwest HTTP backend.
pub type DefaultCatalogClient = CatalogClient<ReqwestBackend>;

/// Client for the public catalog API.
///
/// Generic over an HTTP backend so tests can run without a network. Use
/// [`DefaultCatalogClient`] in production and talk to it through the
/// `CatalogPort` trait.
pub struct CatalogClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) config: CatalogConfig,
}

impl DefaultCatalogClient {
    /// Create a new client with the given configuration.
    ///
    /// Fails when the base URL does not parse or the HTTP client cannot be
    /// built.
    pub fn new(config: &CatalogClientConfig) -> CatalogHttpResult<Self> {
        let config = CatalogConfig::from_public(config)?;
        let backend = ReqwestBackend::new(&config)?;
        Ok(Self { backend, config })
    }

    /// Create a new client with default configuration.
    pub fn default_client() -> CatalogHttpResult<Self> {
        Self::new(&CatalogClientConfig::default())
    }
}

impl<B: HttpBackend> CatalogClient<B> {
    /// Create a new client with a custom backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(config: CatalogConfig, backend: B) -> Self {
        Self { backend, config }
    }

    /// Fetch the raw entry for `query`.
    pub(crate) async fn fetch_entry(&self, query: &CatalogQuery) -> CatalogHttpResult<PokemonResponse> {
        let url = build_entry_url(&self.config, query);
        tracing::debug!(%url, %query, "Fetching catalog entry");
        self.backend.get_json(&url).await
    }
}
