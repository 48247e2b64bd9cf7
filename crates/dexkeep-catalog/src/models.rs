//! Wire types for the catalog API and the internal client config.

use serde::Deserialize;
use url::Url;

use crate::config::CatalogClientConfig;
use crate::error::CatalogHttpResult;

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: Url,
    pub user_agent: String,
    pub timeout: std::time::Duration,
    pub max_retries: u8,
    pub retry_base_delay_ms: u64,
}

impl CatalogConfig {
    /// Resolve the public config, validating the base URL.
    pub fn from_public(config: &CatalogClientConfig) -> CatalogHttpResult<Self> {
        Ok(Self {
            base_url: Url::parse(&config.base_url)?,
            user_agent: config.user_agent.clone(),
            timeout: config.timeout,
            max_retries: config.max_retries,
            #[allow(clippy::cast_possible_truncation)] // Duration milliseconds won't exceed u64 in practice
            retry_base_delay_ms: config.retry_base_delay.as_millis() as u64,
        })
    }
}

/// `GET pokemon/{id|name}` response, reduced to the fields we keep.
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonResponse {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
}
