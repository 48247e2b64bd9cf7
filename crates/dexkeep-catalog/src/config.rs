//! Client settings for the Pokémon catalog.
//!
//! Validated into the crate-private `CatalogConfig` when a client is built.

use std::time::Duration;

/// Default base URL of the public catalog API.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2/";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MAX_RETRIES: u8 = 3;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Settings for [`crate::DefaultCatalogClient`].
///
/// Retries apply to 5xx responses and network failures only; the delay
/// doubles after each attempt.
///
/// ```
/// use dexkeep_catalog::CatalogClientConfig;
/// use std::time::Duration;
///
/// let config = CatalogClientConfig::new()
///     .with_timeout(Duration::from_secs(10))
///     .with_max_retries(1);
/// ```
#[derive(Debug, Clone)]
pub struct CatalogClientConfig {
    pub(crate) base_url: String,
    pub(crate) user_agent: String,
    pub(crate) timeout: Duration,
    pub(crate) max_retries: u8,
    pub(crate) retry_base_delay: Duration,
}

impl Default for CatalogClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("dexkeep-catalog/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl CatalogClientConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at another catalog deployment, e.g. a local mirror.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Like [`Self::with_base_url`], but `None` keeps the current URL.
    #[must_use]
    pub fn with_optional_base_url(self, url: Option<String>) -> Self {
        match url {
            Some(url) => self.with_base_url(url),
            None => self,
        }
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Per-request timeout, applied to each retry separately.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Zero disables retrying.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }
}
