//! HTTP backend abstraction for the catalog API.
//!
//! The production implementation uses reqwest with automatic retry for
//! transient errors; tests substitute [`testing::FakeBackend`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::error::{CatalogHttpError, CatalogHttpResult};
use crate::models::CatalogConfig;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that can fetch JSON from URLs.
///
/// This is an implementation detail - external code should use the
/// `CatalogPort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Fetch JSON from a URL and deserialize it.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> CatalogHttpResult<T>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest with retry logic.
///
/// Implements exponential backoff for transient server errors (5xx)
/// and network errors.
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay_ms: u64,
}

impl ReqwestBackend {
    pub fn new(config: &CatalogConfig) -> CatalogHttpResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            retry_base_delay_ms: config.retry_base_delay_ms,
        })
    }

    /// Fetch a URL with automatic retry for transient errors.
    async fn fetch_with_retry(&self, url: &Url) -> CatalogHttpResult<reqwest::Response> {
        let mut last_error: Option<CatalogHttpError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = backoff_delay(self.retry_base_delay_ms, attempt);
                tracing::debug!(%url, attempt, ?delay, "Retrying catalog request");
                tokio::time::sleep(delay).await;
            }

            match self.client.get(url.as_str()).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    // 5xx errors are retryable (server-side issues)
                    if status.is_server_error() && attempt < self.max_retries {
                        last_error = Some(CatalogHttpError::ApiRequestFailed {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                        continue;
                    }

                    if status.as_u16() == 404 {
                        if let Some(query) = entry_from_path(url.path()) {
                            return Err(CatalogHttpError::EntryNotFound { query });
                        }
                    }

                    // 4xx errors or final attempt - fail immediately
                    return Err(CatalogHttpError::ApiRequestFailed {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }
                Err(e) => {
                    // Network errors are retryable
                    if attempt < self.max_retries {
                        tracing::warn!(%url, attempt, error = %e, "Catalog request failed");
                        last_error = Some(e.into());
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }

        Err(last_error.unwrap_or_else(|| CatalogHttpError::InvalidResponse {
            message: "Unknown error during fetch".to_string(),
        }))
    }
}

/// Delay before retry number `attempt` (1-based), doubling each time.
///
/// Saturates instead of overflowing for large retry counts.
fn backoff_delay(base_ms: u64, attempt: u8) -> Duration {
    let factor = 2u64.saturating_pow(u32::from(attempt.saturating_sub(1)));
    Duration::from_millis(base_ms.saturating_mul(factor))
}

/// The decoded last path segment of an entry URL.
fn entry_from_path(path: &str) -> Option<String> {
    let (_, last) = path.trim_end_matches('/').rsplit_once("/pokemon/")?;
    if last.is_empty() || last.contains('/') {
        return None;
    }
    Some(
        urlencoding::decode(last)
            .map_or_else(|_| last.to_string(), std::borrow::Cow::into_owned),
    )
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> CatalogHttpResult<T> {
        let response = self.fetch_with_retry(url).await?;
        let data: T = response.json().await?;
        Ok(data)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogClientConfig;

    #[test]
    fn test_entry_from_path() {
        assert_eq!(
            entry_from_path("/api/v2/pokemon/pikachu"),
            Some("pikachu".to_string())
        );
        assert_eq!(entry_from_path("/api/v2/pokemon/25/"), Some("25".to_string()));
        assert_eq!(
            entry_from_path("/api/v2/pokemon/mr.%20mime"),
            Some("mr. mime".to_string())
        );
        assert_eq!(entry_from_path("/api/v2/pokemon/"), None);
        assert_eq!(entry_from_path("/other/path"), None);
    }

    #[test]
    fn test_backoff_delay_doubles() {
        assert_eq!(backoff_delay(500, 1), Duration::from_millis(500));
        assert_eq!(backoff_delay(500, 2), Duration::from_millis(1000));
        assert_eq!(backoff_delay(500, 4), Duration::from_millis(4000));
    }

    #[test]
    fn test_backoff_delay_saturates() {
        assert_eq!(backoff_delay(500, 70), Duration::from_millis(u64::MAX));
        assert_eq!(backoff_delay(500, u8::MAX), Duration::from_millis(u64::MAX));
        assert_eq!(backoff_delay(0, u8::MAX), Duration::ZERO);
    }

    #[test]
    fn test_reqwest_backend_creation() {
        let config = CatalogConfig::from_public(&CatalogClientConfig::new()).unwrap();
        let backend = ReqwestBackend::new(&config).unwrap();
        assert_eq!(backend.max_retries, 3);
        assert_eq!(backend.retry_base_delay_ms, 500);
    }

    mod fake_backend_tests {
        use super::super::testing::*;
        use super::*;
        use serde_json::json;

        #[tokio::test]
        async fn test_fake_backend_returns_canned_response() {
            let backend = FakeBackend::new().with_response(
                "/pokemon/25",
                CannedResponse::Json(json!({"id": 25, "name": "pikachu"})),
            );

            let url = Url::parse("https://example.com/api/v2/pokemon/25").unwrap();
            let result: serde_json::Value = backend.get_json(&url).await.unwrap();

            assert_eq!(result["name"], "pikachu");
            assert_eq!(backend.requested(), vec![url.to_string()]);
        }

        #[tokio::test]
        async fn test_fake_backend_unknown_url_is_not_found() {
            let backend = FakeBackend::new();
            let url = Url::parse("https://example.com/api/v2/pokemon/missingno").unwrap();

            let result: CatalogHttpResult<serde_json::Value> = backend.get_json(&url).await;
            assert!(matches!(
                result,
                Err(CatalogHttpError::EntryNotFound { query }) if query == "missingno"
            ));
        }
    }
}
