//! URL construction helpers for the catalog API.

use dexkeep_core::CatalogQuery;
use url::Url;

use crate::models::CatalogConfig;

/// Build the URL of a single catalog entry: `{base}/pokemon/{id|name}`.
pub fn build_entry_url(config: &CatalogConfig, query: &CatalogQuery) -> Url {
    let mut url = config.base_url.clone();

    let base_path = url.path().trim_end_matches('/');
    let segment = urlencoding::encode(&query.path_segment()).into_owned();
    url.set_path(&format!("{base_path}/pokemon/{segment}"));

    url
}
