//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - `SQLite` pool and key-value store (via dexkeep-db)
//! - Catalog client (via dexkeep-catalog)
//! - Collection managers (via dexkeep-core)
//!
//! Command handlers receive the composed context and delegate to it.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use dexkeep_catalog::{CatalogClientConfig, DefaultCatalogClient};
use dexkeep_core::paths::{database_path, database_path_in};
use dexkeep_core::{
    AppCore, CatalogError, CatalogPort, CollectionConfig, CoreError, KeyValueStore,
};
use dexkeep_db::{CoreFactory, setup_database};

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Explicit data directory; the platform default is used when unset.
    pub data_dir: Option<PathBuf>,
    pub catalog: CatalogClientConfig,
    pub collection: CollectionConfig,
}

impl CliConfig {
    /// Build config from parsed arguments (flags and their env fallbacks).
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            data_dir: cli.data_dir.clone(),
            catalog: CatalogClientConfig::new().with_optional_base_url(cli.catalog_url.clone()),
            collection: CollectionConfig::default().with_initial_members(cli.initial_members),
        }
    }

    /// Resolve the database file path.
    pub fn database_path(&self) -> Result<PathBuf, CliError> {
        let path = match &self.data_dir {
            Some(dir) => database_path_in(dir),
            None => database_path(),
        };
        path.map_err(|e| CliError::from(CoreError::from(e)))
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// The collection facade.
    pub app: AppCore,
    /// Catalog used to resolve user queries into entities.
    pub catalog: Arc<dyn CatalogPort>,
}

impl CliContext {
    pub const fn app(&self) -> &AppCore {
        &self.app
    }

    pub fn catalog(&self) -> &Arc<dyn CatalogPort> {
        &self.catalog
    }
}

/// Bootstrap the CLI application.
///
/// 1. Resolves the database path and opens the pool with schema setup
/// 2. Opens `AppCore`, restoring both collections
/// 3. Creates the catalog client
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let db_path = config.database_path()?;
    let pool = setup_database(&db_path).await?;
    tracing::debug!(path = %db_path.display(), "Opened collection database");

    let app = CoreFactory::build_app_core(pool, config.collection).await;

    let client = DefaultCatalogClient::new(&config.catalog)
        .map_err(|e| CliError::from(CatalogError::from(e)))?;
    let catalog: Arc<dyn CatalogPort> = Arc::new(client);

    Ok(CliContext { app, catalog })
}

/// Bootstrap with a custom store and catalog (for testing).
pub async fn bootstrap_with(
    store: Arc<dyn KeyValueStore>,
    catalog: Arc<dyn CatalogPort>,
    collection: CollectionConfig,
) -> CliContext {
    let app = AppCore::open(store, collection).await;
    CliContext { app, catalog }
}
