//! Command handlers.
//!
//! Each handler takes the composed [`CliContext`] and prints its outcome.
//! Routine refusals from the collection managers (already present, group
//! full, unknown id) are reported as messages, not errors.

pub mod favorites;
pub mod groups;
pub mod lookup;

use anyhow::Result;
use dexkeep_core::{CatalogQuery, EntityRef};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Resolve free-form user input into a catalog entity.
pub(crate) async fn resolve_entity(ctx: &CliContext, input: &str) -> Result<EntityRef> {
    let query = CatalogQuery::parse(input)
        .ok_or_else(|| CliError::Arguments("query cannot be blank".to_string()))?;

    let entity = ctx
        .catalog()
        .lookup(&query)
        .await
        .map_err(CliError::from)?;
    Ok(entity)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use dexkeep_core::{
        CatalogError, CatalogPort, CatalogQuery, CatalogResult, CollectionConfig, EntityRef,
        InMemoryKeyValueStore,
    };

    use crate::bootstrap::{CliContext, bootstrap_with};

    /// Catalog backed by a fixed list of entities.
    pub struct StaticCatalog {
        entries: HashMap<u32, EntityRef>,
    }

    impl StaticCatalog {
        pub fn new(entries: impl IntoIterator<Item = EntityRef>) -> Self {
            Self {
                entries: entries.into_iter().map(|e| (e.id, e)).collect(),
            }
        }
    }

    #[async_trait]
    impl CatalogPort for StaticCatalog {
        async fn lookup(&self, query: &CatalogQuery) -> CatalogResult<EntityRef> {
            let found = match query {
                CatalogQuery::Id(id) => self.entries.get(id),
                CatalogQuery::Name(name) => self.entries.values().find(|e| &e.name == name),
            };
            found.cloned().ok_or_else(|| CatalogError::NotFound {
                query: query.to_string(),
            })
        }
    }

    pub fn entity(id: u32, name: &str) -> EntityRef {
        EntityRef::new(id, name, format!("https://img.example/{id}.png"), vec![])
    }

    /// Entities 1..=12 named `mon-{id}`, plus pikachu (25) and eevee (133).
    pub fn roster() -> Vec<EntityRef> {
        let mut all: Vec<EntityRef> = (1..=12).map(|id| entity(id, &format!("mon-{id}"))).collect();
        all.push(entity(25, "pikachu"));
        all.push(entity(133, "eevee"));
        all
    }

    pub async fn context_with(config: CollectionConfig) -> (Arc<InMemoryKeyValueStore>, CliContext) {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let catalog = Arc::new(StaticCatalog::new(roster()));
        let ctx = bootstrap_with(store.clone(), catalog, config).await;
        (store, ctx)
    }

    pub async fn context() -> (Arc<InMemoryKeyValueStore>, CliContext) {
        context_with(CollectionConfig::default()).await
    }
}
