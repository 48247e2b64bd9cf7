//! `AppCore` - the primary application facade.
//!
//! This is the composition root for the collection managers. Adapters (CLI,
//! GUI) construct one `AppCore` at startup and pass it to whatever needs the
//! favorites or the groups. There is no global accessor.

use std::sync::Arc;

use crate::config::CollectionConfig;
use crate::ports::KeyValueStore;

use super::{FavoritesManager, GroupManager, SnapshotWriter};

/// The core application facade.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(SqliteKeyValueStore::new(pool));
/// let core = AppCore::open(store, CollectionConfig::default()).await;
///
/// core.favorites().add(entity);
/// core.flush().await;
/// ```
pub struct AppCore {
    favorites: FavoritesManager,
    groups: GroupManager,
    writer: SnapshotWriter,
}

impl AppCore {
    /// Start the snapshot writer and open both managers against `store`.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn open(store: Arc<dyn KeyValueStore>, config: CollectionConfig) -> Self {
        let writer = SnapshotWriter::spawn(Arc::clone(&store));
        let favorites = FavoritesManager::open(Arc::clone(&store), writer.clone()).await;
        let groups = GroupManager::open(store, writer.clone(), config).await;

        tracing::debug!(
            favorites = favorites.len(),
            groups = groups.len(),
            "Collections ready"
        );

        Self {
            favorites,
            groups,
            writer,
        }
    }

    /// Access the favorites manager.
    pub const fn favorites(&self) -> &FavoritesManager {
        &self.favorites
    }

    /// Access the group manager.
    pub const fn groups(&self) -> &GroupManager {
        &self.groups
    }

    /// Wait until every snapshot write scheduled so far has been attempted.
    ///
    /// Call before process exit so pending writes are not lost.
    pub async fn flush(&self) {
        self.writer.flush().await;
    }
}
