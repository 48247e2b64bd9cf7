//! Favorites manager - the bookmarked-entities collection.
//!
//! State is held as an immutable `Arc<Vec<EntityRef>>` that is replaced on
//! every change. Mutations return synchronously; the new snapshot is handed
//! to the [`SnapshotWriter`] and persisted in the background.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::entity::dedup_by_id;
use crate::domain::{EntityId, EntityRef};
use crate::ports::KeyValueStore;

use super::snapshot::{SnapshotWriter, read_snapshot};

/// Storage key of the favorites snapshot.
pub const FAVORITES_KEY: &str = "@pokedex_favorites";

/// Owner of the Favorites Set.
pub struct FavoritesManager {
    state: RwLock<Arc<Vec<EntityRef>>>,
    store: Arc<dyn KeyValueStore>,
    writer: SnapshotWriter,
}

impl FavoritesManager {
    /// Create the manager and restore the persisted snapshot.
    pub async fn open(store: Arc<dyn KeyValueStore>, writer: SnapshotWriter) -> Self {
        let manager = Self {
            state: RwLock::new(Arc::new(Vec::new())),
            store,
            writer,
        };
        manager.load().await;
        manager
    }

    /// Replace in-memory state with the persisted snapshot.
    ///
    /// Queued writes are flushed first so the read observes them.
    /// Never fails: a missing or unreadable snapshot yields an empty set.
    pub async fn load(&self) {
        self.writer.flush().await;
        let mut items: Vec<EntityRef> = read_snapshot(self.store.as_ref(), FAVORITES_KEY).await;

        let dropped = dedup_by_id(&mut items);
        if dropped > 0 {
            tracing::warn!(dropped, "Collapsed duplicate favorites in stored snapshot");
        }

        tracing::debug!(count = items.len(), "Loaded favorites");
        *self.write_state() = Arc::new(items);
    }

    /// Current favorites, in insertion order.
    pub fn favorites(&self) -> Arc<Vec<EntityRef>> {
        Arc::clone(&self.read_state())
    }

    pub fn len(&self) -> usize {
        self.read_state().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_state().is_empty()
    }

    /// Whether an entity with `id` is bookmarked.
    pub fn is_favorite(&self, id: EntityId) -> bool {
        self.read_state().iter().any(|e| e.id == id)
    }

    /// Bookmark `entity`. Returns `false` if it was already present.
    pub fn add(&self, entity: EntityRef) -> bool {
        let mut state = self.write_state();
        if state.iter().any(|e| e.id == entity.id) {
            tracing::debug!(entity_id = entity.id, "Already a favorite");
            return false;
        }

        let mut next = Vec::with_capacity(state.len() + 1);
        next.extend(state.iter().cloned());
        tracing::info!(entity_id = entity.id, name = %entity.name, "Added favorite");
        next.push(entity);
        self.commit(&mut state, next);
        true
    }

    /// Drop the bookmark for `id`. Returns `false` if it was not present.
    pub fn remove(&self, id: EntityId) -> bool {
        let mut state = self.write_state();
        if !state.iter().any(|e| e.id == id) {
            tracing::debug!(entity_id = id, "Not a favorite; nothing to remove");
            return false;
        }

        let next = state.iter().filter(|e| e.id != id).cloned().collect();
        self.commit(&mut state, next);
        tracing::info!(entity_id = id, "Removed favorite");
        true
    }

    /// Remove `entity` if bookmarked, otherwise add it.
    ///
    /// Returns the membership state after the call.
    pub fn toggle(&self, entity: EntityRef) -> bool {
        let mut state = self.write_state();
        let id = entity.id;

        if state.iter().any(|e| e.id == id) {
            let next = state.iter().filter(|e| e.id != id).cloned().collect();
            self.commit(&mut state, next);
            tracing::info!(entity_id = id, "Toggled favorite off");
            false
        } else {
            let mut next = Vec::with_capacity(state.len() + 1);
            next.extend(state.iter().cloned());
            next.push(entity);
            self.commit(&mut state, next);
            tracing::info!(entity_id = id, "Toggled favorite on");
            true
        }
    }

    /// Wait for every scheduled snapshot write to complete.
    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    /// Swap in the new state and queue its snapshot.
    ///
    /// Called with the write guard held so queue order matches mutation order.
    fn commit(&self, state: &mut Arc<Vec<EntityRef>>, next: Vec<EntityRef>) {
        let next = Arc::new(next);
        self.writer.schedule(FAVORITES_KEY, next.as_slice());
        *state = next;
    }

    fn read_state(&self) -> RwLockReadGuard<'_, Arc<Vec<EntityRef>>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, Arc<Vec<EntityRef>>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
