//! Core services - the collection managers and their persistence.
//!
//! Managers here are pure orchestrators over the `KeyValueStore` port;
//! they don't know about concrete storage implementations.

mod app_core;
mod favorites;
mod groups;
mod snapshot;

pub use app_core::AppCore;
pub use favorites::{FAVORITES_KEY, FavoritesManager};
pub use groups::{GROUPS_KEY, GroupError, GroupManager};
pub use snapshot::SnapshotWriter;
