//! Core domain types, ports and collection managers for dexkeep.
//!
//! dexkeep keeps two small on-device collections of catalog entities: a set
//! of favorites and a list of named groups of up to six members. This crate
//! owns the rules for both and persists each as a whole snapshot through the
//! [`KeyValueStore`] port. Adapters supply the storage and catalog
//! implementations.

#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod paths;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use config::{CollectionConfig, InitialMembersPolicy};
pub use domain::{
    EntityId, EntityRef, Group, GroupId, GroupName, GroupNameError, GroupOrigin,
    MAX_GROUP_MEMBERS, MAX_GROUP_NAME_CHARS,
};
pub use paths::{PathError, data_root, database_path, database_path_in};
pub use ports::{
    CatalogError, CatalogPort, CatalogQuery, CatalogResult, CoreError, InMemoryKeyValueStore,
    KeyValueStore, RepositoryError,
};
pub use services::{
    AppCore, FAVORITES_KEY, FavoritesManager, GROUPS_KEY, GroupError, GroupManager,
    SnapshotWriter,
};

// Silence unused dev-dependency warnings; used only by the integration tests
#[cfg(test)]
use tokio_test as _;
