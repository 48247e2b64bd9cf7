//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (database, network, etc.).
//!
//! # Structure
//!
//! - `entity` - Entity references copied out of the catalog
//! - `group` - Named, capacity-bounded groups of entities

pub mod entity;
pub mod group;

pub use entity::{EntityId, EntityRef};
pub use group::{
    Group, GroupId, GroupName, GroupNameError, GroupOrigin, MAX_GROUP_MEMBERS,
    MAX_GROUP_NAME_CHARS,
};
