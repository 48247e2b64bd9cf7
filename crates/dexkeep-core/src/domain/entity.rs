//! Entity reference types.
//!
//! An entity reference is the minimal record copied out of a catalog lookup
//! and into a local collection. It carries no back-reference to its source.

use serde::{Deserialize, Serialize};

/// Catalog identifier of an entity. Positive and stable per catalog item.
pub type EntityId = u32;

/// A catalog entity captured into a local collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRef {
    pub id: EntityId,
    pub name: String,
    pub image_url: String,
    /// Category tags in catalog order (e.g. `["grass", "poison"]`).
    #[serde(alias = "types", default)]
    pub category_tags: Vec<String>,
}

impl EntityRef {
    /// Create a new entity reference.
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        image_url: impl Into<String>,
        category_tags: Vec<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            image_url: image_url.into(),
            category_tags,
        }
    }
}

/// Collapse entities sharing an id, keeping the first occurrence.
///
/// Returns the number of entries dropped.
pub(crate) fn dedup_by_id(entities: &mut Vec<EntityRef>) -> usize {
    let before = entities.len();
    let mut seen = std::collections::HashSet::with_capacity(before);
    entities.retain(|e| seen.insert(e.id));
    before - entities.len()
}
