//! Group domain types.
//!
//! A group is a named, ordered list of at most [`MAX_GROUP_MEMBERS`] entities,
//! unique by entity id, tagged with where it came from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entity::{EntityId, EntityRef};

/// Maximum number of members a group may hold.
pub const MAX_GROUP_MEMBERS: usize = 6;

/// Maximum length of a group name, in characters.
pub const MAX_GROUP_NAME_CHARS: usize = 30;

/// Opaque group identifier, generated at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    /// Generate a fresh identifier. Never collides with another generated id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for GroupId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for GroupId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who created a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GroupOrigin {
    #[default]
    #[serde(rename = "user")]
    User,
    #[serde(rename = "ai")]
    Assistant,
}

impl GroupOrigin {
    /// Wire representation (`"user"` or `"ai"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "ai",
        }
    }
}

impl fmt::Display for GroupOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupOrigin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "ai" | "assistant" => Ok(Self::Assistant),
            other => Err(format!("unknown group origin '{other}' (expected user or ai)")),
        }
    }
}

/// Reasons a group name is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupNameError {
    #[error("Group name cannot be empty")]
    Empty,

    #[error("Group name is {len} characters long (max {MAX_GROUP_NAME_CHARS})")]
    TooLong { len: usize },
}

/// A validated group name: trimmed, non-empty, at most 30 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupName(String);

impl GroupName {
    /// Trim and validate a user-supplied name.
    pub fn parse(raw: &str) -> Result<Self, GroupNameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GroupNameError::Empty);
        }
        let len = trimmed.chars().count();
        if len > MAX_GROUP_NAME_CHARS {
            return Err(GroupNameError::TooLong { len });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// A named, capacity-bounded collection of entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    #[serde(alias = "pokemons", default)]
    pub members: Vec<EntityRef>,
    #[serde(rename = "createdBy", default)]
    pub origin: GroupOrigin,
}

impl Group {
    /// Whether the group has reached [`MAX_GROUP_MEMBERS`].
    pub fn is_full(&self) -> bool {
        self.members.len() >= MAX_GROUP_MEMBERS
    }

    /// Whether an entity with `entity_id` is a member.
    pub fn contains(&self, entity_id: EntityId) -> bool {
        self.members.iter().any(|m| m.id == entity_id)
    }

    /// Remaining capacity. Zero for full (or oversized) groups.
    pub fn free_slots(&self) -> usize {
        MAX_GROUP_MEMBERS.saturating_sub(self.members.len())
    }

    /// Whether `add_member` would accept this entity.
    pub fn accepts(&self, entity_id: EntityId) -> bool {
        !self.is_full() && !self.contains(entity_id)
    }
}
