//! Collection policy configuration.
//!
//! Group membership is capped at [`MAX_GROUP_MEMBERS`] by `add_member`. What
//! happens when a group is *created* with a longer initial list is a policy
//! choice, made explicit here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::MAX_GROUP_MEMBERS;

/// How `create_group` treats an initial member list longer than
/// [`MAX_GROUP_MEMBERS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitialMembersPolicy {
    /// Keep the whole list. The group starts over capacity and refuses
    /// `add_member` until members are removed.
    #[default]
    Accept,
    /// Keep the first [`MAX_GROUP_MEMBERS`] entries.
    Truncate,
    /// Refuse to create the group.
    Reject,
}

impl InitialMembersPolicy {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Truncate => "truncate",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for InitialMembersPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InitialMembersPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "accept" => Ok(Self::Accept),
            "truncate" => Ok(Self::Truncate),
            "reject" => Ok(Self::Reject),
            other => Err(format!(
                "unknown initial-members policy '{other}' (expected accept, truncate or reject)"
            )),
        }
    }
}

/// Configuration for the collection managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Policy for oversized initial member lists (limit: [`MAX_GROUP_MEMBERS`]).
    pub initial_members: InitialMembersPolicy,
}

impl CollectionConfig {
    #[must_use]
    pub const fn with_initial_members(mut self, policy: InitialMembersPolicy) -> Self {
        self.initial_members = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_accepts() {
        assert_eq!(
            CollectionConfig::default().initial_members,
            InitialMembersPolicy::Accept
        );
    }

    #[test]
    fn test_policy_parse_round_trips_display() {
        for policy in [
            InitialMembersPolicy::Accept,
            InitialMembersPolicy::Truncate,
            InitialMembersPolicy::Reject,
        ] {
            assert_eq!(policy.to_string().parse::<InitialMembersPolicy>(), Ok(policy));
        }
        assert_eq!(" Reject ".parse(), Ok(InitialMembersPolicy::Reject));
        assert!("drop".parse::<InitialMembersPolicy>().is_err());
    }

    #[test]
    fn test_config_deserializes_with_missing_fields() {
        let config: CollectionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CollectionConfig::default());

        let config: CollectionConfig =
            serde_json::from_str(r#"{"initial_members":"truncate"}"#).unwrap();
        assert_eq!(config.initial_members, InitialMembersPolicy::Truncate);
    }
}
