//! Main commands enum and collection subcommands.

use clap::Subcommand;
use dexkeep_core::{EntityId, GroupOrigin};

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Look up a catalog entry by id or name
    Lookup {
        /// Numeric id or name (case-insensitive)
        query: String,
    },

    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommand,
    },

    /// Manage groups (at most six members each)
    Groups {
        #[command(subcommand)]
        command: GroupsCommand,
    },
}

/// Favorites subcommands.
#[derive(Subcommand)]
pub enum FavoritesCommand {
    /// List favorites in the order they were added
    List,
    /// Look up an entry and add it to favorites
    Add { query: String },
    /// Remove a favorite by entity id
    Remove { id: EntityId },
    /// Add the entry if it is not a favorite, remove it otherwise
    Toggle { query: String },
}

/// Group subcommands.
#[derive(Subcommand)]
pub enum GroupsCommand {
    /// List all groups
    List,
    /// Show one group and its members
    Show { id: String },
    /// Create a group
    Create {
        /// Group name (1-30 characters, surrounding whitespace is trimmed)
        name: String,
        /// Initial member, by id or name (repeatable)
        #[arg(short = 'm', long = "member")]
        members: Vec<String>,
        /// Who created the group: user or ai
        #[arg(long, default_value_t = GroupOrigin::User)]
        origin: GroupOrigin,
    },
    /// Rename a group
    Rename { id: String, name: String },
    /// Delete a group
    Delete { id: String },
    /// Delete every group
    Clear,
    /// Look up an entry and add it to a group
    Add { id: String, query: String },
    /// Remove a member from a group by entity id
    RemoveMember { id: String, entity_id: EntityId },
    /// List the groups an entry could still be added to
    Candidates { query: String },
}
