//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;
use dexkeep_core::InitialMembersPolicy;

use crate::commands::Commands;

/// Command-line interface for keeping favorites and groups of catalog
/// entities.
#[derive(Parser)]
#[command(name = "dexkeep")]
#[command(about = "Keep favorites and small groups of catalog entities")]
#[command(version)]
pub struct Cli {
    /// Directory holding the dexkeep database
    #[arg(long = "data-dir", env = "DEXKEEP_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Base URL of the catalog API
    #[arg(long = "catalog-url", env = "DEXKEEP_CATALOG_URL", global = true)]
    pub catalog_url: Option<String>,

    /// What `groups create` does with more than six members: accept, truncate or reject
    #[arg(
        long = "initial-members",
        env = "DEXKEEP_INITIAL_MEMBERS",
        global = true,
        default_value_t = InitialMembersPolicy::Accept
    )]
    pub initial_members: InitialMembersPolicy,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{FavoritesCommand, GroupsCommand};
    use clap::CommandFactory;
    use dexkeep_core::GroupOrigin;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "dexkeep",
            "--verbose",
            "--data-dir",
            "/tmp/dexkeep",
            "--initial-members",
            "truncate",
            "favorites",
            "list",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/dexkeep")));
        assert_eq!(cli.initial_members, InitialMembersPolicy::Truncate);
        assert!(matches!(
            cli.command,
            Some(Commands::Favorites {
                command: FavoritesCommand::List
            })
        ));
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::parse_from([
            "dexkeep",
            "lookup",
            "pikachu",
            "--catalog-url",
            "http://localhost:9000/api/v2/",
        ]);
        assert_eq!(
            cli.catalog_url.as_deref(),
            Some("http://localhost:9000/api/v2/")
        );
    }

    #[test]
    fn test_groups_create_collects_members() {
        let cli = Cli::parse_from([
            "dexkeep", "groups", "create", "Water Team", "-m", "7", "--member", "squirtle",
            "--origin", "ai",
        ]);
        match cli.command {
            Some(Commands::Groups {
                command:
                    GroupsCommand::Create {
                        name,
                        members,
                        origin,
                    },
            }) => {
                assert_eq!(name, "Water Team");
                assert_eq!(members, vec!["7".to_string(), "squirtle".to_string()]);
                assert_eq!(origin, GroupOrigin::Assistant);
            }
            _ => panic!("expected groups create"),
        }
    }

    #[test]
    fn test_invalid_policy_is_rejected() {
        let result = Cli::try_parse_from(["dexkeep", "--initial-members", "drop", "groups", "list"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_remove_member_requires_numeric_id() {
        let result =
            Cli::try_parse_from(["dexkeep", "groups", "remove-member", "abc", "pikachu"]);
        assert!(result.is_err());
    }
}
