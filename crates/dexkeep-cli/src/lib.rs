//! Command-line adapter for dexkeep.
//!
//! Parses arguments, composes the `SQLite` store and catalog client into a
//! [`CliContext`], and routes each command to its handler.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used only by the binary entry point
use dotenvy as _;
use tracing_subscriber as _;

// Runtime is driven by the binary; tests use #[tokio::test]
use tokio as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, FavoritesCommand, GroupsCommand};
pub use error::CliError;
pub use parser::Cli;
