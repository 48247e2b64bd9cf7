//! CLI-specific error types and mappings.
//!
//! Maps `CoreError` to exit codes and user-facing messages.

use dexkeep_core::{CatalogError, CoreError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    #[error("Invalid arguments: {0}")]
    Arguments(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    /// The catalog could not be reached or refused the request.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

impl CliError {
    /// Map error to an exit code (sysexits.h where one fits).
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2,   // EX_USAGE
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Database(_) => 73,   // EX_CANTCREAT (closest fit)
            Self::Io(_) => 74,         // EX_IOERR
            Self::Config(_) => 78,     // EX_CONFIG
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Repository(repo_err) => Self::Database(repo_err.to_string()),
            CoreError::Catalog(catalog_err) => catalog_err.into(),
            CoreError::Group(group_err) => Self::Arguments(group_err.to_string()),
            CoreError::Path(path_err) => Self::Io(path_err.to_string()),
        }
    }
}

impl From<CatalogError> for CliError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { .. } | CatalogError::InvalidResponse { .. } => {
                Self::Core(err.to_string())
            }
            CatalogError::RateLimited | CatalogError::Network { .. } => {
                Self::Unavailable(err.to_string())
            }
            CatalogError::Configuration { message } => Self::Config(message),
        }
    }
}
