//! Path utilities for dexkeep data directories.
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O - adapters handle user prompts separately

mod database;
mod error;
mod platform;

#[cfg(test)]
mod test_utils;

pub use database::{database_path, database_path_in};
pub use error::PathError;
pub use platform::{DATA_DIR_ENV, data_root};
