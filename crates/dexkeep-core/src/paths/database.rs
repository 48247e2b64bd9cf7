//! Database path resolution.

use std::path::{Path, PathBuf};

use super::error::PathError;
use super::platform::{data_root, ensure_dir};

const DATABASE_FILE: &str = "dexkeep.db";

/// Get the path to the dexkeep database file under [`data_root`].
pub fn database_path() -> Result<PathBuf, PathError> {
    database_path_in(&data_root()?)
}

/// Get the path to the database file inside an explicit data directory.
///
/// The directory is created if it doesn't exist.
pub fn database_path_in(root: &Path) -> Result<PathBuf, PathError> {
    ensure_dir(root)?;
    Ok(root.join(DATABASE_FILE))
}
