//! Platform data directory resolution.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::PathError;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "DEXKEEP_DATA_DIR";

/// Get the root directory for application data.
///
/// Resolution order:
/// 1. `DEXKEEP_DATA_DIR` environment variable (highest priority)
/// 2. System data directory (e.g., `~/.local/share/dexkeep`)
///
/// The directory is created if it doesn't exist.
pub fn data_root() -> Result<PathBuf, PathError> {
    let root = resolve_data_root()?;
    ensure_dir(&root)?;
    Ok(root)
}

/// Resolve the data root without touching the filesystem.
///
/// An empty `DEXKEEP_DATA_DIR` counts as unset.
fn resolve_data_root() -> Result<PathBuf, PathError> {
    match env::var_os(DATA_DIR_ENV) {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => Ok(dirs::data_local_dir()
            .ok_or(PathError::NoDataDir)?
            .join("dexkeep")),
    }
}

/// Create `dir` (and parents) if missing, rejecting non-directories.
pub(super) fn ensure_dir(dir: &Path) -> Result<(), PathError> {
    if dir.exists() {
        if !dir.is_dir() {
            return Err(PathError::NotADirectory(dir.to_path_buf()));
        }
        return Ok(());
    }

    fs::create_dir_all(dir).map_err(|e| PathError::CreateFailed {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })
}
