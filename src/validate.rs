//! Checks applied to user input before anything reaches the registry.

use crate::error::{DockswapError, Result};
use std::path::{Path, PathBuf};

const DEFINITION_EXTENSIONS: [&str; 3] = ["yml", "yaml", "json"];

/// The path must exist and must not be a directory.
pub fn validate_path(path: &Path) -> Result<()> {
    if !path.exists() || path.is_dir() {
        return Err(DockswapError::InvalidPath(path.to_path_buf()));
    }
    Ok(())
}

/// An existing `.yml`, `.yaml` or `.json` file. Contents are not inspected.
pub fn validate_compose_path(path: &Path) -> Result<()> {
    validate_path(path)?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !DEFINITION_EXTENSIONS.contains(&ext) {
        return Err(DockswapError::InvalidDefinitionFile(path.to_path_buf()));
    }
    Ok(())
}

pub fn validate_project_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(DockswapError::InvalidProjectName);
    }
    Ok(())
}

/// Absolute form of `path`, relative paths taken from `cwd`.
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
