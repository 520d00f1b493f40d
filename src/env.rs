use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

/// Load `<dir>/.env` into the process env. Returns whether the file existed.
/// Variables already set in the environment take precedence over the file.
pub fn load_env(dir: &Path) -> Result<bool> {
    let base = dir.join(".env");
    if !base.is_file() {
        return Ok(false);
    }

    dotenvy::from_path(&base).with_context(|| format!("Failed to load {}", base.display()))?;
    debug!(path = %base.display(), "loaded dotenv file");
    Ok(true)
}

/// Read an override from the environment, falling back to `default` when unset.
pub fn var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
