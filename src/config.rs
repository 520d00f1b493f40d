use crate::env::{load_env, var_or};
use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

pub const DOCKSWAP_DIR: &str = ".dockswap";
pub const DEFAULT_DOCKER_BIN: &str = "docker";
pub const DEFAULT_COMPOSE_BIN: &str = "docker-compose";
pub const DEFAULT_STORAGE_FILE: &str = "storage.json";

/// Run-time settings, resolved once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Container runtime CLI, used for `ps`, `stop` and `rm`.
    pub docker_bin: String,
    /// Orchestration CLI, used for `up` and `down`.
    pub compose_bin: String,
    pub storage_dir: PathBuf,
    pub storage_file: String,
}

impl Config {
    /// Resolve from the process environment, after loading `~/.dockswap/.env`.
    pub fn from_env() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
        Self::from_env_in(&home)
    }

    /// Like [`Config::from_env`] with `home` standing in for the user's home directory.
    pub fn from_env_in(home: &Path) -> Result<Self> {
        let storage_dir = home.join(DOCKSWAP_DIR);
        load_env(&storage_dir)?;

        Ok(Config {
            docker_bin: resolve_docker_binary(),
            compose_bin: resolve_compose_binary(),
            storage_dir,
            storage_file: var_or("DOCKSWAP_STORAGE_FILE_NAME", DEFAULT_STORAGE_FILE),
        })
    }

    /// Defaults rooted at `storage_dir`, ignoring the environment.
    pub fn with_storage_dir(storage_dir: &Path) -> Self {
        Config {
            docker_bin: DEFAULT_DOCKER_BIN.to_string(),
            compose_bin: DEFAULT_COMPOSE_BIN.to_string(),
            storage_dir: storage_dir.to_path_buf(),
            storage_file: DEFAULT_STORAGE_FILE.to_string(),
        }
    }

    pub fn storage_path(&self) -> PathBuf {
        self.storage_dir.join(&self.storage_file)
    }
}

pub fn resolve_docker_binary() -> String {
    var_or("DOCKSWAP_DOCKER_CLI", DEFAULT_DOCKER_BIN)
}

pub fn resolve_compose_binary() -> String {
    var_or("DOCKSWAP_DOCKER_COMPOSE_CLI", DEFAULT_COMPOSE_BIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let cfg = Config::with_storage_dir(temp.path());
        assert_eq!(cfg.docker_bin, "docker");
        assert_eq!(cfg.compose_bin, "docker-compose");
        assert_eq!(cfg.storage_path(), temp.path().join("storage.json"));
    }

    // Only test touching the DOCKSWAP_* overrides; they are process-wide.
    #[test]
    fn overrides_come_from_env_and_dotenv() {
        let home = TempDir::new().unwrap();
        let dir = home.path().join(DOCKSWAP_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(".env"),
            "DOCKSWAP_DOCKER_CLI=from-dotenv\nDOCKSWAP_STORAGE_FILE_NAME=projects.json\n",
        )
        .unwrap();
        std::env::set_var("DOCKSWAP_DOCKER_CLI", "podman");
        std::env::set_var("DOCKSWAP_DOCKER_COMPOSE_CLI", "podman-compose");
        std::env::remove_var("DOCKSWAP_STORAGE_FILE_NAME");

        let cfg = Config::from_env_in(home.path()).unwrap();

        // process env wins over the dotenv file
        assert_eq!(cfg.docker_bin, "podman");
        assert_eq!(cfg.compose_bin, "podman-compose");
        assert_eq!(cfg.storage_dir, dir);
        assert_eq!(cfg.storage_path(), dir.join("projects.json"));

        std::env::set_var("DOCKSWAP_STORAGE_FILE_NAME", "other.json");
        let cfg = Config::from_env_in(home.path()).unwrap();
        assert_eq!(cfg.storage_path(), dir.join("other.json"));

        for key in [
            "DOCKSWAP_DOCKER_CLI",
            "DOCKSWAP_DOCKER_COMPOSE_CLI",
            "DOCKSWAP_STORAGE_FILE_NAME",
        ] {
            std::env::remove_var(key);
        }
    }
}
