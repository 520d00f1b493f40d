//! Durable collection of registered projects.
//!
//! The whole collection lives in one JSON file, `~/.dockswap/storage.json` by
//! default, as an array of `{project_name, dc_path, env_path}` objects. Every
//! write rewrites the full file; there is no locking, last writer wins.

use crate::config::Config;
use crate::error::{DockswapError, Result};
use crate::project::ProjectRecord;
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub struct Registry {
    storage_path: PathBuf,
    /// Raw stored entries, loaded on first access.
    loaded: Option<Vec<Value>>,
}

impl Registry {
    /// Open (creating if needed) `<dir>/<file_name>`.
    pub fn open(dir: &Path, file_name: &str) -> Result<Self> {
        fs::create_dir_all(dir).map_err(|source| DockswapError::Storage {
            path: dir.to_path_buf(),
            source,
        })?;

        let storage_path = dir.join(file_name);
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&storage_path)
            .map_err(|source| DockswapError::Storage {
                path: storage_path.clone(),
                source,
            })?;

        Ok(Registry {
            storage_path,
            loaded: None,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        Self::open(&cfg.storage_dir, &cfg.storage_file)
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    fn loaded_data(&mut self) -> &[Value] {
        let path = &self.storage_path;
        self.loaded.get_or_insert_with(|| read_entries(path))
    }

    fn commit(&mut self, data: Vec<Value>) -> Result<()> {
        let encoded = serde_json::to_string(&data)?;
        fs::write(&self.storage_path, encoded).map_err(|source| DockswapError::Storage {
            path: self.storage_path.clone(),
            source,
        })?;
        debug!(path = %self.storage_path.display(), entries = data.len(), "committed storage");
        self.loaded = Some(data);
        Ok(())
    }

    /// Every decodable record, in stored order.
    pub fn get_all(&mut self) -> Vec<ProjectRecord> {
        self.loaded_data()
            .iter()
            .filter_map(ProjectRecord::from_value)
            .collect()
    }

    /// First record named `name`, or `None`.
    pub fn find(&mut self, name: &str) -> Option<ProjectRecord> {
        self.get_all().into_iter().find(|r| r.name == name)
    }

    /// Like [`Registry::find`] but absence is an error.
    pub fn get(&mut self, name: &str) -> Result<ProjectRecord> {
        self.find(name)
            .ok_or_else(|| DockswapError::NotFound(name.to_string()))
    }

    /// Append `record` and rewrite the file.
    pub fn persist(&mut self, record: &ProjectRecord) -> Result<()> {
        self.persist_all(std::slice::from_ref(record), false)
    }

    /// Replace the stored collection with `records` when `rewrite`, append otherwise.
    pub fn persist_all(&mut self, records: &[ProjectRecord], rewrite: bool) -> Result<()> {
        let encoded = records
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let data = if rewrite {
            encoded
        } else {
            let mut data = self.loaded_data().to_vec();
            data.extend(encoded);
            data
        };
        self.commit(data)
    }

    /// Persist `record` unless its name is already taken.
    pub fn register(&mut self, record: &ProjectRecord) -> Result<()> {
        if self.find(&record.name).is_some() {
            return Err(DockswapError::DuplicateProject(record.name.clone()));
        }
        self.persist(record)
    }

    /// Remove every record named `name`. Returns whether anything was removed.
    pub fn delete(&mut self, name: &str) -> Result<bool> {
        let all = self.get_all();
        let kept: Vec<ProjectRecord> = all.iter().filter(|r| r.name != name).cloned().collect();
        let deleted = kept.len() != all.len();
        self.persist_all(&kept, true)?;
        Ok(deleted)
    }

    /// Delete the storage file itself. A later [`Registry::open`] recreates it empty.
    pub fn prune(self) -> Result<()> {
        match fs::remove_file(&self.storage_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(DockswapError::Storage {
                path: self.storage_path,
                source,
            }),
        }
    }
}

// Missing, empty, unreadable or malformed storage all read as no entries.
fn read_entries(path: &Path) -> Vec<Value> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "storage unreadable, treating as empty");
            return Vec::new();
        }
    };
    if content.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Option<Vec<Value>>>(&content) {
        Ok(entries) => entries.unwrap_or_default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "storage is not a JSON array, treating as empty");
            Vec::new()
        }
    }
}
