//! Registered project records as stored in `~/.dockswap/storage.json`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// What to do with a project's composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
}

impl Action {
    /// The orchestration CLI verb for this action.
    pub fn verb(&self) -> &'static str {
        match self {
            Action::Start => "up",
            Action::Stop => "down",
        }
    }
}

/// One registered project: a compose file plus an optional env file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(rename = "project_name")]
    pub name: String,
    #[serde(rename = "dc_path")]
    pub compose_path: PathBuf,
    #[serde(default)]
    pub env_path: Option<PathBuf>,
}

impl ProjectRecord {
    pub fn new(name: impl Into<String>, compose_path: impl Into<PathBuf>, env_path: Option<PathBuf>) -> Self {
        ProjectRecord {
            name: name.into(),
            compose_path: compose_path.into(),
            env_path,
        }
    }

    /// Decode one stored entry. Entries without a name or compose path yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let mut record: ProjectRecord = serde_json::from_value(value.clone()).ok()?;
        if record.name.is_empty() || record.compose_path.as_os_str().is_empty() {
            return None;
        }
        if record
            .env_path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            record.env_path = None;
        }
        Some(record)
    }

    pub fn represent(&self, full: bool) -> String {
        if !full {
            return self.name.clone();
        }
        format!(
            "{} | docker-compose={} env={}",
            self.name,
            self.compose_path.display(),
            self.env_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "X".to_string())
        )
    }
}
