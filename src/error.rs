use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the registry, the validators and the workflows.
#[derive(Error, Debug)]
pub enum DockswapError {
    #[error("Composer for project \"{0}\" is already registered. Consider removing it first")]
    DuplicateProject(String),

    #[error("No composer found for \"{0}\". May be register it first?")]
    NotFound(String),

    #[error("{} is not a valid file path. May be you have provided a directory?", .0.display())]
    InvalidPath(PathBuf),

    #[error("\"{}\" is not a valid YAML/JSON path", .0.display())]
    InvalidDefinitionFile(PathBuf),

    #[error("Project name must not be empty")]
    InvalidProjectName,

    #[error("Command \"{command}\" exited with status code {code}")]
    CommandFailed { command: String, code: i32 },

    #[error("Failed to launch \"{command}\": {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage error at {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode registered composers: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DockswapError>;
