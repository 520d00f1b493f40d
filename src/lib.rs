//! dockswap - register docker-compose projects by name and swap between them.
//!
//! The registry persists projects to `~/.dockswap/storage.json`; the workflows
//! build `docker-compose` / `docker` command lines and run (or just print) them.

pub mod cli;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
pub mod output;
pub mod project;
pub mod registry;
pub mod runner;
pub mod validate;
pub mod workflow;

pub use error::{DockswapError, Result};
pub use project::{Action, ProjectRecord};
pub use registry::Registry;
pub use runner::{RunOutcome, Runner, SystemRunner};
pub use workflow::{Orchestrator, SwapOptions};
