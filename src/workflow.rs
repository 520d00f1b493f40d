//! The operations behind each subcommand: add, list, delete, start, stop, stop-all.

use crate::command;
use crate::config::Config;
use crate::error::{DockswapError, Result};
use crate::project::{Action, ProjectRecord};
use crate::registry::Registry;
use crate::runner::{capture, run, RunOutcome, Runner};
use crate::validate::{validate_compose_path, validate_path, validate_project_name};
use std::path::Path;
use tracing::{debug, info};

/// Options for starting or stopping one project.
#[derive(Debug, Clone, Default)]
pub struct SwapOptions {
    /// Build and return the command instead of running it.
    pub dry: bool,
    /// Stop and remove every container on the host first.
    pub remove_others: bool,
    /// Only start these services. Ignored when stopping.
    pub services: Vec<String>,
}

pub struct Orchestrator<'a, R: Runner> {
    registry: &'a mut Registry,
    runner: &'a R,
    config: &'a Config,
}

impl<'a, R: Runner> Orchestrator<'a, R> {
    pub fn new(registry: &'a mut Registry, runner: &'a R, config: &'a Config) -> Self {
        Orchestrator {
            registry,
            runner,
            config,
        }
    }

    /// Validate and register a project. Paths are stored as given.
    pub fn add(&mut self, name: &str, compose_path: &Path, env_path: Option<&Path>) -> Result<ProjectRecord> {
        validate_project_name(name)?;
        if self.registry.find(name).is_some() {
            return Err(DockswapError::DuplicateProject(name.to_string()));
        }
        if let Some(env) = env_path {
            validate_path(env)?;
        }
        validate_compose_path(compose_path)?;

        let record = ProjectRecord::new(name, compose_path, env_path.map(Path::to_path_buf));
        self.registry.register(&record)?;
        info!(project = name, "registered");
        Ok(record)
    }

    /// `"<n>. <project>"` lines, numbered from 1.
    pub fn list(&mut self, full: bool) -> Vec<String> {
        self.registry
            .get_all()
            .iter()
            .enumerate()
            .map(|(i, r)| format!("{}. {}", i + 1, r.represent(full)))
            .collect()
    }

    pub fn delete(&mut self, name: &str) -> Result<bool> {
        self.registry.delete(name)
    }

    pub async fn start(&mut self, name: &str, opts: &SwapOptions) -> Result<RunOutcome> {
        self.swap(name, Action::Start, opts).await
    }

    pub async fn stop(&mut self, name: &str, dry: bool, remove_others: bool) -> Result<RunOutcome> {
        let opts = SwapOptions {
            dry,
            remove_others,
            services: Vec::new(),
        };
        self.swap(name, Action::Stop, &opts).await
    }

    async fn swap(&mut self, name: &str, action: Action, opts: &SwapOptions) -> Result<RunOutcome> {
        let record = self.registry.get(name)?;

        if opts.remove_others && !opts.dry {
            info!("stopping all other containers");
            self.stop_all(false, true).await?;
        }

        let cmd = command::build(&self.config.compose_bin, &record, action, &opts.services);
        debug!(project = name, verb = action.verb(), command = %cmd, "built command");

        match run(self.runner, &cmd, opts.dry).await? {
            RunOutcome::Dry(cmd) if opts.remove_others => {
                let shown = match self.stop_all(true, true).await? {
                    Some(RunOutcome::Dry(pre)) => command::and_then(&[pre, cmd]),
                    _ => cmd,
                };
                Ok(RunOutcome::Dry(shown))
            }
            outcome => Ok(outcome),
        }
    }

    /// Stop (and with `remove`, remove) every container the runtime knows about.
    ///
    /// Returns `None` when there is nothing to stop. In dry mode the returned
    /// command lists the ids found by `ps -aq`; the listing itself always runs.
    pub async fn stop_all(&self, dry: bool, remove: bool) -> Result<Option<RunOutcome>> {
        let docker = &self.config.docker_bin;

        let listing = capture(self.runner, &command::list_containers(docker)).await?;
        let ids: Vec<String> = listing.split_whitespace().map(str::to_string).collect();
        if ids.is_empty() {
            debug!("no containers to stop");
            return Ok(None);
        }

        let stop_cmd = command::stop_containers(docker, &ids);
        let rm_cmd = command::remove_containers(docker, &ids);

        if dry {
            let mut commands = vec![stop_cmd];
            if remove {
                commands.push(rm_cmd);
            }
            return Ok(Some(RunOutcome::Dry(command::and_then(&commands))));
        }

        run(self.runner, &stop_cmd, false).await?;
        if remove {
            run(self.runner, &rm_cmd, false).await?;
        }
        info!(count = ids.len(), removed = remove, "stopped containers");
        Ok(Some(RunOutcome::Executed))
    }
}
