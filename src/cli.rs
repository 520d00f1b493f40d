//! Command-line surface: argument parsing and dispatch to the workflows.

use crate::config::Config;
use crate::output;
use crate::registry::Registry;
use crate::runner::{RunOutcome, SystemRunner};
use crate::validate::absolutize;
use crate::workflow::{Orchestrator, SwapOptions};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::path::PathBuf;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// DockSwap - register docker-compose projects and swap between them
#[derive(Parser, Debug)]
#[command(name = "dockswap")]
#[command(about = "DockSwap. Tool for swapping projects.")]
#[command(version)]
#[command(after_help = r#"EXAMPLES:
    dockswap add shop --path ./docker-compose.yml --env-path ./.env
    dockswap start shop --remove-other       # stop everything else first
    dockswap start shop --service db --dry   # print the command only
    dockswap stopall --remove

ENVIRONMENT:
    DOCKSWAP_DOCKER_CLI           container CLI (default: docker)
    DOCKSWAP_DOCKER_COMPOSE_CLI   compose CLI (default: docker-compose)
    DOCKSWAP_STORAGE_FILE_NAME    file under ~/.dockswap (default: storage.json)
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version of currently used dockswap
    Version {
        /// Which part of version to output
        #[arg(long, value_enum)]
        part: Option<VersionPart>,

        /// Output only version itself, useless if part is specified
        #[arg(long)]
        mini: bool,
    },

    /// Register a composer for project
    Add {
        project_name: String,

        /// Path to .yml or .json file that must be run using docker-compose
        #[arg(long)]
        path: PathBuf,

        /// If your docker-compose file uses env_file then specify path for that file
        #[arg(long)]
        env_path: Option<PathBuf>,
    },

    /// List all registered composers
    List {
        /// Show more info
        #[arg(long)]
        full: bool,
    },

    /// Delete registered composer
    Delete { project_name: String },

    /// Start containers for registered composer
    Start {
        project_name: String,

        /// Stop and remove all other containers first
        #[arg(long)]
        remove_other: bool,

        /// Do not run command, instead just print it
        #[arg(long)]
        dry: bool,

        /// Name of service to be started. Can be provided multiple times
        #[arg(long = "service", value_name = "SERVICE")]
        services: Vec<String>,
    },

    /// Stop containers for registered composer
    Stop {
        project_name: String,

        /// Stop and remove all other containers first
        #[arg(long)]
        remove_other: bool,

        /// Do not run command, instead just print it
        #[arg(long)]
        dry: bool,
    },

    /// Stop (and/or remove) all running containers
    #[command(name = "stopall")]
    StopAll {
        /// Do not run command, instead just print it
        #[arg(long)]
        dry: bool,

        /// Remove stopped containers
        #[arg(long)]
        remove: bool,
    },

    /// Prune existing registered composers
    Prune {
        /// Do not ask for confirmation
        #[arg(long)]
        no_input: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VersionPart {
    Major,
    Minor,
    Patch,
}

pub fn version_line(part: Option<VersionPart>, mini: bool) -> String {
    let nth = |n: usize| VERSION.split('.').nth(n).unwrap_or_default().to_string();
    match part {
        Some(VersionPart::Major) => nth(0),
        Some(VersionPart::Minor) => nth(1),
        Some(VersionPart::Patch) => nth(2),
        None if mini => VERSION.to_string(),
        None => format!("DockSwapping projects with v{VERSION}"),
    }
}

/// Resolved config, the registry and the host runner for one invocation.
struct Session {
    config: Config,
    registry: Registry,
    runner: SystemRunner,
}

impl Session {
    fn open() -> Result<Self> {
        let config = Config::from_env()?;
        let registry = Registry::from_config(&config)?;
        Ok(Session {
            config,
            registry,
            runner: SystemRunner,
        })
    }

    fn orchestrator(&mut self) -> Orchestrator<'_, SystemRunner> {
        Orchestrator::new(&mut self.registry, &self.runner, &self.config)
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Version { part, mini } => output::plain(&version_line(part, mini)),

        Commands::Add {
            project_name,
            path,
            env_path,
        } => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            let compose = absolutize(&path, &cwd);
            let env = env_path.map(|p| absolutize(&p, &cwd));
            Session::open()?
                .orchestrator()
                .add(&project_name, &compose, env.as_deref())?;
            output::success(&format!(
                "Successfully registered composer for project \"{project_name}\""
            ));
        }

        Commands::List { full } => {
            for line in Session::open()?.orchestrator().list(full) {
                output::plain(&line);
            }
        }

        Commands::Delete { project_name } => {
            if Session::open()?.orchestrator().delete(&project_name)? {
                output::success(&format!(
                    "Successfully removed \"{project_name}\" from registered composers"
                ));
            } else {
                output::warning(&format!(
                    "Seems like composer for a project \"{project_name}\" did not exist or already removed"
                ));
            }
        }

        Commands::Start {
            project_name,
            remove_other,
            dry,
            services,
        } => {
            let opts = SwapOptions {
                dry,
                remove_others: remove_other,
                services,
            };
            let mut session = Session::open()?;
            match session.orchestrator().start(&project_name, &opts).await? {
                RunOutcome::Dry(cmd) => output::plain(&cmd),
                RunOutcome::Executed => output::success("Successfully swapped a project!"),
            }
        }

        Commands::Stop {
            project_name,
            remove_other,
            dry,
        } => {
            let mut session = Session::open()?;
            match session.orchestrator().stop(&project_name, dry, remove_other).await? {
                RunOutcome::Dry(cmd) => output::plain(&cmd),
                RunOutcome::Executed => output::success("Successfully stopped containers!"),
            }
        }

        Commands::StopAll { dry, remove } => {
            let mut session = Session::open()?;
            let outcome = session.orchestrator().stop_all(dry, remove).await?;
            if dry {
                if let Some(RunOutcome::Dry(cmd)) = outcome {
                    output::plain(&cmd);
                }
            } else {
                output::success(&format!(
                    "Successfully stopped{} all running containers!",
                    if remove { " and removed" } else { "" }
                ));
            }
        }

        Commands::Prune { no_input } => prune(Session::open()?.registry, no_input)?,
    }

    Ok(())
}

fn prune(registry: Registry, no_input: bool) -> Result<()> {
    let confirmed = no_input
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Are you sure to prune all your registered composers?")
            .default(false)
            .interact()?;

    if confirmed {
        registry.prune()?;
        output::success("Pruned all registered composers");
    } else {
        output::warning("Pruning cancelled...");
    }
    Ok(())
}
