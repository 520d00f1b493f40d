//! Process execution. Commands are whitespace-split into program + args.

use crate::error::{DockswapError, Result};
use std::io;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Exit code reported when a process was terminated by a signal.
pub const SIGNALLED: i32 = -1;

/// Output of a captured command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captured {
    pub code: i32,
    pub stdout: String,
}

/// Executes external commands. Swapped out for a fake in tests.
#[allow(async_fn_in_trait)]
pub trait Runner {
    /// Run to completion with inherited stdio and return the exit code.
    async fn status(&self, command: &str) -> io::Result<i32>;

    /// Run to completion capturing stdout.
    async fn output(&self, command: &str) -> io::Result<Captured>;
}

/// Runs commands on the host with `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    async fn status(&self, command: &str) -> io::Result<i32> {
        let (program, args) = split(command)?;
        let status = Command::new(program).args(args).status().await?;
        Ok(status.code().unwrap_or(SIGNALLED))
    }

    async fn output(&self, command: &str) -> io::Result<Captured> {
        let (program, args) = split(command)?;
        let out = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .await?;
        Ok(Captured {
            code: out.status.code().unwrap_or(SIGNALLED),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
        })
    }
}

fn split(command: &str) -> io::Result<(&str, Vec<&str>)> {
    let mut tokens = command.split_whitespace();
    let program = tokens
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command"))?;
    Ok((program, tokens.collect()))
}

/// Result of [`run`]: the command itself in dry mode, nothing otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Dry(String),
    Executed,
}

/// Execute `command`, or hand it back untouched when `dry`.
pub async fn run<R: Runner>(runner: &R, command: &str, dry: bool) -> Result<RunOutcome> {
    if dry {
        return Ok(RunOutcome::Dry(command.to_string()));
    }

    debug!(command, "spawning");
    let code = runner.status(command).await.map_err(|source| DockswapError::Spawn {
        command: command.to_string(),
        source,
    })?;
    debug!(command, code, "exited");

    if code != 0 {
        return Err(DockswapError::CommandFailed {
            command: command.to_string(),
            code,
        });
    }
    Ok(RunOutcome::Executed)
}

/// Execute `command` and return its stdout. Non-zero exit is a failure.
pub async fn capture<R: Runner>(runner: &R, command: &str) -> Result<String> {
    debug!(command, "capturing");
    let out = runner.output(command).await.map_err(|source| DockswapError::Spawn {
        command: command.to_string(),
        source,
    })?;
    if out.code != 0 {
        return Err(DockswapError::CommandFailed {
            command: command.to_string(),
            code: out.code,
        });
    }
    Ok(out.stdout)
}
