//! Command line construction. Everything here is pure: no I/O, no env lookups.

use crate::project::{Action, ProjectRecord};

/// Separator used when several commands are shown as one dry-run line.
pub const AND_THEN: &str = " && ";

/// Build the orchestration command for `record`.
///
/// `up` gets the env file (when set) and `-d`; `down` gets neither. `services`
/// filters which services are started and is ignored for [`Action::Stop`].
pub fn build(compose_bin: &str, record: &ProjectRecord, action: Action, services: &[String]) -> String {
    let env_part = match (action, &record.env_path) {
        (Action::Start, Some(env)) => format!("--env-file {}", env.display()),
        _ => String::new(),
    };
    let file_part = format!("-f {}", record.compose_path.display());
    let detached_part = if action == Action::Start { "-d" } else { "" };
    let only_part = match action {
        Action::Start => services
            .iter()
            .map(|s| s.trim())
            .collect::<Vec<_>>()
            .join(" "),
        Action::Stop => String::new(),
    };

    justify(&[
        compose_bin,
        &env_part,
        &file_part,
        action.verb(),
        detached_part,
        &only_part,
    ])
}

/// `<docker> ps -aq`: ids of every container, running or stopped.
pub fn list_containers(docker_bin: &str) -> String {
    justify(&[docker_bin, "ps", "-aq"])
}

pub fn stop_containers(docker_bin: &str, ids: &[String]) -> String {
    justify(&[docker_bin, "stop", &ids.join(" ")])
}

pub fn remove_containers(docker_bin: &str, ids: &[String]) -> String {
    justify(&[docker_bin, "rm", &ids.join(" ")])
}

/// Join already-built commands for display, `a && b`.
pub fn and_then<S: AsRef<str>>(commands: &[S]) -> String {
    commands
        .iter()
        .map(|c| c.as_ref())
        .collect::<Vec<_>>()
        .join(AND_THEN)
}

// Collapse whitespace runs so omitted segments leave no gaps.
fn justify(parts: &[&str]) -> String {
    parts
        .iter()
        .flat_map(|p| p.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}
