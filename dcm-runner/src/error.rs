//! Error types for dcm-runner.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single orchestration command.
#[derive(Debug, Error)]
pub enum RunError {
    /// The project directory is missing; checked before spawning.
    #[error("project directory {dir} does not exist")]
    MissingDir { dir: PathBuf },

    /// The program could not be started at all (not installed, not executable).
    #[error("failed to start '{program}' in {dir}: {source}")]
    Spawn {
        program: String,
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully. `code` is `None` when it was
    /// killed by a signal.
    #[error("'{program}' failed in {dir} ({})", describe_exit(.code))]
    Exit {
        program: String,
        dir: PathBuf,
        code: Option<i32>,
    },

    /// Empty `--compose` / `DCM_COMPOSE` value.
    #[error("orchestration command is empty")]
    EmptyCommand,
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}
