//! Spawning the orchestration command in a project directory.

use std::path::Path;
use std::process::{Command, Stdio};

use dcm_core::{ExecMode, Operation};

use crate::command::ComposeCommand;
use crate::error::RunError;

/// Runs one operation in one project directory and blocks until it finishes.
pub trait Runner {
    fn run(&mut self, dir: &Path, operation: Operation, mode: ExecMode) -> Result<(), RunError>;
}

/// [`Runner`] backed by a child process.
///
/// `Attached` inherits stdout/stderr; `Batch` discards both. There is no
/// timeout: the call returns when the child exits.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    command: ComposeCommand,
}

impl ProcessRunner {
    pub fn new(command: ComposeCommand) -> Self {
        Self { command }
    }
}

impl Runner for ProcessRunner {
    fn run(&mut self, dir: &Path, operation: Operation, mode: ExecMode) -> Result<(), RunError> {
        if !dir.is_dir() {
            return Err(RunError::MissingDir {
                dir: dir.to_path_buf(),
            });
        }

        let argv = self.command.argv(operation);
        tracing::debug!(program = %self.command.program, args = ?argv, dir = %dir.display(), "spawning");

        let mut cmd = Command::new(&self.command.program);
        cmd.args(&argv).current_dir(dir).stdin(Stdio::null());
        if mode == ExecMode::Batch {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let status = cmd.status().map_err(|source| RunError::Spawn {
            program: self.command.program.clone(),
            dir: dir.to_path_buf(),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(RunError::Exit {
                program: self.command.program.clone(),
                dir: dir.to_path_buf(),
                code: status.code(),
            })
        }
    }
}
