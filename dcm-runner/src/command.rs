//! Orchestration command line.

use std::fmt;
use std::str::FromStr;

use dcm_core::Operation;

use crate::error::RunError;

/// Program used when neither `--compose` nor `DCM_COMPOSE` is given.
pub const DEFAULT_COMPOSE: &str = "docker-compose";

/// The external orchestration command, e.g. `docker-compose` or
/// `docker compose`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeCommand {
    pub program: String,
    /// Leading arguments placed before the operation's own arguments.
    pub args: Vec<String>,
}

impl Default for ComposeCommand {
    fn default() -> Self {
        Self {
            program: DEFAULT_COMPOSE.to_string(),
            args: Vec::new(),
        }
    }
}

impl FromStr for ComposeCommand {
    type Err = RunError;

    /// Whitespace-separated; no shell quoting.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(RunError::EmptyCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }
}

impl fmt::Display for ComposeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

impl ComposeCommand {
    /// Full argument list for `operation`, leading arguments first.
    pub fn argv(&self, operation: Operation) -> Vec<String> {
        self.args
            .iter()
            .cloned()
            .chain(operation_args(operation).iter().map(|s| s.to_string()))
            .collect()
    }
}

/// Arguments the orchestration tool expects for each logical operation.
pub fn operation_args(operation: Operation) -> &'static [&'static str] {
    match operation {
        Operation::Up => &["up", "-d"],
        Operation::Down => &["down"],
        Operation::Restart => &["restart"],
        Operation::Status => &["ps"],
        Operation::Logs => &["logs"],
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("docker-compose", "docker-compose", &[])]
    #[case("docker compose", "docker", &["compose"])]
    #[case("  podman   compose  ", "podman", &["compose"])]
    fn parses_whitespace_separated(
        #[case] raw: &str,
        #[case] program: &str,
        #[case] args: &[&str],
    ) {
        let cmd: ComposeCommand = raw.parse().expect("parse");
        assert_eq!(cmd.program, program);
        assert_eq!(cmd.args, args);
    }

    #[test]
    fn empty_command_is_rejected() {
        assert!(matches!(
            "   ".parse::<ComposeCommand>(),
            Err(RunError::EmptyCommand)
        ));
    }

    #[test]
    fn argv_puts_leading_args_first() {
        let cmd: ComposeCommand = "docker compose".parse().expect("parse");
        assert_eq!(cmd.argv(Operation::Up), ["compose", "up", "-d"]);
        assert_eq!(cmd.argv(Operation::Status), ["compose", "ps"]);
        assert_eq!(cmd.to_string(), "docker compose");
    }
}
