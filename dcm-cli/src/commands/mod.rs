//! Subcommand handlers.

pub mod init;
pub mod inspect;
pub mod lifecycle;
pub mod list;
pub mod validate;

use anyhow::{Context, Result};
use colored::Colorize;

use dcm_core::{loader, Workspace};

/// Locate and load the workspace from the current directory.
///
/// Warns on stderr when the descriptor's schema version is missing or unknown.
pub fn load_workspace() -> Result<Workspace> {
    let workspace = loader::load().context("cannot load workspace (run `dcm init` to create one)")?;
    if let Some(warning) = workspace.version_warning() {
        tracing::warn!(descriptor = %workspace.descriptor.display(), %warning, "schema version");
        eprintln!("{} {warning}", "⚠".yellow().bold());
    }
    Ok(workspace)
}
