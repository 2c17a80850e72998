//! `dcm validate` — report every problem in the workspace descriptor.

use anyhow::{bail, Result};
use colored::Colorize;

use dcm_core::{validate::validate, Workspace};

pub fn run(workspace: &Workspace) -> Result<()> {
    let findings = validate(workspace);
    let errors = findings.iter().filter(|f| f.is_error()).count();

    for finding in &findings {
        if finding.is_error() {
            println!("{} {finding}", "✗".red().bold());
        } else {
            println!("{} {finding}", "⚠".yellow().bold());
        }
    }

    if errors > 0 {
        bail!(
            "{} has {errors} problem(s)",
            workspace.descriptor.display()
        );
    }

    println!(
        "{} {} is valid ({} projects, {} groups)",
        "✓".green().bold(),
        workspace.descriptor.display(),
        workspace.projects.len(),
        workspace.groups.len()
    );
    Ok(())
}
