//! `dcm inspect <name>` — how a name resolves, without running anything.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use dcm_core::{
    expand::extends_chain, resolve_target, Operation, Plan, ProjectName, Target, Workspace,
};

/// Arguments for `dcm inspect`.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Group or project name.
    pub name: String,
}

impl InspectArgs {
    pub fn run(self, workspace: &Workspace) -> Result<()> {
        let target = resolve_target(workspace, &self.name)
            .with_context(|| format!("cannot resolve '{}'", self.name))?;

        match &target {
            Target::Project(name) => print_project(workspace, name),
            Target::Group(expansion) => {
                let chain = extends_chain(workspace, &expansion.group)?;
                println!("{} {}", "group".cyan().bold(), expansion.group);
                if chain.len() > 1 {
                    let names: Vec<&str> = chain.iter().map(|g| g.0.as_str()).collect();
                    println!("  extends: {}", names.join(" → "));
                }
                if workspace.project(&ProjectName::from(self.name.as_str())).is_some() {
                    println!(
                        "  {} also a project; `up {}` starts the group",
                        "⚠".yellow().bold(),
                        self.name
                    );
                }

                let plan = Plan::for_target(workspace, &target, Operation::Up);
                if expansion.is_empty() {
                    println!("  (no members)");
                }
                for (i, step) in plan.steps.iter().enumerate() {
                    let detail = match &step.dir {
                        Ok(dir) => dir.display().to_string().bright_black(),
                        Err(err) => err.to_string().red(),
                    };
                    println!("  {}. {} {detail}", i + 1, step.project);
                }
            }
        }
        Ok(())
    }
}

fn print_project(workspace: &Workspace, name: &ProjectName) {
    let Some(project) = workspace.project(name) else {
        return;
    };
    println!("{} {}", "project".cyan().bold(), name);
    if !project.description.is_empty() {
        println!("  description: {}", project.description);
    }
    let status = if project.path.is_dir() {
        "".normal()
    } else {
        "(missing)".red()
    };
    println!("  path: {} {status}", project.path.display());
}
