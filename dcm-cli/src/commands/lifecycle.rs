//! `dcm up|down|restart|status|logs` — run the orchestration command per project.

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use dcm_core::{resolve_target, Operation, Plan, Target, Workspace};
use dcm_runner::{execute, BatchReport, ComposeCommand, ProcessRunner, StepEvent};

/// Arguments for `dcm up`.
#[derive(Args, Debug)]
pub struct UpArgs {
    /// Group name, or project name when no group has that name.
    pub target: String,
}

/// Arguments for verbs that default to every project.
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Limit to a group or project. Omit to act on every project.
    pub target: Option<String>,
}

impl TargetArgs {
    pub fn run(self, workspace: &Workspace, compose: &ComposeCommand, operation: Operation) -> Result<()> {
        run(workspace, compose, operation, self.target.as_deref())
    }
}

/// Build the plan for `target` (or every project) and run it to completion.
///
/// Fails after all steps ran if any step failed.
pub fn run(
    workspace: &Workspace,
    compose: &ComposeCommand,
    operation: Operation,
    target: Option<&str>,
) -> Result<()> {
    let plan = match target {
        Some(name) => {
            let resolved = resolve_target(workspace, name)
                .with_context(|| format!("cannot {operation} '{name}'"))?;
            print_header(operation, Some((name, &resolved)));
            Plan::for_target(workspace, &resolved, operation)
        }
        None => {
            print_header(operation, None);
            Plan::for_all(workspace, operation)
        }
    };

    if plan.is_empty() {
        println!("Nothing to do.");
        return Ok(());
    }

    let mut runner = ProcessRunner::new(compose.clone());
    let report = execute(&plan, &mut runner, |event| print_event(event, operation));

    if plan.len() > 1 {
        print_summary(&report);
    }
    if !report.is_success() {
        bail!("{} of {} projects failed", report.failed(), report.attempted());
    }
    Ok(())
}

fn print_header(operation: Operation, target: Option<(&str, &Target)>) {
    let line = match target {
        Some((name, Target::Group(expansion))) => format!(
            "{} group '{name}' ({} projects)",
            progressive(operation),
            expansion.members.len()
        ),
        Some((name, Target::Project(_))) => format!("{} '{name}'", progressive(operation)),
        None => format!("{} all projects", progressive(operation)),
    };
    println!("{}", line.cyan().bold());
}

fn print_event(event: &StepEvent<'_>, operation: Operation) {
    match event {
        StepEvent::Started { project, index, total } => {
            let counter = format!("[{}/{}]", index + 1, total).bright_black();
            if operation.forwards_output() {
                println!("{counter} {}", project.to_string().blue().bold());
            } else {
                println!("{counter} {} {project}", progressive(operation));
            }
        }
        StepEvent::Finished(outcome) => match &outcome.result {
            Ok(()) if !operation.forwards_output() => {
                println!("  {} {}", "✓".green().bold(), outcome.project);
            }
            Ok(()) => println!(),
            Err(err) => println!("  {} {}: {err}", "✗".red().bold(), outcome.project),
        },
    }
}

fn print_summary(report: &BatchReport) {
    let failed = report.failed();
    let line = format!(
        "{}: {} succeeded, {} failed",
        report.operation,
        report.succeeded(),
        failed
    );
    if failed == 0 {
        println!("\n{} {}", "✓".green().bold(), line);
    } else {
        println!("\n{} {}", "✗".red().bold(), line);
    }
}

fn progressive(operation: Operation) -> &'static str {
    match operation {
        Operation::Up => "Starting",
        Operation::Down => "Stopping",
        Operation::Restart => "Restarting",
        Operation::Status => "Status of",
        Operation::Logs => "Logs of",
    }
}
