//! `dcm list` — projects and groups of the current workspace.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use dcm_core::Workspace;

/// Arguments for `dcm list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ListJson {
    workspace: String,
    version: String,
    projects: Vec<ProjectJson>,
    groups: Vec<GroupJson>,
}

#[derive(Serialize)]
struct ProjectJson {
    name: String,
    description: String,
    path: String,
}

#[derive(Serialize)]
struct GroupJson {
    name: String,
    extends: Option<String>,
    services: Option<Vec<String>>,
}

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "project")]
    name: String,
    #[tabled(rename = "description")]
    description: String,
    #[tabled(rename = "path")]
    path: String,
}

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "group")]
    name: String,
    #[tabled(rename = "extends")]
    extends: String,
    #[tabled(rename = "services")]
    services: String,
}

impl ListArgs {
    pub fn run(self, workspace: &Workspace) -> Result<()> {
        if self.json {
            return print_json(workspace);
        }
        print_tables(workspace);
        Ok(())
    }
}

fn print_json(workspace: &Workspace) -> Result<()> {
    let payload = ListJson {
        workspace: workspace.descriptor.display().to_string(),
        version: workspace.version.clone(),
        projects: workspace
            .projects
            .iter()
            .map(|(name, p)| ProjectJson {
                name: name.0.clone(),
                description: p.description.clone(),
                path: p.path.display().to_string(),
            })
            .collect(),
        groups: workspace
            .groups
            .iter()
            .map(|(name, g)| GroupJson {
                name: name.0.clone(),
                extends: g.extends.as_ref().map(|e| e.0.clone()),
                services: g
                    .services
                    .as_ref()
                    .map(|s| s.iter().map(|m| m.0.clone()).collect()),
            })
            .collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize list JSON")?
    );
    Ok(())
}

fn print_tables(workspace: &Workspace) {
    println!("{} {}", "Workspace:".cyan().bold(), workspace.descriptor.display());

    if workspace.projects.is_empty() {
        println!("No projects defined.");
    } else {
        let rows: Vec<ProjectRow> = workspace
            .projects
            .iter()
            .map(|(name, p)| ProjectRow {
                name: name.0.clone(),
                description: p.description.clone(),
                path: p.path.display().to_string(),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
    }

    if workspace.groups.is_empty() {
        println!("No groups defined.");
        return;
    }
    let rows: Vec<GroupRow> = workspace
        .groups
        .iter()
        .map(|(name, g)| GroupRow {
            name: name.0.clone(),
            extends: g.extends.as_ref().map(|e| e.0.clone()).unwrap_or_default(),
            services: match &g.services {
                Some(members) => members
                    .iter()
                    .map(|m| m.0.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                None => "(missing)".to_string(),
            },
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}
