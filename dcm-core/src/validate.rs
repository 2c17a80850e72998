//! Whole-workspace consistency check behind `dcm validate`.
//!
//! Collects every problem instead of stopping at the first one.

use std::fmt;
use std::path::PathBuf;

use crate::error::ResolveError;
use crate::expand::expand_group;
use crate::types::{GroupName, ProjectName, Workspace};

/// A single validation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// A group failed to expand, or references an unknown project.
    Group(ResolveError),
    /// Resolved project directory does not exist (or is not a directory).
    MissingProjectDir { project: ProjectName, path: PathBuf },
    /// A name is both a group and a project; the group wins on `up`.
    Shadowed { name: String },
}

impl Finding {
    pub fn is_error(&self) -> bool {
        !matches!(self, Finding::Shadowed { .. })
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::Group(err) => err.fmt(f),
            Finding::MissingProjectDir { project, path } => {
                write!(f, "project '{project}': directory {} does not exist", path.display())
            }
            Finding::Shadowed { name } => write!(
                f,
                "'{name}' is both a group and a project; `up {name}` starts the group"
            ),
        }
    }
}

/// Check every group and project. Groups come first, then projects, each in
/// name order.
pub fn validate(workspace: &Workspace) -> Vec<Finding> {
    let mut findings = Vec::new();

    for name in workspace.groups.keys() {
        match expand_group(workspace, name) {
            Ok(expansion) => findings.extend(
                expansion
                    .unresolved(workspace)
                    .into_iter()
                    .map(Finding::Group),
            ),
            Err(err) => findings.push(Finding::Group(err)),
        }
    }

    for (name, project) in &workspace.projects {
        if workspace.group(&GroupName::from(name.0.as_str())).is_some() {
            findings.push(Finding::Shadowed {
                name: name.0.clone(),
            });
        }
        if !project.path.is_dir() {
            findings.push(Finding::MissingProjectDir {
                project: name.clone(),
                path: project.path.clone(),
            });
        }
    }

    findings
}
