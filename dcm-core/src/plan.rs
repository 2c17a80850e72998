//! Target resolution and execution plans.
//!
//! A CLI target is resolved group-first: only when the name is not a group at
//! all does resolution fall back to the project map. A group that exists but
//! fails to expand (missing services, cycle) never falls back.

use std::path::PathBuf;

use crate::error::ResolveError;
use crate::expand::{expand_group, Expansion};
use crate::types::{ExecMode, GroupName, Operation, ProjectName, Workspace};

/// What a CLI target name resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Group(Expansion),
    Project(ProjectName),
}

/// Resolve `name` as a group, falling back to a project on `GroupNotFound`.
pub fn resolve_target(workspace: &Workspace, name: &str) -> Result<Target, ResolveError> {
    match expand_group(workspace, &GroupName::from(name)) {
        Ok(expansion) => Ok(Target::Group(expansion)),
        Err(ResolveError::GroupNotFound { .. }) => {
            let project = ProjectName::from(name);
            if workspace.project(&project).is_some() {
                tracing::debug!(name, "resolved as project");
                Ok(Target::Project(project))
            } else {
                Err(ResolveError::GroupNotFound {
                    name: name.to_string(),
                })
            }
        }
        Err(other) => Err(other),
    }
}

/// One unit of work: a project and the directory to run in.
///
/// `dir` is an error when the project could not be resolved; such steps are
/// reported as failures without invoking the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanStep {
    pub project: ProjectName,
    pub dir: Result<PathBuf, ResolveError>,
}

/// Ordered sequence of steps for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub operation: Operation,
    pub steps: Vec<PlanStep>,
    pub mode: ExecMode,
}

impl Plan {
    /// Plan for a resolved target.
    pub fn for_target(workspace: &Workspace, target: &Target, operation: Operation) -> Self {
        let steps = match target {
            Target::Project(name) => vec![step(workspace, name, None)],
            Target::Group(expansion) => expansion
                .members
                .iter()
                .map(|m| step(workspace, m, Some(&expansion.group)))
                .collect(),
        };
        Self::new(operation, steps)
    }

    /// Plan covering every project in the workspace, by name.
    pub fn for_all(workspace: &Workspace, operation: Operation) -> Self {
        let steps = workspace
            .projects
            .iter()
            .map(|(name, project)| PlanStep {
                project: name.clone(),
                dir: Ok(project.path.clone()),
            })
            .collect();
        Self::new(operation, steps)
    }

    fn new(operation: Operation, steps: Vec<PlanStep>) -> Self {
        let mode = if steps.len() <= 1 || operation.forwards_output() {
            ExecMode::Attached
        } else {
            ExecMode::Batch
        };
        Self {
            operation,
            steps,
            mode,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }
}

fn step(workspace: &Workspace, name: &ProjectName, group: Option<&GroupName>) -> PlanStep {
    let dir = match (workspace.project(name), group) {
        (Some(project), _) => Ok(project.path.clone()),
        (None, Some(group)) => Err(ResolveError::UnresolvedMember {
            group: group.clone(),
            member: name.clone(),
        }),
        (None, None) => Err(ResolveError::ProjectNotFound { name: name.clone() }),
    };
    PlanStep {
        project: name.clone(),
        dir,
    }
}
