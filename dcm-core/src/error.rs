//! Error types for dcm-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::{GroupName, ProjectName};

/// Load-time errors. Any of these is fatal to the whole invocation.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The current working directory could not be determined.
    #[error("cannot determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    /// No ancestor of `start` (inclusive) contains a descriptor file.
    #[error(
        "no workspace descriptor (workspace.json, workspace.yaml or workspace.yml) found in {start} or any parent directory"
    )]
    DescriptorNotFound { start: PathBuf },

    /// The descriptor was located but could not be read.
    #[error("cannot read {path}: {source}")]
    DescriptorReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed descriptor; the source carries line/column context.
    #[error("failed to parse {path}: {source}")]
    DescriptorParseFailed {
        path: PathBuf,
        #[source]
        source: SyntaxError,
    },

    /// Structurally valid but semantically unusable project entry.
    #[error("project '{project}' in {path}: {reason}")]
    InvalidProject {
        path: PathBuf,
        project: ProjectName,
        reason: String,
    },
}

/// Underlying deserializer error for either descriptor format.
#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Resolution-time errors, scoped to the target being resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no group or project named '{name}'")]
    GroupNotFound { name: String },

    #[error("project '{name}' not found")]
    ProjectNotFound { name: ProjectName },

    #[error("group '{group}' has no 'services' field")]
    GroupMissingServices { group: GroupName },

    #[error("group '{group}' extends unknown group '{extends}'")]
    UnknownExtension { group: GroupName, extends: GroupName },

    #[error("group '{group}' references unknown project '{member}'")]
    UnresolvedMember { group: GroupName, member: ProjectName },

    #[error("cyclic group extension: {}", format_chain(.chain))]
    CyclicGroupExtension { chain: Vec<GroupName> },
}

fn format_chain(chain: &[GroupName]) -> String {
    chain
        .iter()
        .map(|g| g.0.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}
