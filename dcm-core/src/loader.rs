//! Descriptor parsing and project path resolution.
//!
//! `load()` = [`find_descriptor`] + read + [`parse`]. Every project path in the
//! returned [`Workspace`] is absolute; relative entries are joined onto the
//! descriptor's directory and lexically cleaned. The file on disk is never
//! modified.

use std::path::{Component, Path, PathBuf};

use crate::error::{LoadError, SyntaxError};
use crate::locator::{find_descriptor, find_descriptor_from, Located};
use crate::types::{DescriptorFormat, Workspace};

/// Deserialize `bytes` and resolve project paths against `base_dir`.
pub fn parse(
    bytes: &[u8],
    format: DescriptorFormat,
    base_dir: &Path,
    descriptor: &Path,
) -> Result<Workspace, LoadError> {
    let parsed: Result<Workspace, SyntaxError> = match format {
        DescriptorFormat::Json => serde_json::from_slice(bytes).map_err(SyntaxError::from),
        DescriptorFormat::Yaml => serde_yaml::from_slice(bytes).map_err(SyntaxError::from),
    };
    let mut workspace = parsed.map_err(|source| LoadError::DescriptorParseFailed {
        path: descriptor.to_path_buf(),
        source,
    })?;

    workspace.base_dir = base_dir.to_path_buf();
    workspace.descriptor = descriptor.to_path_buf();

    for (name, project) in workspace.projects.iter_mut() {
        if project.path.as_os_str().is_empty() {
            return Err(LoadError::InvalidProject {
                path: descriptor.to_path_buf(),
                project: name.clone(),
                reason: "'path' must not be empty".to_string(),
            });
        }
        if !project.path.is_absolute() {
            project.path = clean(&base_dir.join(&project.path));
        }
    }

    tracing::debug!(
        projects = workspace.projects.len(),
        groups = workspace.groups.len(),
        base_dir = %base_dir.display(),
        "workspace loaded"
    );
    Ok(workspace)
}

/// Read and parse an already-located descriptor.
///
/// Returns `LoadError::DescriptorReadFailed` if the file vanished or is
/// unreadable, `LoadError::DescriptorParseFailed` if malformed.
pub fn load_from(located: &Located) -> Result<Workspace, LoadError> {
    let bytes =
        std::fs::read(&located.descriptor).map_err(|source| LoadError::DescriptorReadFailed {
            path: located.descriptor.clone(),
            source,
        })?;
    parse(&bytes, located.format, &located.base_dir, &located.descriptor)
}

/// Locate from `start` and load.
pub fn load_at(start: &Path) -> Result<Workspace, LoadError> {
    load_from(&find_descriptor_from(start)?)
}

/// Locate from the current directory and load.
pub fn load() -> Result<Workspace, LoadError> {
    load_from(&find_descriptor()?)
}

/// Lexical normalisation: drops `.` and folds `..` into the preceding normal
/// component. `..` directly under the root stays at the root. Touches no disk.
pub fn clean(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}
