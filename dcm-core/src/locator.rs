//! Upward search for the workspace descriptor.
//!
//! # API pattern
//!
//! - `find_descriptor_from(start)` — explicit start directory; used in tests
//! - `find_descriptor()` — starts from the process working directory
//!
//! Tests must NEVER call the no-arg wrapper; the working directory is shared
//! by every test thread.

use std::path::{Path, PathBuf};

use crate::error::LoadError;
use crate::loader::clean;
use crate::types::DescriptorFormat;

/// Descriptor filenames probed in each directory, in priority order.
pub const DESCRIPTOR_FILES: &[(&str, DescriptorFormat)] = &[
    ("workspace.json", DescriptorFormat::Json),
    ("workspace.yaml", DescriptorFormat::Yaml),
    ("workspace.yml", DescriptorFormat::Yaml),
];

/// A descriptor found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub descriptor: PathBuf,
    /// Directory containing `descriptor`; relative project paths resolve here.
    pub base_dir: PathBuf,
    pub format: DescriptorFormat,
}

/// Walk from `start` towards the filesystem root until a directory holds one
/// of [`DESCRIPTOR_FILES`].
///
/// `start` is made absolute and lexically cleaned first, so every directory
/// probed is an ancestor of it. Stops with [`LoadError::DescriptorNotFound`]
/// once the parent of the current directory is the directory itself.
pub fn find_descriptor_from(start: &Path) -> Result<Located, LoadError> {
    let start = if start.is_absolute() {
        clean(start)
    } else {
        clean(
            &std::env::current_dir()
                .map_err(LoadError::CurrentDir)?
                .join(start),
        )
    };

    let mut current: &Path = &start;
    loop {
        if let Some(found) = probe(current) {
            tracing::debug!(descriptor = %found.descriptor.display(), "found workspace descriptor");
            return Ok(found);
        }
        match current.parent() {
            Some(parent) if parent != current => current = parent,
            _ => break,
        }
    }

    Err(LoadError::DescriptorNotFound { start })
}

/// `find_descriptor_from` starting at the current working directory.
pub fn find_descriptor() -> Result<Located, LoadError> {
    let cwd = std::env::current_dir().map_err(LoadError::CurrentDir)?;
    find_descriptor_from(&cwd)
}

fn probe(dir: &Path) -> Option<Located> {
    DESCRIPTOR_FILES.iter().find_map(|(name, format)| {
        let candidate = dir.join(name);
        candidate.is_file().then(|| Located {
            descriptor: candidate,
            base_dir: dir.to_path_buf(),
            format: *format,
        })
    })
}
