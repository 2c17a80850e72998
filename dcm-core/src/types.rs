//! Domain types for a dcm workspace.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.
//! Descriptor types deserialize from both JSON and YAML via serde.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed name for a project entry in the workspace descriptor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(pub String);

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProjectName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed name for a group entry in the workspace descriptor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupName(pub String);

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for GroupName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for GroupName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Logical lifecycle operation handed to the process runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Up,
    Down,
    Restart,
    Status,
    Logs,
}

impl Operation {
    /// Inspection operations forward their output even when run as a batch.
    pub fn forwards_output(self) -> bool {
        matches!(self, Operation::Status | Operation::Logs)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Up => write!(f, "up"),
            Operation::Down => write!(f, "down"),
            Operation::Restart => write!(f, "restart"),
            Operation::Status => write!(f, "status"),
            Operation::Logs => write!(f, "logs"),
        }
    }
}

/// How the runner treats a child's stdout/stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecMode {
    /// Output is forwarded to the console.
    #[default]
    Attached,
    /// Output is discarded; only success/failure is reported.
    Batch,
}

/// On-disk encoding of the workspace descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorFormat {
    Json,
    Yaml,
}

impl fmt::Display for DescriptorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DescriptorFormat::Json => write!(f, "json"),
            DescriptorFormat::Yaml => write!(f, "yaml"),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A single runnable service definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Directory holding the compose file. Absolute after load.
    pub path: PathBuf,
    #[serde(default)]
    pub description: String,
}

/// A named, ordered collection of project references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Group {
    /// `None` when the key is absent, which is an error at expansion time.
    /// An empty list is valid and expands to nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<ProjectName>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<GroupName>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// The validated in-memory workspace.
///
/// Built once by [`crate::loader`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Workspace {
    #[serde(default, deserialize_with = "version_string")]
    pub version: String,
    #[serde(default)]
    pub projects: BTreeMap<ProjectName, Project>,
    #[serde(default)]
    pub groups: BTreeMap<GroupName, Group>,
    /// Directory the descriptor was found in.
    #[serde(skip)]
    pub base_dir: PathBuf,
    /// Absolute path of the descriptor file itself.
    #[serde(skip)]
    pub descriptor: PathBuf,
}

/// YAML authors write `version: 1` as often as `version: "1"`.
fn version_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Int(u64),
        Float(f64),
    }

    Ok(match Repr::deserialize(deserializer)? {
        Repr::Text(s) => s,
        Repr::Int(n) => n.to_string(),
        Repr::Float(n) => n.to_string(),
    })
}

/// Schema versions this build knows about. Others load with a warning.
pub const KNOWN_VERSIONS: &[&str] = &["1", "1.0"];

impl Workspace {
    pub fn project(&self, name: &ProjectName) -> Option<&Project> {
        self.projects.get(name)
    }

    pub fn group(&self, name: &GroupName) -> Option<&Group> {
        self.groups.get(name)
    }

    /// Message for the user when `version` is missing or unknown.
    pub fn version_warning(&self) -> Option<String> {
        if self.version.is_empty() {
            return Some(format!(
                "{} has no 'version'; assuming schema {}",
                self.descriptor.display(),
                KNOWN_VERSIONS[KNOWN_VERSIONS.len() - 1]
            ));
        }
        if KNOWN_VERSIONS.contains(&self.version.as_str()) {
            return None;
        }
        Some(format!(
            "{} declares unknown schema version '{}' (known: {}); continuing anyway",
            self.descriptor.display(),
            self.version,
            KNOWN_VERSIONS.join(", ")
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
