//! Group expansion.
//!
//! A group expands to its `extends` ancestor's expansion followed by its own
//! `services`, de-duplicated across the combined sequence. First occurrence
//! wins position. Expansion is a pure function of the workspace.

use std::collections::HashSet;

use crate::error::ResolveError;
use crate::types::{GroupName, ProjectName, Workspace};

/// Ordered, duplicate-free member list of a group.
///
/// Members that are not known projects stay in place so callers can report
/// them one by one; see [`Expansion::unresolved`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub group: GroupName,
    pub members: Vec<ProjectName>,
}

impl Expansion {
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// `UnresolvedMember` for every member missing from `workspace.projects`,
    /// in expansion order.
    pub fn unresolved(&self, workspace: &Workspace) -> Vec<ResolveError> {
        self.members
            .iter()
            .filter(|m| workspace.project(m).is_none())
            .map(|m| ResolveError::UnresolvedMember {
                group: self.group.clone(),
                member: m.clone(),
            })
            .collect()
    }
}

/// Expand `name` into its concrete member list.
///
/// Errors:
/// - `GroupNotFound` if `name` is not a group
/// - `UnknownExtension` if a group in the chain extends a missing group
/// - `CyclicGroupExtension` if the chain loops back on itself
/// - `GroupMissingServices` if any group in the chain has no `services` key
pub fn expand_group(workspace: &Workspace, name: &GroupName) -> Result<Expansion, ResolveError> {
    let chain = extends_chain(workspace, name)?;

    let mut seen: HashSet<&ProjectName> = HashSet::new();
    let mut members = Vec::new();
    for group_name in &chain {
        let services = workspace
            .group(group_name)
            .and_then(|g| g.services.as_ref())
            .ok_or_else(|| ResolveError::GroupMissingServices {
                group: group_name.clone(),
            })?;
        for member in services {
            if seen.insert(member) {
                members.push(member.clone());
            }
        }
    }

    tracing::debug!(group = %name, members = members.len(), "expanded group");
    Ok(Expansion {
        group: name.clone(),
        members,
    })
}

/// The `extends` chain of `name`, most distant ancestor first, ending with
/// `name` itself.
pub fn extends_chain(workspace: &Workspace, name: &GroupName) -> Result<Vec<GroupName>, ResolveError> {
    let mut chain: Vec<GroupName> = Vec::new();
    let mut current = name.clone();

    loop {
        if let Some(pos) = chain.iter().position(|g| *g == current) {
            let mut cycle = chain[pos..].to_vec();
            cycle.push(current);
            return Err(ResolveError::CyclicGroupExtension { chain: cycle });
        }

        let group = match (workspace.group(&current), chain.last()) {
            (Some(group), _) => group,
            (None, None) => {
                return Err(ResolveError::GroupNotFound {
                    name: current.0.clone(),
                })
            }
            (None, Some(child)) => {
                return Err(ResolveError::UnknownExtension {
                    group: child.clone(),
                    extends: current,
                })
            }
        };

        chain.push(current.clone());
        match &group.extends {
            Some(parent) => current = parent.clone(),
            None => break,
        }
    }

    chain.reverse();
    Ok(chain)
}
