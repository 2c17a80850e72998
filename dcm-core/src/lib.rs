//! dcm core library — workspace model, descriptor discovery, group expansion.
//!
//! Public API surface:
//! - [`types`] — newtypes and descriptor structs
//! - [`error`] — [`LoadError`], [`ResolveError`]
//! - [`locator`] / [`loader`] — find and load the workspace descriptor
//! - [`expand`] — group expansion with `extends` and cycle detection
//! - [`plan`] — group-first target resolution and execution plans
//! - [`validate`] — whole-workspace consistency check

pub mod error;
pub mod expand;
pub mod loader;
pub mod locator;
pub mod plan;
pub mod types;
pub mod validate;

pub use error::{LoadError, ResolveError, SyntaxError};
pub use expand::{expand_group, Expansion};
pub use plan::{resolve_target, Plan, PlanStep, Target};
pub use types::{
    DescriptorFormat, ExecMode, Group, GroupName, Operation, Project, ProjectName, Workspace,
};
