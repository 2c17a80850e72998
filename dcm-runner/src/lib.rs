//! # dcm-runner
//!
//! Runs the orchestration command for each step of a [`dcm_core::Plan`].
//!
//! Call [`execute`] with a [`ProcessRunner`] to run a plan strictly in order.
//! A failing step is recorded in the [`BatchReport`] and the remaining steps
//! still run.

pub mod batch;
pub mod command;
pub mod error;
pub mod process;

pub use batch::{execute, BatchReport, Outcome, StepEvent};
pub use command::ComposeCommand;
pub use error::RunError;
pub use process::{ProcessRunner, Runner};
