//! Sequential plan execution with best-effort continuation.

use dcm_core::{Operation, Plan, ProjectName};

use crate::process::Runner;

/// Result of one plan step.
#[derive(Debug)]
pub struct Outcome {
    pub project: ProjectName,
    /// `Err` holds a user-facing message (resolution or run failure).
    pub result: Result<(), String>,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Progress notification passed to the caller while a plan runs.
#[derive(Debug)]
pub enum StepEvent<'a> {
    Started { project: &'a ProjectName, index: usize, total: usize },
    Finished(&'a Outcome),
}

/// Aggregated outcomes of a plan, in plan order.
#[derive(Debug)]
pub struct BatchReport {
    pub operation: Operation,
    pub outcomes: Vec<Outcome>,
}

impl BatchReport {
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_success()).count()
    }

    pub fn succeeded(&self) -> usize {
        self.attempted() - self.failed()
    }

    /// True when nothing failed; an empty report is a success.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Run every step of `plan` in order.
///
/// Unresolved steps fail without reaching the runner. A failure never stops
/// the remaining steps.
pub fn execute<R, F>(plan: &Plan, runner: &mut R, mut on_event: F) -> BatchReport
where
    R: Runner + ?Sized,
    F: FnMut(&StepEvent<'_>),
{
    let total = plan.steps.len();
    let mut outcomes = Vec::with_capacity(total);

    for (index, step) in plan.steps.iter().enumerate() {
        on_event(&StepEvent::Started {
            project: &step.project,
            index,
            total,
        });

        let result = match &step.dir {
            Ok(dir) => runner
                .run(dir, plan.operation, plan.mode)
                .map_err(|err| err.to_string()),
            Err(err) => Err(err.to_string()),
        };

        match &result {
            Ok(()) => tracing::info!(project = %step.project, operation = %plan.operation, "step succeeded"),
            Err(err) => tracing::warn!(project = %step.project, operation = %plan.operation, error = %err, "step failed"),
        }

        let outcome = Outcome {
            project: step.project.clone(),
            result,
        };
        on_event(&StepEvent::Finished(&outcome));
        outcomes.push(outcome);
    }

    BatchReport {
        operation: plan.operation,
        outcomes,
    }
}
