use tracing::warn;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum StepStatus {
    Done,
    Skipped(String),
    Failed(String),
}

/// Ledger of the follow-up steps of a multi-call operation
///
/// Nothing is rolled back: a failed or skipped step is logged, recorded, and the operation
/// moves on. The summary tells the caller what did not happen.
#[derive(Debug, Default)]
pub struct StepLog {
    steps: Vec<(String, StepStatus)>,
}

impl StepLog {
    pub fn done(&mut self, step: &str) {
        self.steps.push((step.to_string(), StepStatus::Done));
    }

    pub fn skipped(&mut self, step: &str, reason: impl Into<String>) {
        let reason = reason.into();
        warn!("Skipped step '{step}': {reason}");
        self.steps.push((step.to_string(), StepStatus::Skipped(reason)));
    }

    pub fn failed(&mut self, step: &str, error: &Error) {
        warn!("Step '{step}' failed: {error}");
        self.steps
            .push((step.to_string(), StepStatus::Failed(error.to_string())));
    }

    /// Record the outcome of a step and hand back its value on success
    pub fn record<T>(&mut self, step: &str, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => {
                self.done(step);
                Some(value)
            },
            Err(report) => {
                self.failed(step, report.current_context());
                None
            },
        }
    }

    pub fn is_clean(&self) -> bool {
        self.steps
            .iter()
            .all(|(_, status)| *status == StepStatus::Done)
    }

    /// Description of every step that did not complete, `None` when all did
    pub fn summary(&self) -> Option<String> {
        let problems: Vec<String> = self
            .steps
            .iter()
            .filter_map(|(name, status)| match status {
                StepStatus::Done => None,
                StepStatus::Skipped(reason) => Some(format!("{name} skipped: {reason}")),
                StepStatus::Failed(reason) => Some(format!("{name} failed: {reason}")),
            })
            .collect();
        (!problems.is_empty()).then(|| problems.join("; "))
    }

    /// `message`, followed by the summary when some step did not complete
    pub fn decorate(&self, message: String) -> String {
        match self.summary() {
            Some(summary) => format!("{message} (incomplete: {summary})"),
            None => message,
        }
    }
}
