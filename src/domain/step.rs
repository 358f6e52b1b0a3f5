//! Bootstrap steps and their outcomes.

use std::fmt;

/// The three checks, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    EnsureTable,
    EnsureReplicaIdentity,
    EnsureReplicationRole,
}

impl Step {
    pub const ALL: [Step; 3] = [
        Step::EnsureTable,
        Step::EnsureReplicaIdentity,
        Step::EnsureReplicationRole,
    ];
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Step::EnsureTable => "Table check",
            Step::EnsureReplicaIdentity => "Replica identity check",
            Step::EnsureReplicationRole => "Replication role check",
        };
        f.write_str(label)
    }
}

/// How a step ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The database was changed
    Applied,
    /// Nothing to do
    AlreadySatisfied,
    /// Not applied, not fatal
    SkippedWithWarning { reason: String },
}

impl StepOutcome {
    pub fn is_warning(&self) -> bool {
        matches!(self, StepOutcome::SkippedWithWarning { .. })
    }
}

/// One status line of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub step: Step,
    pub outcome: StepOutcome,
    pub message: String,
}

impl StepReport {
    pub fn new(step: Step, outcome: StepOutcome, message: impl Into<String>) -> Self {
        Self {
            step,
            outcome,
            message: message.into(),
        }
    }
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.outcome.is_warning() { "⚠" } else { "✓" };
        write!(f, "{} {}", marker, self.message)
    }
}

/// Read-only view of a step for the status command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCheck {
    pub step: Step,
    pub satisfied: bool,
    pub detail: String,
}

impl fmt::Display for StepCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.satisfied { "[x]" } else { "[ ]" };
        write!(f, "{} {}: {}", marker, self.step, self.detail)
    }
}
