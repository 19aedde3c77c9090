//! Errors from recording and comparing runs.

use std::error::Error;
use std::fmt;

use stepwise_core::StepIndex;
use stepwise_driver::RunError;

/// Failure to record a run, or a mismatch between two recordings.
#[derive(Clone, Debug, PartialEq)]
pub enum ReplayError {
    /// The recordings come from different run configurations.
    ConfigMismatch {
        /// Configuration hash of the recorded run.
        recorded: u64,
        /// Configuration hash of the replayed run.
        replayed: u64,
    },
    /// The recordings agree on their common prefix but differ in length.
    LengthMismatch {
        /// Frames in the recorded run.
        recorded: usize,
        /// Frames in the replayed run.
        replayed: usize,
    },
    /// A frame hash differs between the runs.
    Diverged {
        /// First step whose frame differs.
        step: StepIndex,
        /// Frame hash in the recorded run.
        recorded: u64,
        /// Frame hash in the replayed run.
        replayed: u64,
    },
    /// A run failed while being recorded.
    Run(RunError),
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigMismatch { recorded, replayed } => write!(
                f,
                "config hash mismatch: recorded={recorded:#018x}, replayed={replayed:#018x}"
            ),
            Self::LengthMismatch { recorded, replayed } => write!(
                f,
                "frame count mismatch: recorded {recorded}, replayed {replayed}"
            ),
            Self::Diverged {
                step,
                recorded,
                replayed,
            } => write!(
                f,
                "frame mismatch at step {step}: \
                 recorded={recorded:#018x}, replayed={replayed:#018x}"
            ),
            Self::Run(e) => write!(f, "run failed: {e}"),
        }
    }
}

impl Error for ReplayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Run(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RunError> for ReplayError {
    fn from(e: RunError) -> Self {
        Self::Run(e)
    }
}
