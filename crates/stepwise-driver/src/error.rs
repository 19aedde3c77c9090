//! Errors surfaced by a driver run.

use std::error::Error;
use std::fmt;

use stepwise_core::{ConfigError, StepError, StepIndex};

use crate::sink::SinkError;

/// Failure of a [`Driver`](crate::Driver) construction or run.
///
/// A failing step aborts the run: no later step is computed and no frame
/// is emitted for the failed step.
#[derive(Clone, Debug, PartialEq)]
pub enum RunError {
    /// The recurrence or run configuration is invalid.
    Config(ConfigError),
    /// A step failed.
    Step {
        /// Name of the failing recurrence.
        engine: String,
        /// The step being computed.
        step: StepIndex,
        /// The underlying failure.
        source: StepError,
    },
    /// The sink refused a frame.
    Sink {
        /// The step whose frame was refused.
        step: StepIndex,
        /// The sink's reason.
        reason: String,
    },
}

impl RunError {
    /// The step at which the run stopped, if it got that far.
    pub fn step(&self) -> Option<StepIndex> {
        match self {
            Self::Config(_) => None,
            Self::Step { step, .. } | Self::Sink { step, .. } => Some(*step),
        }
    }

    pub(crate) fn sink(step: StepIndex, e: SinkError) -> Self {
        Self::Sink {
            step,
            reason: e.reason,
        }
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
            Self::Step {
                engine,
                step,
                source,
            } => write!(f, "'{engine}' failed at step {step}: {source}"),
            Self::Sink { step, reason } => {
                write!(f, "sink rejected frame at step {step}: {reason}")
            }
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Step { source, .. } => Some(source),
            Self::Sink { .. } => None,
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
