//! Strongly-typed step identifier.

use std::fmt;

/// Index of a simulation step.
///
/// Step 0 is the initial state; step `t` is produced from step `t - 1`
/// by one application of the engine's recurrence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepIndex(pub u64);

impl StepIndex {
    /// The initial step.
    pub const ZERO: StepIndex = StepIndex(0);

    /// The step as a `usize`, for indexing into per-step buffers.
    ///
    /// Saturates at `usize::MAX` on targets where `usize` is narrower
    /// than 64 bits.
    pub fn as_usize(self) -> usize {
        usize::try_from(self.0).unwrap_or(usize::MAX)
    }

    /// The step that follows this one.
    pub fn next(self) -> StepIndex {
        StepIndex(self.0 + 1)
    }
}

impl fmt::Display for StepIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StepIndex {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

impl From<usize> for StepIndex {
    fn from(v: usize) -> Self {
        Self(v as u64)
    }
}
