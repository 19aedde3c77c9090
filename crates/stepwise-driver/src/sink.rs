//! The renderer seam: where emitted frames go.

use std::error::Error;
use std::fmt;

use stepwise_core::StepIndex;

/// A sink refused a frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SinkError {
    /// Human-readable description of the refusal.
    pub reason: String,
}

impl SinkError {
    /// Build an error from any displayable reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sink rejected frame: {}", self.reason)
    }
}

impl Error for SinkError {}

/// Consumer of frames, in step order.
///
/// Renderers, recorders and collectors all sit behind this trait. A sink
/// sees only the frames the run's cadence selects, each exactly once, in
/// increasing step order.
pub trait FrameSink<F> {
    /// Accept the frame produced at `step`.
    ///
    /// # Errors
    ///
    /// Returning an error aborts the run with
    /// [`RunError::Sink`](crate::RunError::Sink).
    fn accept(&mut self, step: StepIndex, frame: F) -> Result<(), SinkError>;
}

impl<F> FrameSink<F> for Vec<F> {
    fn accept(&mut self, _step: StepIndex, frame: F) -> Result<(), SinkError> {
        self.push(frame);
        Ok(())
    }
}

impl<F, S: FrameSink<F> + ?Sized> FrameSink<F> for &mut S {
    fn accept(&mut self, step: StepIndex, frame: F) -> Result<(), SinkError> {
        (**self).accept(step, frame)
    }
}

/// A sink that drops every frame. Useful for benchmarks and for runs
/// whose only interest is the final state.
#[derive(Clone, Copy, Debug, Default)]
pub struct Discard;

impl<F> FrameSink<F> for Discard {
    fn accept(&mut self, _step: StepIndex, _frame: F) -> Result<(), SinkError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_collects_in_order() {
        let mut frames: Vec<u32> = Vec::new();
        frames.accept(StepIndex(0), 7).unwrap();
        frames.accept(StepIndex(1), 9).unwrap();
        assert_eq!(frames, vec![7, 9]);
    }

    #[test]
    fn borrowed_sink_forwards() {
        let mut frames: Vec<u32> = Vec::new();
        {
            let mut borrowed = &mut frames;
            borrowed.accept(StepIndex(3), 1).unwrap();
        }
        assert_eq!(frames, vec![1]);
    }

    #[test]
    fn discard_accepts_anything() {
        let mut sink = Discard;
        assert!(sink.accept(StepIndex(0), "frame").is_ok());
    }

    #[test]
    fn display_includes_reason() {
        let err = SinkError::new("disk full");
        assert_eq!(err.to_string(), "sink rejected frame: disk full");
    }
}
