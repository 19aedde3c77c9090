//! Whole-run performance metrics.

/// Timing and volume metrics for one driver run.
///
/// Durations are wall-clock microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// Number of states computed, including step 0.
    pub steps: usize,
    /// Number of frames handed to the sink.
    pub frames_emitted: usize,
    /// Wall-clock time for the whole run.
    pub total_us: u64,
    /// Wall-clock time of the slowest single step.
    pub slowest_step_us: u64,
}

impl RunMetrics {
    pub(crate) fn record_step(&mut self, elapsed_us: u64) {
        self.steps += 1;
        self.slowest_step_us = self.slowest_step_us.max(elapsed_us);
    }

    /// Mean wall-clock time per step, or 0 for an empty run.
    pub fn mean_step_us(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.total_us as f64 / self.steps as f64
        }
    }
}
