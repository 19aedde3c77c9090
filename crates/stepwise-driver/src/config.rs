//! Per-run configuration.

use stepwise_core::{ConfigError, FrameCadence};

/// Seed and frame cadence for one driver run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Seed for the run's single random source.
    pub seed: u64,
    /// Which steps are handed to the sink.
    pub cadence: FrameCadence,
}

impl RunConfig {
    /// A config emitting every step.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            cadence: FrameCadence::EveryStep,
        }
    }

    /// Replace the cadence.
    pub fn with_cadence(mut self, cadence: FrameCadence) -> Self {
        self.cadence = cadence;
        self
    }

    /// Check the cadence.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cadence.validate()
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::seeded(0)
    }
}
