//! Frame cadence: which steps are handed to the downstream renderer.

use crate::error::ConfigError;
use crate::id::StepIndex;

/// Selects the steps that become frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FrameCadence {
    /// Every step, including the initial step 0.
    #[default]
    EveryStep,
    /// Step 1 and every positive multiple of the interval.
    ///
    /// Step 0 is never emitted. This is the cadence the animated demos
    /// use to keep frame counts manageable on long horizons.
    Every(usize),
}

impl FrameCadence {
    /// Build an [`Every`](FrameCadence::Every) cadence.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCount`] if `interval` is 0.
    pub fn every(interval: usize) -> Result<Self, ConfigError> {
        ConfigError::check_count("frame interval", interval)?;
        Ok(FrameCadence::Every(interval))
    }

    /// Check the cadence invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            FrameCadence::EveryStep => Ok(()),
            FrameCadence::Every(interval) => {
                ConfigError::check_count("frame interval", *interval).map(|_| ())
            }
        }
    }

    /// Whether `step` produces a frame.
    pub fn emits(&self, step: StepIndex) -> bool {
        match *self {
            FrameCadence::EveryStep => true,
            FrameCadence::Every(interval) => {
                let t = step.0;
                interval != 0 && t != 0 && (t == 1 || t % interval as u64 == 0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_step_emits_everything() {
        let c = FrameCadence::EveryStep;
        assert!((0..10).all(|t| c.emits(StepIndex(t))));
    }

    #[test]
    fn interval_emits_first_step_and_multiples() {
        let c = FrameCadence::every(10).unwrap();
        let emitted: Vec<u64> = (0..35).filter(|&t| c.emits(StepIndex(t))).collect();
        assert_eq!(emitted, vec![1, 10, 20, 30]);
    }

    #[test]
    fn interval_one_emits_all_but_initial() {
        let c = FrameCadence::every(1).unwrap();
        assert!(!c.emits(StepIndex(0)));
        assert!((1..20).all(|t| c.emits(StepIndex(t))));
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(FrameCadence::every(0).is_err());
        assert!(FrameCadence::Every(0).validate().is_err());
    }
}
