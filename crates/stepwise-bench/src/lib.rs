//! Benchmark profiles for the Stepwise engines.
//!
//! Each profile pairs an engine at its reference parameters with the seed
//! and frame cadence of the corresponding animated demo:
//!
//! - [`pi_profile`]: 100 batches from 50 to 5000 samples, every batch emitted
//! - [`tank_profile`]: 500 s at dt = 0.5, every 10th step emitted
//! - [`ensemble_profile`]: 1000 walkers over 500 steps, every 50th emitted
//! - [`emission_profile`]: 5 walkers released per step for 5001 steps,
//!   every 500th emitted

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use stepwise_core::FrameCadence;
use stepwise_driver::{Driver, RunConfig, RunError};
use stepwise_engines::{
    PiEstimator, PointSourceEmission, TankConfig, TankController, WalkerEnsemble,
};

/// Seed of the Monte-Carlo demo.
pub const PI_SEED: u64 = 14400;
/// Seed of both random-walk demos.
pub const WALK_SEED: u64 = 4000;

/// Monte-Carlo π over the default sample-count grid.
pub fn pi_profile() -> Result<Driver<PiEstimator>, RunError> {
    let estimator = PiEstimator::builder().build()?;
    Driver::new(estimator, RunConfig::seeded(PI_SEED))
}

/// PI tank controller with the reference setpoint step at t = 200 s.
pub fn tank_profile() -> Result<Driver<TankController>, RunError> {
    let controller = TankController::new(TankConfig::default())?;
    let config = RunConfig::seeded(0).with_cadence(FrameCadence::every(10)?);
    Driver::new(controller, config)
}

/// Random-walk ensemble at its reference size.
pub fn ensemble_profile() -> Result<Driver<WalkerEnsemble>, RunError> {
    let ensemble = WalkerEnsemble::builder().build()?;
    let config = RunConfig::seeded(WALK_SEED).with_cadence(FrameCadence::every(50)?);
    Driver::new(ensemble, config)
}

/// Point-source emission at its reference horizon.
pub fn emission_profile() -> Result<Driver<PointSourceEmission>, RunError> {
    let model = PointSourceEmission::builder().build()?;
    let config = RunConfig::seeded(WALK_SEED).with_cadence(FrameCadence::every(500)?);
    Driver::new(model, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_core::Recurrence;

    #[test]
    fn pi_profile_builds() {
        let driver = pi_profile().unwrap();
        assert_eq!(driver.clock().n_steps(), 100);
        assert_eq!(driver.config().seed, PI_SEED);
    }

    #[test]
    fn tank_profile_builds() {
        let driver = tank_profile().unwrap();
        assert_eq!(driver.clock().n_steps(), 1000);
        assert_eq!(driver.config().cadence, FrameCadence::Every(10));
    }

    #[test]
    fn ensemble_profile_builds() {
        let driver = ensemble_profile().unwrap();
        assert_eq!(driver.recurrence().particles(), 1000);
        assert_eq!(driver.recurrence().clock().n_steps(), 500);
    }

    #[test]
    fn emission_profile_builds() {
        let driver = emission_profile().unwrap();
        assert_eq!(driver.recurrence().cohort_size(), 5);
        assert_eq!(driver.clock().n_steps(), 5001);
    }
}
