//! Reusable recurrence test fixtures.
//!
//! - [`CountingRecurrence`]: state is the step count, no randomness.
//! - [`FailingRecurrence`]: fails deterministically at a chosen step.
//! - [`NoiseRecurrence`]: accumulates one uniform draw per step.

use stepwise_core::{Recurrence, SimulationClock, StepContext, StepError, StepIndex};

/// State equals the number of steps taken. Frame is the state.
pub struct CountingRecurrence {
    pub clock: SimulationClock,
}

impl CountingRecurrence {
    pub fn new(n_steps: usize) -> Self {
        Self {
            clock: SimulationClock::unit(n_steps).expect("n_steps must be positive"),
        }
    }
}

impl Recurrence for CountingRecurrence {
    type State = u64;
    type Frame = u64;

    fn name(&self) -> &str {
        "counting"
    }

    fn clock(&self) -> SimulationClock {
        self.clock
    }

    fn initial(&self, _ctx: &mut StepContext<'_>) -> Result<u64, StepError> {
        Ok(0)
    }

    fn step(&self, prev: &u64, _ctx: &mut StepContext<'_>) -> Result<u64, StepError> {
        Ok(prev + 1)
    }

    fn frame(&self, _step: StepIndex, _time: f64, state: &u64) -> u64 {
        *state
    }
}

/// Counts like [`CountingRecurrence`] but returns a domain error at
/// `fail_at`.
pub struct FailingRecurrence {
    pub clock: SimulationClock,
    pub fail_at: StepIndex,
}

impl FailingRecurrence {
    pub fn new(n_steps: usize, fail_at: u64) -> Self {
        Self {
            clock: SimulationClock::unit(n_steps).expect("n_steps must be positive"),
            fail_at: StepIndex(fail_at),
        }
    }
}

impl Recurrence for FailingRecurrence {
    type State = u64;
    type Frame = u64;

    fn name(&self) -> &str {
        "failing"
    }

    fn clock(&self) -> SimulationClock {
        self.clock
    }

    fn initial(&self, ctx: &mut StepContext<'_>) -> Result<u64, StepError> {
        if ctx.step() == self.fail_at {
            return Err(StepError::Execution {
                reason: "failed at initial step".to_string(),
            });
        }
        Ok(0)
    }

    fn step(&self, prev: &u64, ctx: &mut StepContext<'_>) -> Result<u64, StepError> {
        if ctx.step() == self.fail_at {
            return Err(StepError::NumericDomain {
                quantity: "counter",
                value: -1.0,
                step: ctx.step(),
            });
        }
        Ok(prev + 1)
    }

    fn frame(&self, _step: StepIndex, _time: f64, state: &u64) -> u64 {
        *state
    }
}

/// Sums one `U[0,1)` draw per step. Frame is `(time, sum)`.
pub struct NoiseRecurrence {
    pub clock: SimulationClock,
}

impl NoiseRecurrence {
    pub fn new(n_steps: usize, dt: f64) -> Self {
        Self {
            clock: SimulationClock::from_steps(n_steps, dt).expect("valid clock"),
        }
    }
}

impl Recurrence for NoiseRecurrence {
    type State = f64;
    type Frame = (f64, f64);

    fn name(&self) -> &str {
        "noise"
    }

    fn clock(&self) -> SimulationClock {
        self.clock
    }

    fn initial(&self, _ctx: &mut StepContext<'_>) -> Result<f64, StepError> {
        Ok(0.0)
    }

    fn step(&self, prev: &f64, ctx: &mut StepContext<'_>) -> Result<f64, StepError> {
        Ok(prev + ctx.rng().uniform(0.0, 1.0))
    }

    fn frame(&self, _step: StepIndex, time: f64, state: &f64) -> (f64, f64) {
        (time, *state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step_all;

    #[test]
    fn counting_counts() {
        let states = step_all(&CountingRecurrence::new(5), 0).unwrap();
        assert_eq!(states, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn failing_fails_at_requested_step() {
        match step_all(&FailingRecurrence::new(10, 3), 0) {
            Err(StepError::NumericDomain { step, .. }) => assert_eq!(step, StepIndex(3)),
            other => panic!("expected NumericDomain, got {other:?}"),
        }
    }

    #[test]
    fn noise_is_seeded() {
        let a = step_all(&NoiseRecurrence::new(20, 0.1), 42).unwrap();
        let b = step_all(&NoiseRecurrence::new(20, 0.1), 42).unwrap();
        crate::assert_bits_eq(&a, &b);
    }
}
