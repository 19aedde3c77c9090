//! Fixed-step simulation clock.
//!
//! A [`SimulationClock`] pins the step size `dt` and the number of steps.
//! Step `t` happens at time `t * dt`, for `t` in `[0, n_steps)`, and the
//! horizon is `t_end = n_steps * dt`.

use crate::error::ConfigError;
use crate::id::StepIndex;

/// Fixed-timestep, fixed-horizon clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationClock {
    dt: f64,
    n_steps: usize,
}

impl SimulationClock {
    /// Build a clock covering `[0, t_end)` in steps of `dt`.
    ///
    /// The step count is `floor(t_end / dt)`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositive`] if either argument is not
    /// finite and positive, and [`ConfigError::HorizonTooShort`] if the
    /// horizon holds less than one step.
    pub fn from_horizon(t_end: f64, dt: f64) -> Result<Self, ConfigError> {
        ConfigError::check_positive("dt", dt)?;
        ConfigError::check_positive("t_end", t_end)?;
        let steps = (t_end / dt).floor();
        if !steps.is_finite() || steps < 1.0 || steps > usize::MAX as f64 {
            return Err(ConfigError::HorizonTooShort { t_end, dt });
        }
        Ok(Self {
            dt,
            n_steps: steps as usize,
        })
    }

    /// Build a clock with an explicit step count.
    pub fn from_steps(n_steps: usize, dt: f64) -> Result<Self, ConfigError> {
        ConfigError::check_count("n_steps", n_steps)?;
        ConfigError::check_positive("dt", dt)?;
        Ok(Self { dt, n_steps })
    }

    /// A clock with `dt = 1`, for runs indexed by iteration rather than
    /// physical time.
    pub fn unit(n_steps: usize) -> Result<Self, ConfigError> {
        Self::from_steps(n_steps, 1.0)
    }

    /// Step size.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Number of steps, including the initial step 0.
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Horizon `n_steps * dt`.
    pub fn t_end(&self) -> f64 {
        self.n_steps as f64 * self.dt
    }

    /// Simulation time of `step`.
    pub fn time_at(&self, step: StepIndex) -> f64 {
        step.0 as f64 * self.dt
    }

    /// Whether `step` lies inside the horizon.
    pub fn contains(&self, step: StepIndex) -> bool {
        step.as_usize() < self.n_steps
    }

    /// The final step of the horizon.
    pub fn last_step(&self) -> StepIndex {
        StepIndex::from(self.n_steps - 1)
    }

    /// All steps of the horizon in order.
    pub fn steps(&self) -> impl Iterator<Item = StepIndex> {
        (0..self.n_steps as u64).map(StepIndex)
    }
}
