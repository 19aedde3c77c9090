//! Point-source emission: one cohort of walkers released per step.
//!
//! At step `k` a new cohort of `cohort_size` walkers appears at the
//! source. From then on each walker of the cohort performs its own 2D
//! lattice random walk. Cohort `k` is also advected one unit along x per
//! step of global time, which places it at `(k, 0)` plus its random
//! displacement when observed at step `j >= k`:
//!
//! ```text
//! position_k(j) = (k, 0) + walk_k(j - k)
//! ```
//!
//! A cohort only ever draws the `j - k` steps it has lived through, so
//! the state at step `j` holds `(j + 1) * cohort_size` displacements and
//! no step array is sized to the full horizon per cohort.
//!
//! Draw order within a step: existing cohorts in spawn order, walkers in
//! index order, x before y. The newly spawned cohort draws nothing.

use stepwise_core::{ConfigError, Recurrence, SimulationClock, StepContext, StepError, StepIndex};

/// One cohort's walkers, as displacements from the cohort's own origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cohort {
    spawned_at: usize,
    displacements: Vec<[i64; 2]>,
}

impl Cohort {
    fn spawn(spawned_at: usize, size: usize) -> Self {
        Self {
            spawned_at,
            displacements: vec![[0, 0]; size],
        }
    }

    /// Step at which the cohort was released. Equal to its x offset.
    pub fn spawned_at(&self) -> usize {
        self.spawned_at
    }

    /// Random displacement of each walker since release.
    pub fn displacements(&self) -> &[[i64; 2]] {
        &self.displacements
    }

    /// Absolute positions: displacement plus the advection offset.
    pub fn positions(&self) -> impl Iterator<Item = [i64; 2]> + '_ {
        let offset = self.spawned_at as i64;
        self.displacements.iter().map(move |&[x, y]| [x + offset, y])
    }
}

/// Every cohort released so far.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmissionState {
    cohorts: Vec<Cohort>,
}

impl EmissionState {
    /// Cohorts in spawn order.
    pub fn cohorts(&self) -> &[Cohort] {
        &self.cohorts
    }

    /// Cohort released at step `k`.
    pub fn cohort(&self, k: usize) -> Option<&Cohort> {
        self.cohorts.get(k)
    }

    /// Total walkers across all cohorts.
    pub fn particle_count(&self) -> usize {
        self.cohorts.iter().map(|c| c.displacements.len()).sum()
    }
}

/// Absolute positions of one cohort, split by axis.
#[derive(Clone, Debug, PartialEq)]
pub struct CohortPositions {
    /// Step at which the cohort was released.
    pub cohort: usize,
    /// x coordinates, advection offset included.
    pub xs: Vec<i64>,
    /// y coordinates.
    pub ys: Vec<i64>,
}

/// Per-step snapshot for the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct EmissionFrame {
    /// Step time.
    pub time: f64,
    /// Every cohort alive at this step.
    pub cohorts: Vec<CohortPositions>,
}

impl EmissionFrame {
    /// Total walkers in the frame.
    pub fn particle_count(&self) -> usize {
        self.cohorts.iter().map(|c| c.xs.len()).sum()
    }
}

/// Point-source emission model.
#[derive(Clone, Debug)]
pub struct PointSourceEmission {
    cohort_size: usize,
    clock: SimulationClock,
}

/// Builder for [`PointSourceEmission`].
///
/// Defaults: 5 walkers per cohort, 5001 steps.
pub struct PointSourceEmissionBuilder {
    cohort_size: usize,
    t_max: usize,
}

impl PointSourceEmission {
    /// Create a builder.
    pub fn builder() -> PointSourceEmissionBuilder {
        PointSourceEmissionBuilder {
            cohort_size: 5,
            t_max: 5001,
        }
    }

    /// Walkers released per step.
    pub fn cohort_size(&self) -> usize {
        self.cohort_size
    }
}

impl PointSourceEmissionBuilder {
    /// Set the number of walkers released per step.
    pub fn cohort_size(mut self, cohort_size: usize) -> Self {
        self.cohort_size = cohort_size;
        self
    }

    /// Set the number of steps, including the initial step 0.
    pub fn t_max(mut self, t_max: usize) -> Self {
        self.t_max = t_max;
        self
    }

    /// Build the model.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCount`] if `cohort_size` or `t_max` is 0.
    pub fn build(self) -> Result<PointSourceEmission, ConfigError> {
        let cohort_size = ConfigError::check_count("cohort_size", self.cohort_size)?;
        let t_max = ConfigError::check_count("t_max", self.t_max)?;
        Ok(PointSourceEmission {
            cohort_size,
            clock: SimulationClock::unit(t_max)?,
        })
    }
}

impl Recurrence for PointSourceEmission {
    type State = EmissionState;
    type Frame = EmissionFrame;

    fn name(&self) -> &str {
        "point_source_emission"
    }

    fn clock(&self) -> SimulationClock {
        self.clock
    }

    fn initial(&self, _ctx: &mut StepContext<'_>) -> Result<EmissionState, StepError> {
        Ok(EmissionState {
            cohorts: vec![Cohort::spawn(0, self.cohort_size)],
        })
    }

    fn step(
        &self,
        prev: &EmissionState,
        ctx: &mut StepContext<'_>,
    ) -> Result<EmissionState, StepError> {
        let spawned_at = ctx.step().as_usize();
        let rng = ctx.rng();

        let mut cohorts = Vec::with_capacity(prev.cohorts.len() + 1);
        for cohort in &prev.cohorts {
            let displacements = cohort
                .displacements
                .iter()
                .map(|&[x, y]| {
                    let dx = rng.unit_step();
                    let dy = rng.unit_step();
                    [x + dx, y + dy]
                })
                .collect();
            cohorts.push(Cohort {
                spawned_at: cohort.spawned_at,
                displacements,
            });
        }
        cohorts.push(Cohort::spawn(spawned_at, self.cohort_size));

        Ok(EmissionState { cohorts })
    }

    fn frame(&self, _step: StepIndex, time: f64, state: &EmissionState) -> EmissionFrame {
        let cohorts = state
            .cohorts
            .iter()
            .map(|c| {
                let (xs, ys): (Vec<i64>, Vec<i64>) =
                    c.positions().map(|[x, y]| (x, y)).unzip();
                CohortPositions {
                    cohort: c.spawned_at,
                    xs,
                    ys,
                }
            })
            .collect();
        EmissionFrame { time, cohorts }
    }
}
