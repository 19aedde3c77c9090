//! Ensemble of independent 2D lattice random walkers.
//!
//! Every particle starts at the origin. At each step it moves by an
//! independent `±1` on each axis, so its position at step `t` is the sum
//! of `t` draws per axis and the positional variance grows linearly in
//! `t` (diffusive scaling).
//!
//! Draw order within a step: particles in index order, x before y.

use stepwise_core::{
    ConfigError, Recurrence, Series, SimulationClock, StepContext, StepError, StepIndex,
};

/// A lattice axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl Axis {
    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }
}

/// Equal-width histogram of one coordinate.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    /// Left edge of the first bin.
    pub low: f64,
    /// Right edge of the last bin (inclusive).
    pub high: f64,
    /// Count per bin.
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Width of each bin.
    pub fn bin_width(&self) -> f64 {
        (self.high - self.low) / self.counts.len() as f64
    }

    /// Total number of values binned.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Positions of every walker at one step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnsembleState {
    positions: Vec<[i64; 2]>,
}

impl EnsembleState {
    /// `particles` walkers at the origin.
    pub fn origin(particles: usize) -> Self {
        Self {
            positions: vec![[0, 0]; particles],
        }
    }

    /// Number of walkers.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the ensemble is empty.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position of walker `particle`.
    pub fn position(&self, particle: usize) -> Option<[i64; 2]> {
        self.positions.get(particle).copied()
    }

    /// All positions in particle order.
    pub fn positions(&self) -> &[[i64; 2]] {
        &self.positions
    }

    /// One coordinate of every walker.
    pub fn coords(&self, axis: Axis) -> Vec<i64> {
        let i = axis.index();
        self.positions.iter().map(|p| p[i]).collect()
    }

    /// Mean coordinate along `axis`. Zero for an empty ensemble.
    pub fn mean(&self, axis: Axis) -> f64 {
        if self.positions.is_empty() {
            return 0.0;
        }
        let i = axis.index();
        self.positions.iter().map(|p| p[i] as f64).sum::<f64>() / self.positions.len() as f64
    }

    /// Population variance of the coordinate along `axis`.
    pub fn variance(&self, axis: Axis) -> f64 {
        if self.positions.is_empty() {
            return 0.0;
        }
        let i = axis.index();
        let mean = self.mean(axis);
        self.positions
            .iter()
            .map(|p| {
                let d = p[i] as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / self.positions.len() as f64
    }

    /// Mean of `x² + y²` over all walkers.
    pub fn mean_squared_displacement(&self) -> f64 {
        if self.positions.is_empty() {
            return 0.0;
        }
        self.positions
            .iter()
            .map(|&[x, y]| (x * x + y * y) as f64)
            .sum::<f64>()
            / self.positions.len() as f64
    }

    /// Histogram of the coordinate along `axis` over `bins` equal bins
    /// spanning `[min, max]`.
    ///
    /// When every walker shares one coordinate the range widens to
    /// `[v - 0.5, v + 0.5]`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCount`] if `bins` is 0.
    pub fn histogram(&self, axis: Axis, bins: usize) -> Result<Histogram, ConfigError> {
        ConfigError::check_count("bins", bins)?;
        let coords = self.coords(axis);
        let (min, max) = match (coords.iter().min(), coords.iter().max()) {
            (Some(&lo), Some(&hi)) => (lo as f64, hi as f64),
            _ => (0.0, 0.0),
        };
        let (low, high) = if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };

        let width = (high - low) / bins as f64;
        let mut counts = vec![0; bins];
        for v in coords {
            let bin = (((v as f64 - low) / width) as usize).min(bins - 1);
            counts[bin] += 1;
        }
        Ok(Histogram { low, high, counts })
    }
}

/// Per-step snapshot for the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct EnsembleFrame {
    /// Step time.
    pub time: f64,
    /// x coordinate of every walker.
    pub xs: Vec<i64>,
    /// y coordinate of every walker.
    pub ys: Vec<i64>,
}

/// Path of walker `particle` through a recorded run, or `None` if the
/// index is out of range.
pub fn trajectory(history: &Series<EnsembleState>, particle: usize) -> Option<Vec<[i64; 2]>> {
    history.iter().map(|s| s.position(particle)).collect()
}

/// Independent random walkers sharing one clock.
#[derive(Clone, Debug)]
pub struct WalkerEnsemble {
    particles: usize,
    clock: SimulationClock,
}

/// Builder for [`WalkerEnsemble`].
///
/// Defaults: 1000 particles, 500 steps.
pub struct WalkerEnsembleBuilder {
    particles: usize,
    t_max: usize,
}

impl WalkerEnsemble {
    /// Create a builder.
    pub fn builder() -> WalkerEnsembleBuilder {
        WalkerEnsembleBuilder {
            particles: 1000,
            t_max: 500,
        }
    }

    /// Number of walkers.
    pub fn particles(&self) -> usize {
        self.particles
    }
}

impl WalkerEnsembleBuilder {
    /// Set the number of walkers.
    pub fn particles(mut self, particles: usize) -> Self {
        self.particles = particles;
        self
    }

    /// Set the number of steps, including the initial step 0.
    pub fn t_max(mut self, t_max: usize) -> Self {
        self.t_max = t_max;
        self
    }

    /// Build the ensemble.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCount`] if `particles` or `t_max` is 0.
    pub fn build(self) -> Result<WalkerEnsemble, ConfigError> {
        let particles = ConfigError::check_count("particles", self.particles)?;
        let t_max = ConfigError::check_count("t_max", self.t_max)?;
        Ok(WalkerEnsemble {
            particles,
            clock: SimulationClock::unit(t_max)?,
        })
    }
}

impl Recurrence for WalkerEnsemble {
    type State = EnsembleState;
    type Frame = EnsembleFrame;

    fn name(&self) -> &str {
        "random_walk_ensemble"
    }

    fn clock(&self) -> SimulationClock {
        self.clock
    }

    fn initial(&self, _ctx: &mut StepContext<'_>) -> Result<EnsembleState, StepError> {
        Ok(EnsembleState::origin(self.particles))
    }

    fn step(
        &self,
        prev: &EnsembleState,
        ctx: &mut StepContext<'_>,
    ) -> Result<EnsembleState, StepError> {
        let rng = ctx.rng();
        let positions = prev
            .positions
            .iter()
            .map(|&[x, y]| {
                let dx = rng.unit_step();
                let dy = rng.unit_step();
                [x + dx, y + dy]
            })
            .collect();
        Ok(EnsembleState { positions })
    }

    fn frame(&self, _step: StepIndex, time: f64, state: &EnsembleState) -> EnsembleFrame {
        EnsembleFrame {
            time,
            xs: state.coords(Axis::X),
            ys: state.coords(Axis::Y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_core::SimRng;

    fn state(positions: &[[i64; 2]]) -> EnsembleState {
        EnsembleState {
            positions: positions.to_vec(),
        }
    }

    #[test]
    fn builder_rejects_zero_counts() {
        assert!(matches!(
            WalkerEnsemble::builder().particles(0).build(),
            Err(ConfigError::ZeroCount {
                parameter: "particles"
            })
        ));
        assert!(matches!(
            WalkerEnsemble::builder().t_max(0).build(),
            Err(ConfigError::ZeroCount { parameter: "t_max" })
        ));
    }

    #[test]
    fn initial_state_is_origin_and_draws_nothing() {
        let ens = WalkerEnsemble::builder().particles(8).t_max(4).build().unwrap();
        let clock = ens.clock();
        let mut rng = SimRng::new(4000);
        let mut ctx = StepContext::new(StepIndex::ZERO, &clock, &mut rng);
        let s0 = ens.initial(&mut ctx).unwrap();
        assert!(s0.positions().iter().all(|&p| p == [0, 0]));

        let mut fresh = SimRng::new(4000);
        assert_eq!(rng.unit_step(), fresh.unit_step());
    }

    #[test]
    fn each_step_moves_every_walker_diagonally() {
        let ens = WalkerEnsemble::builder().particles(50).t_max(3).build().unwrap();
        let clock = ens.clock();
        let mut rng = SimRng::new(1);
        let mut ctx = StepContext::new(StepIndex::ZERO, &clock, &mut rng);
        let s0 = ens.initial(&mut ctx).unwrap();
        ctx.advance_to(StepIndex(1), &clock);
        let s1 = ens.step(&s0, &mut ctx).unwrap();
        for &[x, y] in s1.positions() {
            assert_eq!(x.abs(), 1);
            assert_eq!(y.abs(), 1);
        }
    }

    #[test]
    fn statistics_on_known_positions() {
        let s = state(&[[1, 0], [-1, 2], [3, -2], [1, 0]]);
        assert_eq!(s.mean(Axis::X), 1.0);
        assert_eq!(s.mean(Axis::Y), 0.0);
        assert_eq!(s.variance(Axis::X), 2.0);
        assert_eq!(s.variance(Axis::Y), 2.0);
        assert_eq!(s.mean_squared_displacement(), (1.0 + 5.0 + 13.0 + 1.0) / 4.0);
    }

    #[test]
    fn histogram_covers_min_to_max() {
        let s = state(&[[-2, 0], [-1, 0], [0, 0], [2, 0], [2, 0]]);
        let h = s.histogram(Axis::X, 4).unwrap();
        assert_eq!(h.low, -2.0);
        assert_eq!(h.high, 2.0);
        assert_eq!(h.bin_width(), 1.0);
        assert_eq!(h.counts, vec![1, 1, 1, 2]);
        assert_eq!(h.total(), 5);
    }

    #[test]
    fn histogram_of_identical_values_uses_unit_range() {
        let h = EnsembleState::origin(6).histogram(Axis::Y, 10).unwrap();
        assert_eq!(h.low, -0.5);
        assert_eq!(h.high, 0.5);
        assert_eq!(h.counts[5], 6);
        assert_eq!(h.total(), 6);
    }

    #[test]
    fn histogram_rejects_zero_bins() {
        assert!(EnsembleState::origin(3).histogram(Axis::X, 0).is_err());
    }

    #[test]
    fn trajectory_follows_one_particle() {
        let history: Series<EnsembleState> = vec![
            state(&[[0, 0], [0, 0]]),
            state(&[[1, 1], [-1, 1]]),
            state(&[[2, 0], [0, 2]]),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            trajectory(&history, 1),
            Some(vec![[0, 0], [-1, 1], [0, 2]])
        );
        assert_eq!(trajectory(&history, 2), None);
    }

    #[test]
    fn frame_splits_coordinates() {
        let ens = WalkerEnsemble::builder().particles(2).t_max(2).build().unwrap();
        let f = ens.frame(StepIndex(1), 1.0, &state(&[[1, -1], [-1, 1]]));
        assert_eq!(f.time, 1.0);
        assert_eq!(f.xs, vec![1, -1]);
        assert_eq!(f.ys, vec![-1, 1]);
    }
}
