//! Monte-Carlo estimation of π.
//!
//! For each sample count `n`, draws `n` points uniformly from the square
//! `[-1,1) × [-1,1)` and estimates π as four times the fraction landing
//! strictly inside the unit circle.
//!
//! The run is a [`Recurrence`] over the sample-count list: step `i`
//! samples `sample_counts[i]` fresh points. All steps share the run's one
//! random source, so the whole convergence sequence is reproducible from
//! a single seed.
//!
//! # Construction
//!
//! ```
//! use stepwise_engines::PiEstimator;
//!
//! let estimator = PiEstimator::builder()
//!     .linear(50, 5000, 50)
//!     .build()
//!     .unwrap();
//! assert_eq!(estimator.sample_counts().len(), 100);
//! ```

use stepwise_core::{
    ConfigError, Recurrence, Series, SimRng, SimulationClock, StepContext, StepError, StepIndex,
};

/// One sample batch and the π estimate it yields.
#[derive(Clone, Debug, PartialEq)]
pub struct PiSample {
    /// Number of points drawn.
    pub sample_count: usize,
    /// x coordinates, in draw order.
    pub xs: Vec<f64>,
    /// y coordinates, in draw order.
    pub ys: Vec<f64>,
    /// Euclidean distance of each point from the origin.
    pub distances: Vec<f64>,
    /// `4 * inside / sample_count`.
    pub pi_estimate: f64,
}

impl PiSample {
    /// Number of points strictly inside the unit circle.
    pub fn inside_count(&self) -> usize {
        self.distances.iter().filter(|&&d| d < 1.0).count()
    }

    /// Whether point `i` lies strictly inside the unit circle.
    pub fn is_inside(&self, i: usize) -> bool {
        self.distances.get(i).is_some_and(|&d| d < 1.0)
    }

    /// `|pi_estimate - π|`.
    pub fn absolute_error(&self) -> f64 {
        (self.pi_estimate - std::f64::consts::PI).abs()
    }
}

/// Draw `n` points and estimate π from them.
///
/// All x coordinates are drawn before the y coordinates.
///
/// # Errors
///
/// Returns [`ConfigError::ZeroCount`] if `n` is 0.
pub fn estimate_pi(n: usize, rng: &mut SimRng) -> Result<PiSample, ConfigError> {
    ConfigError::check_count("sample_count", n)?;
    Ok(sample(n, rng))
}

fn sample(n: usize, rng: &mut SimRng) -> PiSample {
    let mut xs = vec![0.0; n];
    let mut ys = vec![0.0; n];
    rng.fill_uniform(&mut xs, -1.0, 1.0);
    rng.fill_uniform(&mut ys, -1.0, 1.0);

    let distances: Vec<f64> = xs
        .iter()
        .zip(&ys)
        .map(|(x, y)| (x * x + y * y).sqrt())
        .collect();
    let inside = distances.iter().filter(|&&d| d < 1.0).count();

    PiSample {
        sample_count: n,
        xs,
        ys,
        distances,
        pi_estimate: 4.0 * inside as f64 / n as f64,
    }
}

/// Monte-Carlo π estimator over a strictly increasing list of sample counts.
#[derive(Clone, Debug)]
pub struct PiEstimator {
    sample_counts: Vec<usize>,
    clock: SimulationClock,
}

/// Builder for [`PiEstimator`].
///
/// Default sample counts: `50, 100, …, 5000`.
pub struct PiEstimatorBuilder {
    sample_counts: Vec<usize>,
}

impl PiEstimator {
    /// Create a builder.
    pub fn builder() -> PiEstimatorBuilder {
        PiEstimatorBuilder {
            sample_counts: (50..=5000).step_by(50).collect(),
        }
    }

    /// The sample count used at each step.
    pub fn sample_counts(&self) -> &[usize] {
        &self.sample_counts
    }

    /// The `(sample_count, pi_estimate)` convergence series of a run.
    pub fn estimates(history: &Series<PiSample>) -> Vec<(usize, f64)> {
        history
            .iter()
            .map(|s| (s.sample_count, s.pi_estimate))
            .collect()
    }

    fn count_at(&self, step: StepIndex) -> Result<usize, StepError> {
        self.sample_counts
            .get(step.as_usize())
            .copied()
            .ok_or_else(|| StepError::Execution {
                reason: format!(
                    "step {step} is past the last of {} sample counts",
                    self.sample_counts.len()
                ),
            })
    }
}

impl PiEstimatorBuilder {
    /// Use an explicit list of sample counts.
    pub fn sample_counts(mut self, counts: impl Into<Vec<usize>>) -> Self {
        self.sample_counts = counts.into();
        self
    }

    /// Use `start, start + step, …` up to and including `stop`.
    ///
    /// A zero `step` yields an empty list, which `build()` rejects.
    pub fn linear(mut self, start: usize, stop: usize, step: usize) -> Self {
        self.sample_counts = if step == 0 {
            Vec::new()
        } else {
            (start..=stop).step_by(step).collect()
        };
        self
    }

    /// Build the estimator, validating the sample counts.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptySampleCounts`] for an empty list
    /// - [`ConfigError::ZeroCount`] if any count is 0
    /// - [`ConfigError::NonIncreasing`] if the list is not strictly increasing
    pub fn build(self) -> Result<PiEstimator, ConfigError> {
        if self.sample_counts.is_empty() {
            return Err(ConfigError::EmptySampleCounts);
        }
        for &n in &self.sample_counts {
            ConfigError::check_count("sample_count", n)?;
        }
        for (i, pair) in self.sample_counts.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(ConfigError::NonIncreasing {
                    index: i + 1,
                    previous: pair[0],
                    next: pair[1],
                });
            }
        }
        let clock = SimulationClock::unit(self.sample_counts.len())?;
        Ok(PiEstimator {
            sample_counts: self.sample_counts,
            clock,
        })
    }
}

/// Renderer frame for the Monte-Carlo engine: the full sample batch.
pub type PiFrame = PiSample;

impl Recurrence for PiEstimator {
    type State = PiSample;
    type Frame = PiFrame;

    fn name(&self) -> &str {
        "monte_carlo_pi"
    }

    fn clock(&self) -> SimulationClock {
        self.clock
    }

    fn initial(&self, ctx: &mut StepContext<'_>) -> Result<PiSample, StepError> {
        let n = self.count_at(ctx.step())?;
        Ok(sample(n, ctx.rng()))
    }

    fn step(&self, _prev: &PiSample, ctx: &mut StepContext<'_>) -> Result<PiSample, StepError> {
        let n = self.count_at(ctx.step())?;
        Ok(sample(n, ctx.rng()))
    }

    fn frame(&self, _step: StepIndex, _time: f64, state: &PiSample) -> PiFrame {
        state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_samples_rejected() {
        let mut rng = SimRng::new(1);
        assert_eq!(
            estimate_pi(0, &mut rng),
            Err(ConfigError::ZeroCount {
                parameter: "sample_count"
            })
        );
    }

    #[test]
    fn single_sample_is_zero_or_four() {
        for seed in 0..64 {
            let mut rng = SimRng::new(seed);
            let s = estimate_pi(1, &mut rng).unwrap();
            assert!(
                s.pi_estimate == 0.0 || s.pi_estimate == 4.0,
                "seed {seed}: got {}",
                s.pi_estimate
            );
        }
    }

    #[test]
    fn sample_carries_all_points() {
        let mut rng = SimRng::new(14400);
        let s = estimate_pi(500, &mut rng).unwrap();
        assert_eq!(s.xs.len(), 500);
        assert_eq!(s.ys.len(), 500);
        assert_eq!(s.distances.len(), 500);
        for i in 0..500 {
            let d = (s.xs[i] * s.xs[i] + s.ys[i] * s.ys[i]).sqrt();
            assert_eq!(d.to_bits(), s.distances[i].to_bits());
            assert_eq!(s.is_inside(i), d < 1.0);
        }
        assert_eq!(
            s.pi_estimate,
            4.0 * s.inside_count() as f64 / s.sample_count as f64
        );
    }

    #[test]
    fn out_of_range_point_is_not_inside() {
        let mut rng = SimRng::new(3);
        let s = estimate_pi(4, &mut rng).unwrap();
        assert!(!s.is_inside(4));
    }

    #[test]
    fn five_thousand_samples_land_near_pi() {
        for seed in [14400u64, 1, 2, 3, 4] {
            let mut rng = SimRng::new(seed);
            let s = estimate_pi(5000, &mut rng).unwrap();
            assert!(
                s.absolute_error() < 0.1,
                "seed {seed}: estimate {} too far from pi",
                s.pi_estimate
            );
        }
    }

    #[test]
    fn default_counts_match_linear_fifty_to_five_thousand() {
        let built = PiEstimator::builder().build().unwrap();
        let counts = built.sample_counts();
        assert_eq!(counts.first(), Some(&50));
        assert_eq!(counts.last(), Some(&5000));
        assert_eq!(counts.len(), 100);
        assert_eq!(built.clock().n_steps(), 100);
    }

    #[test]
    fn builder_rejects_bad_lists() {
        assert_eq!(
            PiEstimator::builder().sample_counts(vec![]).build().err(),
            Some(ConfigError::EmptySampleCounts)
        );
        assert_eq!(
            PiEstimator::builder().linear(10, 100, 0).build().err(),
            Some(ConfigError::EmptySampleCounts)
        );
        assert!(matches!(
            PiEstimator::builder().sample_counts(vec![0, 10]).build(),
            Err(ConfigError::ZeroCount { .. })
        ));
        assert_eq!(
            PiEstimator::builder().sample_counts(vec![10, 20, 20]).build().err(),
            Some(ConfigError::NonIncreasing {
                index: 2,
                previous: 20,
                next: 20
            })
        );
    }

    #[test]
    fn recurrence_steps_through_counts() {
        let est = PiEstimator::builder()
            .sample_counts(vec![3, 7, 11])
            .build()
            .unwrap();
        let clock = est.clock();
        assert_eq!(clock.n_steps(), 3);

        let mut rng = SimRng::new(9);
        let mut ctx = StepContext::new(StepIndex(0), &clock, &mut rng);
        let s0 = est.initial(&mut ctx).unwrap();
        ctx.advance_to(StepIndex(1), &clock);
        let s1 = est.step(&s0, &mut ctx).unwrap();
        ctx.advance_to(StepIndex(2), &clock);
        let s2 = est.step(&s1, &mut ctx).unwrap();
        assert_eq!(
            [s0.sample_count, s1.sample_count, s2.sample_count],
            [3, 7, 11]
        );

        ctx.advance_to(StepIndex(3), &clock);
        assert!(matches!(
            est.step(&s2, &mut ctx),
            Err(StepError::Execution { .. })
        ));
    }

    proptest! {
        #[test]
        fn estimate_is_bounded(n in 1usize..400, seed in any::<u64>()) {
            let mut rng = SimRng::new(seed);
            let s = estimate_pi(n, &mut rng).unwrap();
            prop_assert!((0.0..=4.0).contains(&s.pi_estimate));
        }
    }
}
