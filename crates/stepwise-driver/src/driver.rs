//! The run loop.
//!
//! A [`Driver`] pairs a recurrence with a [`RunConfig`]. Each run:
//!
//! 1. seeds a fresh [`SimRng`] from the config,
//! 2. computes step 0, then every later step from its predecessor,
//! 3. hands the frames the cadence selects to the sink, in step order,
//! 4. returns [`RunMetrics`] with the final state or the full history.
//!
//! The first failing step aborts the run. Nothing after it is computed
//! and no frame is emitted for it.

use std::time::Instant;

use stepwise_core::{
    Recurrence, Series, SimRng, SimulationClock, StepContext, StepError, StepIndex,
};
use tracing::{debug, info, warn};

use crate::config::RunConfig;
use crate::error::RunError;
use crate::metrics::RunMetrics;
use crate::sink::FrameSink;

/// Outcome of a streaming [`Driver::run`].
#[derive(Clone, Debug)]
pub struct RunSummary<S> {
    /// State at the last step of the clock.
    pub last: S,
    /// Run metrics.
    pub metrics: RunMetrics,
}

/// Outcome of [`Driver::collect`]: every state, indexed by step.
#[derive(Clone, Debug)]
pub struct RunHistory<S> {
    /// State at every step, valid through the last step of the clock.
    pub states: Series<S>,
    /// Run metrics.
    pub metrics: RunMetrics,
}

/// Executes one recurrence under one run configuration.
///
/// Runs are independent: every call to [`run`](Driver::run) or
/// [`collect`](Driver::collect) reseeds from `config.seed`, so two calls
/// with the same sink type produce identical frames.
///
/// # Example
///
/// ```
/// use stepwise_core::FrameCadence;
/// use stepwise_driver::{Driver, RunConfig};
/// use stepwise_engines::{EnsembleFrame, WalkerEnsemble};
///
/// let ensemble = WalkerEnsemble::builder().particles(10).t_max(21).build()?;
/// let config = RunConfig::seeded(4000).with_cadence(FrameCadence::every(10)?);
/// let driver = Driver::new(ensemble, config)?;
///
/// let mut frames: Vec<EnsembleFrame> = Vec::new();
/// let summary = driver.run(&mut frames)?;
/// assert_eq!(frames.len(), 3); // steps 1, 10, 20
/// assert_eq!(summary.metrics.steps, 21);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Driver<R> {
    recurrence: R,
    config: RunConfig,
    clock: SimulationClock,
}

impl<R: Recurrence> Driver<R> {
    /// Pair `recurrence` with `config`.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Config`] if the cadence is invalid.
    pub fn new(recurrence: R, config: RunConfig) -> Result<Self, RunError> {
        config.validate()?;
        let clock = recurrence.clock();
        Ok(Self {
            recurrence,
            config,
            clock,
        })
    }

    /// The driven recurrence.
    pub fn recurrence(&self) -> &R {
        &self.recurrence
    }

    /// The run configuration.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// The recurrence's clock.
    pub fn clock(&self) -> SimulationClock {
        self.clock
    }

    /// Run to the end of the clock, keeping only the latest state.
    ///
    /// Memory stays bounded by one state plus whatever the sink retains.
    pub fn run<S: FrameSink<R::Frame>>(
        &self,
        mut sink: S,
    ) -> Result<RunSummary<R::State>, RunError> {
        let (last, metrics) = self.drive(&mut sink, |_| {})?;
        Ok(RunSummary { last, metrics })
    }

    /// Run to the end of the clock and keep every state.
    pub fn collect<S: FrameSink<R::Frame>>(
        &self,
        mut sink: S,
    ) -> Result<RunHistory<R::State>, RunError> {
        let mut states = Series::with_capacity(self.clock.n_steps());
        let (_, metrics) = self.drive(&mut sink, |state| {
            states.push(state.clone());
        })?;
        Ok(RunHistory { states, metrics })
    }

    fn drive<S: FrameSink<R::Frame>>(
        &self,
        sink: &mut S,
        mut observe: impl FnMut(&R::State),
    ) -> Result<(R::State, RunMetrics), RunError> {
        let engine = self.recurrence.name();
        let n_steps = self.clock.n_steps();
        info!(
            engine,
            seed = self.config.seed,
            n_steps,
            dt = self.clock.dt(),
            "run started"
        );

        let started = Instant::now();
        let mut metrics = RunMetrics::default();
        let mut rng = SimRng::new(self.config.seed);
        let mut ctx = StepContext::new(StepIndex::ZERO, &self.clock, &mut rng);

        let step_started = Instant::now();
        let mut state = self
            .recurrence
            .initial(&mut ctx)
            .map_err(|source| self.step_failed(StepIndex::ZERO, source))?;
        metrics.record_step(elapsed_us(step_started));
        observe(&state);
        self.emit(StepIndex::ZERO, &state, sink, &mut metrics)?;

        for t in 1..n_steps {
            let step = StepIndex::from(t);
            ctx.advance_to(step, &self.clock);

            let step_started = Instant::now();
            state = self
                .recurrence
                .step(&state, &mut ctx)
                .map_err(|source| self.step_failed(step, source))?;
            metrics.record_step(elapsed_us(step_started));

            observe(&state);
            self.emit(step, &state, sink, &mut metrics)?;
        }

        metrics.total_us = elapsed_us(started);
        info!(
            engine,
            steps = metrics.steps,
            frames = metrics.frames_emitted,
            total_us = metrics.total_us,
            "run finished"
        );
        Ok((state, metrics))
    }

    fn emit<S: FrameSink<R::Frame>>(
        &self,
        step: StepIndex,
        state: &R::State,
        sink: &mut S,
        metrics: &mut RunMetrics,
    ) -> Result<(), RunError> {
        if !self.config.cadence.emits(step) {
            return Ok(());
        }
        let frame = self.recurrence.frame(step, self.clock.time_at(step), state);
        sink.accept(step, frame).map_err(|e| {
            warn!(
                engine = self.recurrence.name(),
                %step,
                reason = %e.reason,
                "sink rejected frame"
            );
            RunError::sink(step, e)
        })?;
        metrics.frames_emitted += 1;
        debug!(step = step.0, "frame emitted");
        Ok(())
    }

    fn step_failed(&self, step: StepIndex, source: StepError) -> RunError {
        warn!(engine = self.recurrence.name(), %step, error = %source, "step failed");
        RunError::Step {
            engine: self.recurrence.name().to_string(),
            step,
            source,
        }
    }
}

fn elapsed_us(since: Instant) -> u64 {
    u64::try_from(since.elapsed().as_micros()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{Discard, SinkError};
    use proptest::prelude::*;
    use stepwise_core::FrameCadence;
    use stepwise_test_utils::{CountingRecurrence, FailingRecurrence, NoiseRecurrence};

    /// Accepts frames until `limit`, then refuses.
    struct LimitedSink {
        accepted: Vec<StepIndex>,
        limit: usize,
    }

    impl FrameSink<u64> for LimitedSink {
        fn accept(&mut self, step: StepIndex, _frame: u64) -> Result<(), SinkError> {
            if self.accepted.len() == self.limit {
                return Err(SinkError::new("full"));
            }
            self.accepted.push(step);
            Ok(())
        }
    }

    #[test]
    fn every_step_emits_all_frames_in_order() {
        let driver = Driver::new(CountingRecurrence::new(5), RunConfig::default()).unwrap();
        let mut frames: Vec<u64> = Vec::new();
        let summary = driver.run(&mut frames).unwrap();
        assert_eq!(frames, vec![0, 1, 2, 3, 4]);
        assert_eq!(summary.last, 4);
        assert_eq!(summary.metrics.steps, 5);
        assert_eq!(summary.metrics.frames_emitted, 5);
    }

    #[test]
    fn interval_cadence_selects_frames() {
        let config = RunConfig::seeded(0).with_cadence(FrameCadence::Every(3));
        let driver = Driver::new(CountingRecurrence::new(10), config).unwrap();
        let mut frames: Vec<u64> = Vec::new();
        let summary = driver.run(&mut frames).unwrap();
        assert_eq!(frames, vec![1, 3, 6, 9]);
        assert_eq!(summary.metrics.frames_emitted, 4);
        assert_eq!(summary.metrics.steps, 10);
    }

    #[test]
    fn invalid_cadence_rejected_at_construction() {
        let config = RunConfig::seeded(0).with_cadence(FrameCadence::Every(0));
        let result = Driver::new(CountingRecurrence::new(3), config);
        assert!(matches!(result, Err(RunError::Config(_))));
    }

    #[test]
    fn failing_step_aborts_run() {
        let driver = Driver::new(FailingRecurrence::new(10, 4), RunConfig::default()).unwrap();
        let mut frames: Vec<u64> = Vec::new();
        let err = driver.run(&mut frames).unwrap_err();
        match err {
            RunError::Step {
                engine,
                step,
                source: StepError::NumericDomain { .. },
            } => {
                assert_eq!(engine, "failing");
                assert_eq!(step, StepIndex(4));
            }
            other => panic!("expected step error, got {other:?}"),
        }
        // Steps 0..=3 were emitted, nothing from the failed step on.
        assert_eq!(frames, vec![0, 1, 2, 3]);
    }

    #[test]
    fn failing_initial_step_reports_step_zero() {
        let driver = Driver::new(FailingRecurrence::new(3, 0), RunConfig::default()).unwrap();
        let err = driver.run(Discard).unwrap_err();
        assert_eq!(err.step(), Some(StepIndex::ZERO));
    }

    #[test]
    fn sink_refusal_aborts_run() {
        let driver = Driver::new(CountingRecurrence::new(10), RunConfig::default()).unwrap();
        let mut sink = LimitedSink {
            accepted: Vec::new(),
            limit: 3,
        };
        let err = driver.run(&mut sink).unwrap_err();
        assert_eq!(
            err,
            RunError::Sink {
                step: StepIndex(3),
                reason: "full".into()
            }
        );
        assert_eq!(sink.accepted, vec![StepIndex(0), StepIndex(1), StepIndex(2)]);
    }

    #[test]
    fn collect_keeps_every_state() {
        let config = RunConfig::seeded(0).with_cadence(FrameCadence::Every(4));
        let driver = Driver::new(CountingRecurrence::new(9), config).unwrap();
        let history = driver.collect(Discard).unwrap();
        assert_eq!(history.states.len(), 9);
        assert_eq!(history.states.valid_through(), Some(StepIndex(8)));
        assert_eq!(history.states.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(history.metrics.frames_emitted, 3);
    }

    #[test]
    fn frames_carry_clock_time() {
        let driver = Driver::new(NoiseRecurrence::new(4, 0.25), RunConfig::seeded(1)).unwrap();
        let mut frames: Vec<(f64, f64)> = Vec::new();
        driver.run(&mut frames).unwrap();
        let times: Vec<f64> = frames.iter().map(|(t, _)| *t).collect();
        assert_eq!(times, vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn repeated_runs_reseed() {
        let driver = Driver::new(NoiseRecurrence::new(50, 1.0), RunConfig::seeded(9)).unwrap();
        let a = driver.run(Discard).unwrap().last;
        let b = driver.run(Discard).unwrap().last;
        assert_eq!(a.to_bits(), b.to_bits());
    }

    proptest! {
        #[test]
        fn frame_count_matches_cadence(n in 1usize..200, interval in 1usize..20) {
            let cadence = FrameCadence::Every(interval);
            let config = RunConfig::seeded(0).with_cadence(cadence);
            let driver = Driver::new(CountingRecurrence::new(n), config).unwrap();
            let mut frames: Vec<u64> = Vec::new();
            let summary = driver.run(&mut frames).unwrap();

            let expected = (0..n as u64).filter(|&t| cadence.emits(StepIndex(t))).count();
            prop_assert_eq!(frames.len(), expected);
            prop_assert_eq!(summary.metrics.frames_emitted, expected);
            prop_assert_eq!(summary.metrics.steps, n);
            prop_assert!(frames.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
