//! The [`Recurrence`] trait and the [`StepContext`] passed to it.
//!
//! A simulation engine is an explicit recurrence: an initial state at
//! step 0, then `step(prev, ctx) -> next` for every later step. The
//! engine never sees more than its predecessor state, which makes the
//! data dependency between steps visible in the signature and keeps each
//! update rule testable in isolation.

use crate::clock::SimulationClock;
use crate::error::StepError;
use crate::id::StepIndex;
use crate::rng::SimRng;

/// Execution context for one step.
///
/// Carries the step index and time, the clock's `dt`, and the run's
/// single random source. Engines that are purely deterministic simply
/// ignore [`rng()`](StepContext::rng).
pub struct StepContext<'a> {
    step: StepIndex,
    time: f64,
    dt: f64,
    rng: &'a mut SimRng,
}

impl<'a> StepContext<'a> {
    /// Construct the context for `step` on `clock`.
    ///
    /// Typically called by the driver, not by engines directly.
    pub fn new(step: StepIndex, clock: &SimulationClock, rng: &'a mut SimRng) -> Self {
        Self {
            step,
            time: clock.time_at(step),
            dt: clock.dt(),
            rng,
        }
    }

    /// The step being computed.
    pub fn step(&self) -> StepIndex {
        self.step
    }

    /// Simulation time of the step being computed.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Step size.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// The run's random source.
    pub fn rng(&mut self) -> &mut SimRng {
        self.rng
    }

    /// Move the context to `step` on `clock`, keeping the same random source.
    pub fn advance_to(&mut self, step: StepIndex, clock: &SimulationClock) {
        self.step = step;
        self.time = clock.time_at(step);
        self.dt = clock.dt();
    }
}

/// A fixed-step simulation expressed as a recurrence over states.
///
/// # Contract
///
/// - `step()` reads only `prev` and the context: same inputs and same
///   random stream produce identical outputs.
/// - `&self`: engines hold parameters only; all evolving state lives in
///   `State`.
/// - `frame()` is pure and is called only for steps the cadence selects.
///
/// # Examples
///
/// ```
/// use stepwise_core::{Recurrence, SimulationClock, StepContext, StepError, StepIndex};
///
/// struct Counter;
///
/// impl Recurrence for Counter {
///     type State = u64;
///     type Frame = u64;
///
///     fn name(&self) -> &str { "counter" }
///     fn clock(&self) -> SimulationClock { SimulationClock::unit(10).unwrap() }
///     fn initial(&self, _ctx: &mut StepContext<'_>) -> Result<u64, StepError> { Ok(0) }
///     fn step(&self, prev: &u64, _ctx: &mut StepContext<'_>) -> Result<u64, StepError> {
///         Ok(prev + 1)
///     }
///     fn frame(&self, _step: StepIndex, _time: f64, state: &u64) -> u64 { *state }
/// }
///
/// assert_eq!(Counter.clock().n_steps(), 10);
/// ```
pub trait Recurrence {
    /// Full per-step state.
    type State: Clone;

    /// Snapshot handed to the downstream renderer.
    type Frame;

    /// Human-readable name for error reporting and logs.
    fn name(&self) -> &str;

    /// The clock this recurrence runs on.
    fn clock(&self) -> SimulationClock;

    /// Compute the state at step 0.
    fn initial(&self, ctx: &mut StepContext<'_>) -> Result<Self::State, StepError>;

    /// Compute the state at `ctx.step()` from the state at the step before.
    fn step(
        &self,
        prev: &Self::State,
        ctx: &mut StepContext<'_>,
    ) -> Result<Self::State, StepError>;

    /// Build the renderer frame for `state`.
    fn frame(&self, step: StepIndex, time: f64, state: &Self::State) -> Self::Frame;
}
