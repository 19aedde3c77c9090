//! Test utilities and mock types for Stepwise development.
//!
//! Provides mock [`Recurrence`] implementations for exercising drivers
//! without a real engine, a minimal [`step_all`] loop for testing engines
//! without a driver, and bit-exact float assertions.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{CountingRecurrence, FailingRecurrence, NoiseRecurrence};

use stepwise_core::{Recurrence, SimRng, StepContext, StepError, StepIndex};

/// Run `recurrence` over its whole clock with a fresh `SimRng(seed)` and
/// return every state.
///
/// This is the bare recurrence loop with no cadence, sink or metrics.
pub fn step_all<R: Recurrence>(recurrence: &R, seed: u64) -> Result<Vec<R::State>, StepError> {
    step_n(recurrence, seed, recurrence.clock().n_steps())
}

/// Like [`step_all`] but stops after `n` states (clamped to the clock).
pub fn step_n<R: Recurrence>(
    recurrence: &R,
    seed: u64,
    n: usize,
) -> Result<Vec<R::State>, StepError> {
    let clock = recurrence.clock();
    let n = n.min(clock.n_steps());
    let mut rng = SimRng::new(seed);
    let mut ctx = StepContext::new(StepIndex::ZERO, &clock, &mut rng);

    let mut states = Vec::with_capacity(n);
    if n == 0 {
        return Ok(states);
    }
    states.push(recurrence.initial(&mut ctx)?);
    for t in 1..n {
        ctx.advance_to(StepIndex::from(t), &clock);
        let next = recurrence.step(&states[t - 1], &mut ctx)?;
        states.push(next);
    }
    Ok(states)
}

/// Assert two float slices are bit-identical, reporting the first mismatch.
#[track_caller]
pub fn assert_bits_eq(left: &[f64], right: &[f64]) {
    assert_eq!(left.len(), right.len(), "length mismatch");
    for (i, (a, b)) in left.iter().zip(right).enumerate() {
        assert_eq!(a.to_bits(), b.to_bits(), "index {i}: {a} != {b}");
    }
}
