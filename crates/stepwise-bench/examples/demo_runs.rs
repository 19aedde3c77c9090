//! Runs every reference profile end to end and prints a summary.
//!
//! Set `RUST_LOG=debug` to see one event per emitted frame.

use std::error::Error;

use stepwise_bench::{emission_profile, ensemble_profile, pi_profile, tank_profile};
use stepwise_engines::{Axis, EmissionFrame, EnsembleFrame, PiFrame, TankFrame};
use stepwise_replay::verify_determinism;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Stepwise demo runs ===\n");

    // --- Monte-Carlo π ---
    let driver = pi_profile()?;
    let mut frames: Vec<PiFrame> = Vec::new();
    let summary = driver.run(&mut frames)?;
    println!("Monte-Carlo pi ({} batches)", frames.len());
    for frame in frames.iter().step_by(20) {
        println!(
            "  n={:>5}: estimate={:.5}, error={:.5}",
            frame.sample_count,
            frame.pi_estimate,
            frame.absolute_error()
        );
    }
    println!(
        "  final n={}: estimate={:.5} in {}us\n",
        summary.last.sample_count, summary.last.pi_estimate, summary.metrics.total_us
    );

    // --- Tank level ---
    let driver = tank_profile()?;
    let mut frames: Vec<TankFrame> = Vec::new();
    let summary = driver.run(&mut frames)?;
    println!("Tank level PI control ({} frames)", frames.len());
    for frame in frames.iter().step_by(10) {
        println!(
            "  t={:>6.1}s: level={:>6.3}, setpoint={:.1}, valve={:.3}, outflow={:.3}",
            frame.time, frame.level, frame.setpoint, frame.valve_opening, frame.outflow
        );
    }
    println!(
        "  slowest step {}us, total {}us\n",
        summary.metrics.slowest_step_us, summary.metrics.total_us
    );

    // --- Random-walk ensemble ---
    let driver = ensemble_profile()?;
    let mut frames: Vec<EnsembleFrame> = Vec::new();
    let summary = driver.run(&mut frames)?;
    let last = &summary.last;
    println!("Random-walk ensemble ({} walkers)", last.len());
    println!(
        "  final: var(x)={:.1}, var(y)={:.1}, msd={:.1}",
        last.variance(Axis::X),
        last.variance(Axis::Y),
        last.mean_squared_displacement()
    );
    let histogram = last.histogram(Axis::X, 20)?;
    println!(
        "  x histogram over [{:.0}, {:.0}): {:?}",
        histogram.low, histogram.high, histogram.counts
    );
    let recording = verify_determinism(&driver)?;
    println!("  replay verified over {} frames\n", recording.len());

    // --- Point-source emission ---
    let driver = emission_profile()?;
    let mut frames: Vec<EmissionFrame> = Vec::new();
    let summary = driver.run(&mut frames)?;
    println!("Point-source emission ({} frames)", frames.len());
    for frame in &frames {
        println!(
            "  t={:>6.0}: {} cohorts, {} walkers",
            frame.time,
            frame.cohorts.len(),
            frame.particle_count()
        );
    }
    println!("  total {}us", summary.metrics.total_us);

    Ok(())
}
