//! Stepwise: fixed-step stochastic and control simulations as explicit
//! recurrences.
//!
//! This is the facade crate re-exporting the public API of the Stepwise
//! sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use stepwise::prelude::*;
//!
//! let ensemble = WalkerEnsemble::builder().particles(500).t_max(101).build()?;
//! let driver = Driver::new(ensemble, RunConfig::seeded(4000))?;
//!
//! let history = driver.collect(Discard)?;
//! let spread = history.states[StepIndex(100)].variance(Axis::X);
//! assert!(spread > 50.0 && spread < 150.0);
//!
//! // Same seed, same frames.
//! stepwise::replay::verify_determinism(&driver)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `stepwise-core` | Recurrence trait, clock, RNG, cadence, series, errors |
//! | [`engines`] | `stepwise-engines` | Monte-Carlo, tank and random-walk engines |
//! | [`driver`] | `stepwise-driver` | Run loop, frame sinks, run metrics |
//! | [`replay`] | `stepwise-replay` | Frame hashing and determinism checks |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`stepwise-core`).
///
/// The [`types::Recurrence`] trait is the extension point for new engines.
pub use stepwise_core as types;

/// Reference engines (`stepwise-engines`).
pub use stepwise_engines as engines;

/// The run loop (`stepwise-driver`).
///
/// [`driver::Driver`] runs a recurrence and streams frames into a
/// [`driver::FrameSink`].
pub use stepwise_driver as driver;

/// Frame hashing and determinism checks (`stepwise-replay`).
pub use stepwise_replay as replay;

/// Common imports for typical Stepwise usage.
///
/// ```rust
/// use stepwise::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use stepwise_core::{
        FrameCadence, Recurrence, Series, SimRng, SimulationClock, StepContext, StepIndex,
    };

    // Errors
    pub use stepwise_core::{ConfigError, StepError};
    pub use stepwise_driver::{RunError, SinkError};

    // Engines
    pub use stepwise_engines::{
        estimate_pi, Axis, EmissionFrame, EnsembleFrame, PiEstimator, PiFrame,
        PointSourceEmission, Schedule, TankConfig, TankController, TankFrame, WalkerEnsemble,
    };

    // Driver
    pub use stepwise_driver::{Discard, Driver, FrameSink, RunConfig, RunMetrics};
}
