//! Simulation engines for the Stepwise workspace.
//!
//! Each engine implements [`Recurrence`](stepwise_core::Recurrence) and is
//! independent of the others:
//!
//! - [`PiEstimator`]: Monte-Carlo estimate of π over increasing sample counts.
//! - [`TankController`]: tank level under PI feedback control of an outflow valve.
//! - [`WalkerEnsemble`]: independent 2D lattice random walkers.
//! - [`PointSourceEmission`]: one cohort of walkers released per step and
//!   advected along the x axis.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod emission;
pub mod ensemble;
pub mod monte_carlo;
pub mod schedule;
pub mod tank;

pub use emission::{Cohort, CohortPositions, EmissionFrame, EmissionState, PointSourceEmission};
pub use ensemble::{trajectory, Axis, EnsembleFrame, EnsembleState, Histogram, WalkerEnsemble};
pub use monte_carlo::{estimate_pi, PiEstimator, PiFrame, PiSample};
pub use schedule::Schedule;
pub use tank::{PiGains, TankConfig, TankController, TankFrame, TankInputs, TankParams, TankState};
