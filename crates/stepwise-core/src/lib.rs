//! Core types and traits for the Stepwise simulation engines.
//!
//! This is the leaf crate of the workspace. It defines the abstractions
//! shared by every engine: step identifiers, the fixed-step clock, error
//! types, the seeded random source, the state series buffer, frame
//! cadences and the [`Recurrence`] trait.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cadence;
pub mod clock;
pub mod error;
pub mod id;
pub mod recurrence;
pub mod rng;
pub mod series;

pub use cadence::FrameCadence;
pub use clock::SimulationClock;
pub use error::{ConfigError, StepError};
pub use id::StepIndex;
pub use recurrence::{Recurrence, StepContext};
pub use rng::SimRng;
pub use series::Series;
