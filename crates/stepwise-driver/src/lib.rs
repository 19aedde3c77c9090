//! Run loop for Stepwise recurrences.
//!
//! [`Driver`] executes a [`Recurrence`](stepwise_core::Recurrence) over its
//! clock, streams cadence-selected frames into a [`FrameSink`], and reports
//! [`RunMetrics`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod driver;
pub mod error;
pub mod metrics;
pub mod sink;

pub use config::RunConfig;
pub use driver::{Driver, RunHistory, RunSummary};
pub use error::RunError;
pub use metrics::RunMetrics;
pub use sink::{Discard, FrameSink, SinkError};
