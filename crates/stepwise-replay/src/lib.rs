//! Frame hashing and run comparison for Stepwise.
//!
//! Two runs of the same recurrence with the same seed must emit
//! bit-identical frames. This crate checks that cheaply:
//!
//! - [`FrameDigest`] feeds a frame's bit patterns into a [`FrameHasher`]
//! - [`Recording`] is a sink keeping one hash per emitted frame
//! - [`compare_recordings`] finds the first divergent step
//! - [`verify_determinism`] runs a driver twice and compares

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod compare;
pub mod digest;
pub mod error;
pub mod hash;
pub mod recording;

pub use compare::{compare_recordings, first_divergence, verify_determinism, Divergence};
pub use digest::{frame_hash, FrameDigest};
pub use error::ReplayError;
pub use hash::{run_config_hash, FrameHasher};
pub use recording::{record, Recording};
