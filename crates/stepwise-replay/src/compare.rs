//! Recording comparison and determinism verification.

use stepwise_core::{Recurrence, StepIndex};
use stepwise_driver::Driver;
use tracing::{info, warn};

use crate::digest::FrameDigest;
use crate::error::ReplayError;
use crate::recording::{record, Recording};

/// The first frame at which two recordings disagree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Divergence {
    /// Step of the recorded frame at the divergent position.
    pub step: StepIndex,
    /// Frame hash in the recorded run.
    pub recorded: u64,
    /// Frame hash in the replayed run.
    pub replayed: u64,
}

/// Find the first position where two recordings differ in step or hash.
///
/// Ignores configuration hashes and trailing length differences; see
/// [`compare_recordings`] for the full check.
pub fn first_divergence(recorded: &Recording, replayed: &Recording) -> Option<Divergence> {
    recorded
        .entries()
        .iter()
        .zip(replayed.entries())
        .find(|(a, b)| a != b)
        .map(|(&(step, recorded), &(_, replayed))| Divergence {
            step,
            recorded,
            replayed,
        })
}

/// Compare two recordings frame by frame.
///
/// Checks, in order: configuration hashes, the first divergent frame in
/// the common prefix, then the frame counts.
///
/// # Errors
///
/// - [`ReplayError::ConfigMismatch`] if the runs were configured differently
/// - [`ReplayError::Diverged`] at the first differing frame
/// - [`ReplayError::LengthMismatch`] if one run emitted more frames
pub fn compare_recordings(recorded: &Recording, replayed: &Recording) -> Result<(), ReplayError> {
    if recorded.config_hash() != replayed.config_hash() {
        return Err(ReplayError::ConfigMismatch {
            recorded: recorded.config_hash(),
            replayed: replayed.config_hash(),
        });
    }
    if let Some(d) = first_divergence(recorded, replayed) {
        return Err(ReplayError::Diverged {
            step: d.step,
            recorded: d.recorded,
            replayed: d.replayed,
        });
    }
    if recorded.len() != replayed.len() {
        return Err(ReplayError::LengthMismatch {
            recorded: recorded.len(),
            replayed: replayed.len(),
        });
    }
    Ok(())
}

/// Run `driver` twice and check both runs emit identical frames.
///
/// Returns the recording on success.
///
/// # Errors
///
/// Any [`ReplayError`] from [`record`] or [`compare_recordings`].
pub fn verify_determinism<R>(driver: &Driver<R>) -> Result<Recording, ReplayError>
where
    R: Recurrence,
    R::Frame: FrameDigest,
{
    let engine = driver.recurrence().name();
    let first = record(driver)?;
    let second = record(driver)?;
    match compare_recordings(&first, &second) {
        Ok(()) => {
            info!(engine, frames = first.len(), "run is deterministic");
            Ok(first)
        }
        Err(e) => {
            warn!(engine, error = %e, "run is not deterministic");
            Err(e)
        }
    }
}
