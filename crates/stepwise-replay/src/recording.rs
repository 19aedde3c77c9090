//! Recording sink: one hash per emitted frame.

use stepwise_core::{Recurrence, StepIndex};
use stepwise_driver::{Driver, FrameSink, SinkError};
use tracing::debug;

use crate::digest::{frame_hash, FrameDigest};
use crate::error::ReplayError;
use crate::hash::run_config_hash;

/// Frame hashes of one run, in emission order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Recording {
    config_hash: u64,
    entries: Vec<(StepIndex, u64)>,
}

impl Recording {
    /// An empty recording tagged with a run configuration hash.
    pub fn new(config_hash: u64) -> Self {
        Self {
            config_hash,
            entries: Vec::new(),
        }
    }

    /// An empty recording for `driver`'s configuration.
    pub fn for_driver<R: Recurrence>(driver: &Driver<R>) -> Self {
        Self::new(run_config_hash(driver))
    }

    /// Hash of the run configuration this recording belongs to.
    pub fn config_hash(&self) -> u64 {
        self.config_hash
    }

    /// `(step, frame hash)` pairs in emission order.
    pub fn entries(&self) -> &[(StepIndex, u64)] {
        &self.entries
    }

    /// Number of recorded frames.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no frame has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hash of the frame emitted at `step`, if that step was recorded.
    pub fn hash_at(&self, step: StepIndex) -> Option<u64> {
        self.entries
            .binary_search_by_key(&step, |&(s, _)| s)
            .ok()
            .map(|i| self.entries[i].1)
    }

    /// Append a hash directly.
    pub fn push(&mut self, step: StepIndex, hash: u64) {
        self.entries.push((step, hash));
    }
}

impl<F: FrameDigest> FrameSink<F> for Recording {
    fn accept(&mut self, step: StepIndex, frame: F) -> Result<(), SinkError> {
        if let Some(&(last, _)) = self.entries.last() {
            if step <= last {
                return Err(SinkError::new(format!(
                    "step {step} recorded after step {last}"
                )));
            }
        }
        self.entries.push((step, frame_hash(&frame)));
        Ok(())
    }
}

/// Run `driver` once and record every emitted frame.
///
/// # Errors
///
/// Returns [`ReplayError::Run`] if the run fails.
pub fn record<R>(driver: &Driver<R>) -> Result<Recording, ReplayError>
where
    R: Recurrence,
    R::Frame: FrameDigest,
{
    let mut recording = Recording::for_driver(driver);
    driver.run(&mut recording)?;
    debug!(
        engine = driver.recurrence().name(),
        frames = recording.len(),
        "run recorded"
    );
    Ok(recording)
}
