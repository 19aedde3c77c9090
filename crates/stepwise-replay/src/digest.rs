//! Bit-exact digests of every frame type.

use stepwise_engines::{CohortPositions, EmissionFrame, EnsembleFrame, PiSample, TankFrame};

use crate::hash::FrameHasher;

/// A frame that can be folded into a [`FrameHasher`].
///
/// Implementations feed every field that reaches the renderer, in
/// declaration order, with length prefixes on variable-size data.
pub trait FrameDigest {
    /// Feed this frame into `hasher`.
    fn digest(&self, hasher: &mut FrameHasher);
}

/// FNV-1a hash of a single frame.
pub fn frame_hash<F: FrameDigest + ?Sized>(frame: &F) -> u64 {
    let mut hasher = FrameHasher::new();
    frame.digest(&mut hasher);
    hasher.finish()
}

impl FrameDigest for u64 {
    fn digest(&self, hasher: &mut FrameHasher) {
        hasher.write_u64(*self);
    }
}

impl FrameDigest for f64 {
    fn digest(&self, hasher: &mut FrameHasher) {
        hasher.write_f64(*self);
    }
}

impl<A: FrameDigest, B: FrameDigest> FrameDigest for (A, B) {
    fn digest(&self, hasher: &mut FrameHasher) {
        self.0.digest(hasher);
        self.1.digest(hasher);
    }
}

impl<T: FrameDigest> FrameDigest for [T] {
    fn digest(&self, hasher: &mut FrameHasher) {
        hasher.write_usize(self.len());
        for item in self {
            item.digest(hasher);
        }
    }
}

impl<T: FrameDigest> FrameDigest for Vec<T> {
    fn digest(&self, hasher: &mut FrameHasher) {
        self.as_slice().digest(hasher);
    }
}

impl FrameDigest for PiSample {
    fn digest(&self, hasher: &mut FrameHasher) {
        hasher.write_usize(self.sample_count);
        hasher.write_f64_slice(&self.xs);
        hasher.write_f64_slice(&self.ys);
        hasher.write_f64_slice(&self.distances);
        hasher.write_f64(self.pi_estimate);
    }
}

impl FrameDigest for TankFrame {
    fn digest(&self, hasher: &mut FrameHasher) {
        hasher.write_f64(self.time);
        hasher.write_f64(self.level);
        hasher.write_f64(self.setpoint);
        hasher.write_f64(self.inflow);
        hasher.write_f64(self.outflow);
        hasher.write_f64(self.valve_opening);
    }
}

impl FrameDigest for EnsembleFrame {
    fn digest(&self, hasher: &mut FrameHasher) {
        hasher.write_f64(self.time);
        hasher.write_i64_slice(&self.xs);
        hasher.write_i64_slice(&self.ys);
    }
}

impl FrameDigest for CohortPositions {
    fn digest(&self, hasher: &mut FrameHasher) {
        hasher.write_usize(self.cohort);
        hasher.write_i64_slice(&self.xs);
        hasher.write_i64_slice(&self.ys);
    }
}

impl FrameDigest for EmissionFrame {
    fn digest(&self, hasher: &mut FrameHasher) {
        hasher.write_f64(self.time);
        self.cohorts.digest(hasher);
    }
}
