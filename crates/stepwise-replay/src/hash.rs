//! FNV-1a hashing of frame data and run configuration.
//!
//! Floats are hashed by bit pattern, so `0.0` and `-0.0` differ and every
//! NaN payload is distinct. These hashes are not cryptographically secure.

use stepwise_core::{FrameCadence, Recurrence};
use stepwise_driver::Driver;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

/// Incremental FNV-1a hasher over little-endian byte encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHasher {
    state: u64,
}

impl FrameHasher {
    /// A hasher at the FNV-1a offset basis.
    pub fn new() -> Self {
        Self { state: FNV_OFFSET }
    }

    /// Feed one byte.
    #[inline]
    pub fn write_u8(&mut self, byte: u8) {
        self.state = (self.state ^ byte as u64).wrapping_mul(FNV_PRIME);
    }

    /// Feed raw bytes in order.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_u8(b);
        }
    }

    /// Feed a `u64` as 8 LE bytes.
    #[inline]
    pub fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    /// Feed an `i64` as 8 LE bytes.
    #[inline]
    pub fn write_i64(&mut self, v: i64) {
        self.write_bytes(&v.to_le_bytes());
    }

    /// Feed a `usize` widened to `u64`.
    #[inline]
    pub fn write_usize(&mut self, v: usize) {
        self.write_u64(v as u64);
    }

    /// Feed an `f64` by bit pattern.
    #[inline]
    pub fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    /// Feed a length prefix then every element.
    pub fn write_f64_slice(&mut self, values: &[f64]) {
        self.write_usize(values.len());
        for &v in values {
            self.write_f64(v);
        }
    }

    /// Feed a length prefix then every element.
    pub fn write_i64_slice(&mut self, values: &[i64]) {
        self.write_usize(values.len());
        for &v in values {
            self.write_i64(v);
        }
    }

    /// The current hash value.
    pub fn finish(&self) -> u64 {
        self.state
    }
}

impl Default for FrameHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash of everything that determines a driver's frame stream: engine
/// name, seed, step size, step count and cadence.
///
/// Recordings carry this so that comparing runs of different setups is
/// reported as a configuration mismatch rather than a divergence.
pub fn run_config_hash<R: Recurrence>(driver: &Driver<R>) -> u64 {
    let clock = driver.clock();
    let config = driver.config();
    let mut hasher = FrameHasher::new();
    hasher.write_bytes(driver.recurrence().name().as_bytes());
    hasher.write_u64(config.seed);
    hasher.write_f64(clock.dt());
    hasher.write_usize(clock.n_steps());
    match config.cadence {
        FrameCadence::EveryStep => hasher.write_u8(0),
        FrameCadence::Every(interval) => {
            hasher.write_u8(1);
            hasher.write_usize(interval);
        }
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_driver::RunConfig;
    use stepwise_test_utils::CountingRecurrence;

    #[test]
    fn empty_hash_is_offset_basis() {
        assert_eq!(FrameHasher::new().finish(), FNV_OFFSET);
    }

    #[test]
    fn known_fnv1a_vector() {
        // FNV-1a 64 of "a".
        let mut h = FrameHasher::new();
        h.write_u8(b'a');
        assert_eq!(h.finish(), 0xaf63dc4c8601ec8c);
    }

    #[test]
    fn signed_zero_hashes_differ() {
        let mut a = FrameHasher::new();
        let mut b = FrameHasher::new();
        a.write_f64(0.0);
        b.write_f64(-0.0);
        assert_ne!(a.finish(), b.finish());
    }

    #[test]
    fn length_prefix_separates_slices() {
        let mut a = FrameHasher::new();
        a.write_i64_slice(&[1, 2]);
        a.write_i64_slice(&[3]);
        let mut b = FrameHasher::new();
        b.write_i64_slice(&[1]);
        b.write_i64_slice(&[2, 3]);
        assert_ne!(a.finish(), b.finish());
    }

    #[test]
    fn config_hash_tracks_seed_and_cadence() {
        let driver = |seed, cadence| {
            Driver::new(
                CountingRecurrence::new(10),
                RunConfig::seeded(seed).with_cadence(cadence),
            )
            .unwrap()
        };
        let base = run_config_hash(&driver(1, FrameCadence::EveryStep));
        assert_eq!(base, run_config_hash(&driver(1, FrameCadence::EveryStep)));
        assert_ne!(base, run_config_hash(&driver(2, FrameCadence::EveryStep)));
        assert_ne!(base, run_config_hash(&driver(1, FrameCadence::Every(2))));
    }
}
