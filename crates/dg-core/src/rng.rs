//! Deterministic simulation-level RNG.
//!
//! Used only for session setup (obstacle scattering).  Movement and search
//! are fully deterministic and never draw random numbers.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::Coordinate;

/// Seeded `SmallRng` wrapper.  Same seed, same sequence.
///
/// Used only in single-threaded contexts; there is one per session build.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform cell in `[0, width) × [0, height)`.  Both dimensions must be
    /// positive.
    #[inline]
    pub fn coordinate(&mut self, width: i32, height: i32) -> Coordinate {
        Coordinate::new(self.0.gen_range(0..width), self.0.gen_range(0..height))
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }
}
