//! Small deterministic pseudo-random source for reseeding patterns.
//!
//! Patterns only need cheap, well-spread integers; reproducibility for a given seed
//! matters more than statistical quality. [`Rng`] wraps a PCG32 generator from
//! `rand_pcg` and adds the few bounded helpers the patterns use.
//!
//! Firmware seeds it once at startup from the hardware ring oscillator.

use rand_core::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// Deterministic pseudo-random number generator.
///
/// ```rust
/// use xmas_lights::rng::Rng;
///
/// let mut first = Rng::new(42);
/// let mut second = Rng::new(42);
/// assert_eq!(first.next_u32(), second.next_u32());
/// assert!(first.below(3) < 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rng(Pcg32);

impl Rng {
    /// Create a generator from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self(Pcg32::seed_from_u64(seed))
    }

    /// Next 32 pseudo-random bits.
    pub fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    /// Uniform-ish value in `[0, bound)`. Returns 0 when `bound` is 0.
    pub fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.next_u32() % bound
    }

    /// [`Self::below`] for `usize` bounds (frame dimensions, table lengths).
    #[allow(clippy::cast_possible_truncation, reason = "bounds are frame-sized")]
    pub fn below_usize(&mut self, bound: usize) -> usize {
        self.below(bound as u32) as usize
    }

    /// A fair coin flip.
    pub fn coin(&mut self) -> bool {
        self.next_u32() & 1 == 1
    }
}

impl RngCore for Rng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.0.try_fill_bytes(dest)
    }
}
