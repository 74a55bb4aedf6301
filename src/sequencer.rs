//! Round-robin scheduling of patterns.
//!
//! A [`Sequencer`] owns a fixed array of patterns and ticks only the active one. When the
//! active pattern reports the end of its cycle, the next pattern becomes active; after the
//! last one the rotation starts over at the first.
//!
//! ```rust
//! use xmas_lights::led2d::Frame2d;
//! use xmas_lights::pattern::{Animation, CandyCane, Snow};
//! use xmas_lights::rng::Rng;
//! use xmas_lights::sequencer::{Sequencer, Step};
//!
//! let mut sequencer: Sequencer<Animation<10, 2>, 2> = Sequencer::new([
//!     Animation::Snow(Snow::with_period(2)),
//!     Animation::CandyCane(CandyCane::with_period(1)),
//! ]);
//! let mut frame = Frame2d::<10, 2>::new();
//! let mut rng = Rng::new(1);
//!
//! assert_eq!(sequencer.tick(&mut frame, &mut rng), Step::Running);
//! assert_eq!(sequencer.tick(&mut frame, &mut rng), Step::Switched { index: 1 });
//! assert_eq!(sequencer.tick(&mut frame, &mut rng), Step::RotationComplete);
//! assert_eq!(sequencer.active_index(), 0);
//! ```

use crate::led2d::Frame2d;
use crate::pattern::Pattern;
use crate::rng::Rng;

/// What a [`Sequencer::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The active pattern is still mid-cycle.
    Running,
    /// The active pattern finished and pattern `index` takes over.
    Switched {
        /// Index of the newly active pattern.
        index: usize,
    },
    /// The last pattern finished; the first one is active again.
    RotationComplete,
}

/// Fixed-size round-robin over `N` patterns.
#[derive(Clone, Debug)]
pub struct Sequencer<P, const N: usize> {
    patterns: [P; N],
    active: usize,
}

impl<P, const N: usize> Sequencer<P, N> {
    /// A sequencer starting at the first pattern.
    #[must_use]
    pub const fn new(patterns: [P; N]) -> Self {
        const { assert!(N > 0, "sequencer needs at least one pattern") };
        Self {
            patterns,
            active: 0,
        }
    }

    /// Index of the pattern the next tick will advance.
    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active
    }

    /// The pattern the next tick will advance.
    #[must_use]
    pub const fn active(&self) -> &P {
        &self.patterns[self.active]
    }

    /// All patterns, in rotation order.
    #[must_use]
    pub const fn patterns(&self) -> &[P; N] {
        &self.patterns
    }

    /// Mutable access to the patterns, for example to change a scroller's text.
    pub const fn patterns_mut(&mut self) -> &mut [P; N] {
        &mut self.patterns
    }

    /// Advance the active pattern one tick, switching to the next one if it finished.
    pub fn tick<const W: usize, const H: usize>(
        &mut self,
        frame: &mut Frame2d<W, H>,
        rng: &mut Rng,
    ) -> Step
    where
        P: Pattern<W, H>,
    {
        if !self.patterns[self.active].tick(frame, rng) {
            return Step::Running;
        }
        self.active = (self.active + 1) % N;
        if self.active == 0 {
            Step::RotationComplete
        } else {
            Step::Switched {
                index: self.active,
            }
        }
    }
}
