//! Procedural animation patterns.
//!
//! Every pattern is a struct that owns its particle state and implements [`Pattern`]:
//! one call to [`Pattern::tick`] advances the simulation by one frame and draws it into the
//! shared [`Frame2d`]. A [`Countdown`] inside each pattern decides when its cycle ends; the
//! tick that finishes the cycle returns `true` so the [`Sequencer`](crate::sequencer::Sequencer)
//! can move on. The next tick after that is a *cycle start*, where the pattern reseeds its
//! particles from the [`Rng`].
//!
//! The set of patterns is closed; [`Animation`] wraps them in one enum so a sequencer can
//! hold a fixed array of mixed patterns.
//!
//! # Example
//!
//! ```rust
//! use xmas_lights::led2d::Frame2d;
//! use xmas_lights::pattern::{Pattern, Snow};
//! use xmas_lights::rng::Rng;
//!
//! let mut frame = Frame2d::<100, 3>::new();
//! let mut rng = Rng::new(7);
//! let mut snow: Snow<100, 3> = Snow::new();
//! let finished = (0..1000).filter(|_| snow.tick(&mut frame, &mut rng)).count();
//! assert_eq!(finished, 1);
//! ```

use crate::led2d::Frame2d;
use crate::rng::Rng;

pub mod candy_cane;
pub mod font;
pub mod rainbow_drops;
pub mod ripples;
pub mod snow;
pub mod text_scroller;

pub use candy_cane::CandyCane;
pub use font::{Font, Glyph, MonoGlyphFont};
pub use rainbow_drops::RainbowDrops;
pub use ripples::Ripples;
pub use snow::{LayeredSnow, Snow};
pub use text_scroller::TextScroller;

/// One animation that can be advanced a tick at a time.
pub trait Pattern<const W: usize, const H: usize> {
    /// Advance one tick and draw into `frame`.
    ///
    /// Returns `true` exactly on the tick that completes the pattern's cycle.
    fn tick(&mut self, frame: &mut Frame2d<W, H>, rng: &mut Rng) -> bool;
}

impl<const W: usize, const H: usize, P: Pattern<W, H> + ?Sized> Pattern<W, H> for &mut P {
    fn tick(&mut self, frame: &mut Frame2d<W, H>, rng: &mut Rng) -> bool {
        (**self).tick(frame, rng)
    }
}

/// Tick countdown that marks the start and end of a pattern's cycle.
///
/// ```rust
/// use xmas_lights::pattern::Countdown;
///
/// let mut countdown = Countdown::new(3);
/// assert!(countdown.is_cycle_start());
/// assert!(!countdown.tick());
/// assert!(!countdown.is_cycle_start());
/// assert!(!countdown.tick());
/// assert!(countdown.tick()); // third tick completes the cycle
/// assert!(countdown.is_cycle_start());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    period: u32,
    remaining: u32,
}

impl Countdown {
    /// A countdown of `period` ticks, positioned at the start of a cycle.
    #[must_use]
    pub const fn new(period: u32) -> Self {
        assert!(period > 0, "cycle period must be positive");
        Self {
            period,
            remaining: period,
        }
    }

    /// Ticks per cycle.
    #[must_use]
    pub const fn period(&self) -> u32 {
        self.period
    }

    /// Ticks left in the current cycle.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether no tick of the current cycle has happened yet.
    #[must_use]
    pub const fn is_cycle_start(&self) -> bool {
        self.remaining == self.period
    }

    /// Count one tick. Returns `true` when the cycle completes, and rewinds for the next one.
    pub const fn tick(&mut self) -> bool {
        self.remaining -= 1;
        if self.remaining == 0 {
            self.remaining = self.period;
            true
        } else {
            false
        }
    }

    /// Rewind to the start of a cycle.
    pub const fn restart(&mut self) {
        self.remaining = self.period;
    }
}

/// The closed set of patterns, for sequencing them together.
#[derive(Clone, Debug)]
pub enum Animation<const W: usize, const H: usize> {
    /// See [`Snow`].
    Snow(Snow<W, H>),
    /// See [`LayeredSnow`].
    LayeredSnow(LayeredSnow<W, H>),
    /// See [`RainbowDrops`].
    RainbowDrops(RainbowDrops<W, H>),
    /// See [`Ripples`].
    Ripples(Ripples<W, H>),
    /// See [`CandyCane`].
    CandyCane(CandyCane<W, H>),
    /// See [`TextScroller`].
    TextScroller(TextScroller<W, H>),
}

impl<const W: usize, const H: usize> Animation<W, H> {
    /// The text scroller inside, if this is one.
    pub const fn as_text_scroller_mut(&mut self) -> Option<&mut TextScroller<W, H>> {
        match self {
            Self::TextScroller(text_scroller) => Some(text_scroller),
            _ => None,
        }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Snow(_) => "snow",
            Self::LayeredSnow(_) => "layered snow",
            Self::RainbowDrops(_) => "rainbow drops",
            Self::Ripples(_) => "ripples",
            Self::CandyCane(_) => "candy cane",
            Self::TextScroller(_) => "text",
        }
    }
}

impl<const W: usize, const H: usize> Pattern<W, H> for Animation<W, H> {
    fn tick(&mut self, frame: &mut Frame2d<W, H>, rng: &mut Rng) -> bool {
        match self {
            Self::Snow(pattern) => pattern.tick(frame, rng),
            Self::LayeredSnow(pattern) => pattern.tick(frame, rng),
            Self::RainbowDrops(pattern) => pattern.tick(frame, rng),
            Self::Ripples(pattern) => pattern.tick(frame, rng),
            Self::CandyCane(pattern) => pattern.tick(frame, rng),
            Self::TextScroller(pattern) => pattern.tick(frame, rng),
        }
    }
}

impl<const W: usize, const H: usize> From<Snow<W, H>> for Animation<W, H> {
    fn from(pattern: Snow<W, H>) -> Self {
        Self::Snow(pattern)
    }
}

impl<const W: usize, const H: usize> From<LayeredSnow<W, H>> for Animation<W, H> {
    fn from(pattern: LayeredSnow<W, H>) -> Self {
        Self::LayeredSnow(pattern)
    }
}

impl<const W: usize, const H: usize> From<RainbowDrops<W, H>> for Animation<W, H> {
    fn from(pattern: RainbowDrops<W, H>) -> Self {
        Self::RainbowDrops(pattern)
    }
}

impl<const W: usize, const H: usize> From<Ripples<W, H>> for Animation<W, H> {
    fn from(pattern: Ripples<W, H>) -> Self {
        Self::Ripples(pattern)
    }
}

impl<const W: usize, const H: usize> From<CandyCane<W, H>> for Animation<W, H> {
    fn from(pattern: CandyCane<W, H>) -> Self {
        Self::CandyCane(pattern)
    }
}

impl<const W: usize, const H: usize> From<TextScroller<W, H>> for Animation<W, H> {
    fn from(pattern: TextScroller<W, H>) -> Self {
        Self::TextScroller(pattern)
    }
}
