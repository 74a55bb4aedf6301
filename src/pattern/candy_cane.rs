//! Red-and-white striped blocks scrolling along each row.

use smart_leds::{RGB8, colors};

use super::{Countdown, Pattern};
use crate::gradient::{STOP_GREEN, STOP_RED};
use crate::led2d::Frame2d;
use crate::rng::Rng;

/// Ticks per candy-cane cycle.
pub const CANDY_CANE_TICKS: u32 = 1000;

/// Length of one repeat of the stripe.
pub const CANDY_STRIPE_PERIOD: usize = 32;

/// One stripe repeat: a white-green-red-green-white block followed by unlit gap.
pub const CANDY_STRIPE: [Option<RGB8>; CANDY_STRIPE_PERIOD] = {
    const BLOCK: [RGB8; 9] = [
        colors::WHITE,
        colors::WHITE,
        STOP_GREEN,
        STOP_RED,
        STOP_RED,
        STOP_RED,
        STOP_GREEN,
        colors::WHITE,
        colors::WHITE,
    ];
    let mut stripe = [None; CANDY_STRIPE_PERIOD];
    let mut index = 0;
    while index < BLOCK.len() {
        stripe[index] = Some(BLOCK[index]);
        index += 1;
    }
    stripe
};

/// Candy-cane blocks that scroll one column per tick, each row starting at a random phase.
#[derive(Clone, Debug)]
pub struct CandyCane<const W: usize, const H: usize> {
    offsets: [usize; H],
    countdown: Countdown,
}

impl<const W: usize, const H: usize> CandyCane<W, H> {
    /// Candy cane with the standard cycle of [`CANDY_CANE_TICKS`].
    #[must_use]
    pub const fn new() -> Self {
        Self::with_period(CANDY_CANE_TICKS)
    }

    /// Candy cane with a custom cycle length.
    #[must_use]
    pub const fn with_period(ticks: u32) -> Self {
        const { assert!(W > 0, "width must be positive") };
        Self {
            offsets: [0; H],
            countdown: Countdown::new(ticks),
        }
    }

    /// Per-row scroll offsets, each in `[0, W)`.
    #[must_use]
    pub const fn offsets(&self) -> &[usize; H] {
        &self.offsets
    }
}

impl<const W: usize, const H: usize> Default for CandyCane<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> Pattern<W, H> for CandyCane<W, H> {
    fn tick(&mut self, frame: &mut Frame2d<W, H>, rng: &mut Rng) -> bool {
        if self.countdown.is_cycle_start() {
            for offset in &mut self.offsets {
                *offset = rng.below_usize(W);
            }
        }

        frame.clear();
        for (row, offset) in frame.iter_mut().zip(self.offsets.iter_mut()) {
            let mut column = *offset;
            for stripe_index in 0..W {
                column = (column + 1) % W;
                if let Some(color) = CANDY_STRIPE[stripe_index % CANDY_STRIPE_PERIOD] {
                    row[column] = color;
                }
            }
            *offset = (*offset + 1) % W;
        }

        self.countdown.tick()
    }
}
