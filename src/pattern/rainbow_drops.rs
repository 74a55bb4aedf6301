//! Colored droplets sliding along the rows and leaving fading trails.

use super::{Countdown, Pattern};
use crate::gradient::{RAINBOW, Rainbow};
use crate::led2d::Frame2d;
use crate::particle::{SignedSubPixel, assert_fits, axis_limit, pixel_index, signed_sub_pixel};
use crate::rng::Rng;

/// Default number of drops.
pub const RAINBOW_DROPS: usize = 6;

/// Ticks per rainbow-drops cycle.
pub const RAINBOW_DROPS_TICKS: u32 = 1000;

/// Slowest drop speed, in sub-pixels per tick. A random `0..=3` is added on spawn.
pub const MIN_DROP_SPEED: i32 = 3;

/// Trail decay per tick: every channel is multiplied by `3 >> 2`.
pub(crate) const FADE_NUMERATOR: u16 = 3;
pub(crate) const FADE_SHIFT: u32 = 2;

/// One droplet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Droplet {
    /// Horizontal position. Outside `[0, W)` means the drop has left the grid.
    pub x: SignedSubPixel,
    /// Signed speed in sub-pixels per tick.
    pub velocity: SignedSubPixel,
    /// Row index.
    pub row: usize,
    /// Current position in the gradient.
    pub offset: usize,
}

impl Droplet {
    // Left of the grid, so the first tick respawns it.
    const OFF_GRID: Self = Self {
        x: signed_sub_pixel(-1),
        velocity: SignedSubPixel::ZERO,
        row: 0,
        offset: 0,
    };
}

/// Droplets that travel left or right, cycling through the rainbow as they go.
///
/// The frame is not cleared between ticks; it fades by ×3/4 so each drop drags a tail.
/// A drop that runs off either end respawns at a random spot with a random speed,
/// direction, and hue.
#[derive(Clone, Debug)]
pub struct RainbowDrops<const W: usize, const H: usize, const D: usize = RAINBOW_DROPS> {
    drops: [Droplet; D],
    gradient: &'static Rainbow,
    countdown: Countdown,
}

impl<const W: usize, const H: usize, const D: usize> RainbowDrops<W, H, D> {
    /// Drops over [`RAINBOW`] with the standard cycle of [`RAINBOW_DROPS_TICKS`].
    #[must_use]
    pub const fn new() -> Self {
        Self::with_gradient(&RAINBOW, RAINBOW_DROPS_TICKS)
    }

    /// Drops over a custom gradient and cycle length.
    #[must_use]
    pub const fn with_gradient(gradient: &'static Rainbow, ticks: u32) -> Self {
        const { assert_fits(W) };
        Self {
            drops: [Droplet::OFF_GRID; D],
            gradient,
            countdown: Countdown::new(ticks),
        }
    }

    /// The drops, in drawing order.
    #[must_use]
    pub const fn drops(&self) -> &[Droplet; D] {
        &self.drops
    }

    /// Mutable access to the drops.
    pub const fn drops_mut(&mut self) -> &mut [Droplet; D] {
        &mut self.drops
    }

    fn spawn(rng: &mut Rng) -> Droplet {
        #[allow(clippy::cast_possible_wrap, reason = "below() bounds keep these small")]
        let x = signed_sub_pixel(rng.below(axis_limit(W)) as i32);
        let row = rng.below_usize(H);
        #[allow(clippy::cast_possible_wrap, reason = "masked to two bits")]
        let speed = MIN_DROP_SPEED + (rng.next_u32() & 3) as i32;
        let velocity = if rng.coin() { -speed } else { speed };
        let offset = rng.below_usize(Rainbow::LEN);
        Droplet {
            x,
            velocity: signed_sub_pixel(velocity),
            row,
            offset,
        }
    }
}

impl<const W: usize, const H: usize, const D: usize> Default for RainbowDrops<W, H, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize, const D: usize> Pattern<W, H> for RainbowDrops<W, H, D> {
    fn tick(&mut self, frame: &mut Frame2d<W, H>, rng: &mut Rng) -> bool {
        if self.countdown.is_cycle_start() {
            frame.clear();
            for droplet in &mut self.drops {
                *droplet = Self::spawn(rng);
            }
        } else {
            frame.fade(FADE_NUMERATOR, FADE_SHIFT);
        }

        for droplet in &mut self.drops {
            if pixel_index(droplet.x, W).is_none() {
                *droplet = Self::spawn(rng);
            }
            let column = pixel_index(droplet.x, W);
            if let Some(pixel) = column.and_then(|column| frame.cell_mut(column, droplet.row)) {
                *pixel = self.gradient.get(droplet.offset);
            }
            droplet.offset = (droplet.offset + 1) % self.gradient.len();
            droplet.x += droplet.velocity;
        }

        self.countdown.tick()
    }
}
