//! Expanding rainbow rings, like drops landing on water.
//!
//! Distances are measured in sub-pixels from each pixel's center. Rows on the panels are
//! spaced further apart than columns, so vertical distance is stretched by
//! [`ROW_PITCH_NUM`] over [`ROW_PITCH_DEN`] to keep the rings round.

use itertools::iproduct;

use super::rainbow_drops::{FADE_NUMERATOR, FADE_SHIFT};
use super::{Countdown, Pattern};
use crate::gradient::{RAINBOW, Rainbow};
use crate::led2d::{Frame2d, max_blend, scale};
use crate::particle::{SUBPIXELS_PER_PIXEL, assert_fits, axis_limit};
use crate::rng::Rng;

/// Default number of rings.
pub const RIPPLES: usize = 4;

/// Ticks per ripples cycle.
pub const RIPPLES_TICKS: u32 = 1000;

/// Radius growth per tick, in sub-pixels.
pub const RIPPLE_GROWTH: i32 = 4;

/// Half-thickness of a ring, in sub-pixels.
pub const BAND: i32 = 16;

/// Row pitch over column pitch, numerator.
pub const ROW_PITCH_NUM: i32 = 3;

/// Row pitch over column pitch, denominator.
pub const ROW_PITCH_DEN: i32 = 2;

/// Squared distance is shifted right by this much to pick the gradient entry.
pub const RIPPLE_HUE_SHIFT: u32 = 8;

#[allow(clippy::cast_possible_wrap, reason = "16 fits in i32")]
const PIXEL: i32 = SUBPIXELS_PER_PIXEL as i32;
const HALF_PIXEL: i32 = PIXEL / 2;

/// One expanding ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ring {
    /// Center column, in sub-pixels.
    pub center_x: i32,
    /// Center row, in sub-pixels.
    pub center_y: i32,
    /// Radius, in sub-pixels.
    pub radius: i32,
    /// Gradient offset for the ring's innermost color.
    pub hue: usize,
}

impl Ring {
    const UNSPAWNED: Self = Self {
        center_x: 0,
        center_y: 0,
        radius: 0,
        hue: 0,
    };

    /// Squared-distance window `[inner, outer)` for a ring edge `half_width` sub-pixels thick.
    #[must_use]
    pub const fn window(&self, half_width: i32) -> (i64, i64) {
        let inner = if self.radius > half_width {
            (self.radius - half_width) as i64
        } else {
            0
        };
        let outer = (self.radius + half_width) as i64;
        (inner * inner, outer * outer)
    }

    /// Squared distance, in sub-pixels, from the ring's center to the center of pixel
    /// (`column`, `row`), with the row distance stretched by the row pitch.
    #[must_use]
    pub const fn distance_squared(&self, column: usize, row: usize) -> i64 {
        let dx = (pixel_center(column) - self.center_x) as i64;
        let dy = ((pixel_center(row) - self.center_y) * ROW_PITCH_NUM / ROW_PITCH_DEN) as i64;
        dx * dx + dy * dy
    }
}

/// Rainbow rings growing from random centers.
///
/// Each tick fades the frame by ×3/4, then max-blends every ring's band of pixels on
/// top. Pixels near the edges of a band are drawn at half brightness. A ring that no
/// longer touches any pixel starts over at a new center.
#[derive(Clone, Debug)]
pub struct Ripples<const W: usize, const H: usize, const D: usize = RIPPLES> {
    rings: [Ring; D],
    gradient: &'static Rainbow,
    countdown: Countdown,
}

impl<const W: usize, const H: usize, const D: usize> Ripples<W, H, D> {
    /// Ripples over [`RAINBOW`] with the standard cycle of [`RIPPLES_TICKS`].
    #[must_use]
    pub const fn new() -> Self {
        Self::with_gradient(&RAINBOW, RIPPLES_TICKS)
    }

    /// Ripples over a custom gradient and cycle length.
    #[must_use]
    pub const fn with_gradient(gradient: &'static Rainbow, ticks: u32) -> Self {
        const { assert_fits(W) };
        const { assert_fits(H) };
        Self {
            rings: [Ring::UNSPAWNED; D],
            gradient,
            countdown: Countdown::new(ticks),
        }
    }

    /// The rings, in drawing order.
    #[must_use]
    pub const fn rings(&self) -> &[Ring; D] {
        &self.rings
    }

    /// Mutable access to the rings, for placing one by hand.
    pub const fn rings_mut(&mut self) -> &mut [Ring; D] {
        &mut self.rings
    }

    #[allow(clippy::cast_possible_wrap, reason = "axis limits are asserted small")]
    fn spawn(rng: &mut Rng) -> Ring {
        Ring {
            center_x: rng.below(axis_limit(W)) as i32,
            center_y: rng.below(axis_limit(H)) as i32,
            radius: 0,
            hue: rng.below_usize(Rainbow::LEN),
        }
    }

    /// Draw `ring` into `frame`. Returns how many pixels it lit.
    fn draw_ring(&self, ring: &Ring, frame: &mut Frame2d<W, H>) -> usize {
        let (band_inner, band_outer) = ring.window(BAND);
        let (core_inner, core_outer) = ring.window(BAND / 2);

        let reach_x = ring.radius + BAND;
        let reach_y = reach_x * ROW_PITCH_DEN / ROW_PITCH_NUM + 1;
        let columns = pixel_span(ring.center_x - reach_x, ring.center_x + reach_x, W);
        let rows = pixel_span(ring.center_y - reach_y, ring.center_y + reach_y, H);

        let mut lit = 0;
        for (row, column) in iproduct!(rows, columns) {
            let distance_squared = ring.distance_squared(column, row);
            if distance_squared < band_inner || distance_squared >= band_outer {
                continue;
            }

            #[allow(
                clippy::cast_sign_loss,
                clippy::cast_possible_truncation,
                reason = "a sum of squares is non-negative and the shift keeps it small"
            )]
            let hue_step = (distance_squared >> RIPPLE_HUE_SHIFT) as usize;
            let mut color = self.gradient.get(ring.hue + hue_step);
            if distance_squared < core_inner || distance_squared >= core_outer {
                color = scale(color, 1, 1);
            }
            let pixel = &mut frame[(column, row)];
            *pixel = max_blend(*pixel, color);
            lit += 1;
        }
        lit
    }
}

impl<const W: usize, const H: usize, const D: usize> Default for Ripples<W, H, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize, const D: usize> Pattern<W, H> for Ripples<W, H, D> {
    fn tick(&mut self, frame: &mut Frame2d<W, H>, rng: &mut Rng) -> bool {
        if self.countdown.is_cycle_start() {
            frame.clear();
            for ring in &mut self.rings {
                *ring = Self::spawn(rng);
            }
        } else {
            frame.fade(FADE_NUMERATOR, FADE_SHIFT);
        }

        for index in 0..D {
            let ring = self.rings[index];
            let lit = self.draw_ring(&ring, frame);
            self.rings[index] = if lit == 0 {
                Self::spawn(rng)
            } else {
                Ring {
                    radius: ring.radius + RIPPLE_GROWTH,
                    ..ring
                }
            };
        }

        self.countdown.tick()
    }
}

#[allow(clippy::cast_possible_wrap, reason = "pixel indices are asserted small")]
const fn pixel_center(index: usize) -> i32 {
    index as i32 * PIXEL + HALF_PIXEL
}

/// Pixel indices in `[0, pixels)` whose centers may lie within `[low, high]` sub-pixels.
#[allow(clippy::cast_sign_loss, reason = "clamped to zero before the cast")]
fn pixel_span(low: i32, high: i32, pixels: usize) -> core::ops::Range<usize> {
    let first = (low.max(0) / PIXEL) as usize;
    let last = ((high.max(-1) + 1) as usize).div_ceil(PIXEL as usize);
    first.min(pixels)..last.min(pixels)
}
