//! Snowflakes drifting sideways across the rows.
//!
//! [`Snow`] keeps each flake on a fixed row. [`LayeredSnow`] gives flakes a fractional row
//! that slowly sinks, and shades them by which half of the display they are in so the
//! lower flakes read as nearer.

use smart_leds::RGB8;

use super::{Countdown, Pattern};
use crate::led2d::Frame2d;
use crate::particle::{SubPixel, assert_fits, axis_limit, sub_pixel};
use crate::rng::Rng;

/// Default number of flakes.
pub const SNOW_PARTICLES: usize = 50;

/// Ticks per snow cycle.
pub const SNOW_TICKS: u32 = 1000;

/// White and three shades of ice blue.
pub const SNOW_SHADES: [RGB8; 4] = [
    RGB8::new(255, 255, 255),
    RGB8::new(190, 240, 255),
    RGB8::new(100, 230, 255),
    RGB8::new(50, 220, 255),
];

/// Horizontal speed of flake `index`, in sub-pixels per tick. Odd flakes are faster.
#[allow(clippy::cast_possible_truncation, reason = "index & 1 is 0 or 1")]
const fn flake_speed(index: usize) -> SubPixel {
    sub_pixel(1 + (index & 1) as u32)
}

/// Shade for flake `index` given the cycle's seed: varied per flake, fixed for the cycle.
const fn shade_index(shade_seed: u8, index: usize) -> usize {
    (shade_seed as usize ^ index) & 3
}

/// A flake on a fixed row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Flake {
    /// Horizontal position.
    pub x: SubPixel,
    /// Row index.
    pub row: u16,
}

impl Flake {
    const PARKED: Self = Self {
        x: SubPixel::ZERO,
        row: 0,
    };
}

/// Snow falling sideways on fixed rows.
///
/// Each tick clears the frame, draws every flake as one pixel, then moves it right by
/// one or two sub-pixels. A flake that reaches the right edge comes back at column 0 on a
/// new random row.
#[derive(Clone, Debug)]
pub struct Snow<const W: usize, const H: usize, const P: usize = SNOW_PARTICLES> {
    flakes: [Flake; P],
    shade_seed: u8,
    countdown: Countdown,
}

impl<const W: usize, const H: usize, const P: usize> Snow<W, H, P> {
    /// Snow with the standard cycle of [`SNOW_TICKS`].
    #[must_use]
    pub const fn new() -> Self {
        Self::with_period(SNOW_TICKS)
    }

    /// Snow with a custom cycle length.
    #[must_use]
    pub const fn with_period(ticks: u32) -> Self {
        const { assert_fits(W) };
        const { assert!(H > 0 && H <= u16::MAX as usize, "H must fit in u16") };
        Self {
            flakes: [Flake::PARKED; P],
            shade_seed: 0,
            countdown: Countdown::new(ticks),
        }
    }

    /// The flakes, in drawing order.
    #[must_use]
    pub const fn flakes(&self) -> &[Flake; P] {
        &self.flakes
    }

    /// Mutable access to the flakes.
    pub const fn flakes_mut(&mut self) -> &mut [Flake; P] {
        &mut self.flakes
    }

    /// The cycle countdown.
    #[must_use]
    pub const fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    fn reseed(&mut self, rng: &mut Rng) {
        #[allow(clippy::cast_possible_truncation, reason = "masked to two bits")]
        let shade_seed = (rng.next_u32() & 3) as u8;
        self.shade_seed = shade_seed;
        for flake in &mut self.flakes {
            flake.x = sub_pixel(rng.below(axis_limit(W)));
            flake.row = random_row::<H>(rng);
        }
    }
}

impl<const W: usize, const H: usize, const P: usize> Default for Snow<W, H, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize, const P: usize> Pattern<W, H> for Snow<W, H, P> {
    fn tick(&mut self, frame: &mut Frame2d<W, H>, rng: &mut Rng) -> bool {
        if self.countdown.is_cycle_start() {
            self.reseed(rng);
        }

        frame.clear();
        let limit = sub_pixel(axis_limit(W));
        for (index, flake) in self.flakes.iter_mut().enumerate() {
            let color = SNOW_SHADES[shade_index(self.shade_seed, index)];
            if let Some(pixel) = frame.cell_mut(flake.x.to_num::<usize>(), usize::from(flake.row))
            {
                *pixel = color;
            }

            flake.x += flake_speed(index);
            if flake.x >= limit {
                flake.x = SubPixel::ZERO;
                flake.row = random_row::<H>(rng);
            }
        }

        self.countdown.tick()
    }
}

/// A flake with a fractional row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayeredFlake {
    /// Horizontal position.
    pub x: SubPixel,
    /// Vertical position.
    pub y: SubPixel,
}

impl LayeredFlake {
    const PARKED: Self = Self {
        x: SubPixel::ZERO,
        y: SubPixel::ZERO,
    };
}

/// Snow with sub-row positions and depth shading.
///
/// Flakes drift right like [`Snow`] and also sink one sub-pixel per tick, wrapping from
/// the bottom back to the top. Flakes in the upper half use the two brightest shades,
/// flakes in the lower half the two deeper blues.
#[derive(Clone, Debug)]
pub struct LayeredSnow<const W: usize, const H: usize, const P: usize = SNOW_PARTICLES> {
    flakes: [LayeredFlake; P],
    shade_seed: u8,
    countdown: Countdown,
}

impl<const W: usize, const H: usize, const P: usize> LayeredSnow<W, H, P> {
    /// Layered snow with the standard cycle of [`SNOW_TICKS`].
    #[must_use]
    pub const fn new() -> Self {
        Self::with_period(SNOW_TICKS)
    }

    /// Layered snow with a custom cycle length.
    #[must_use]
    pub const fn with_period(ticks: u32) -> Self {
        const { assert_fits(W) };
        const { assert_fits(H) };
        Self {
            flakes: [LayeredFlake::PARKED; P],
            shade_seed: 0,
            countdown: Countdown::new(ticks),
        }
    }

    /// The flakes, in drawing order.
    #[must_use]
    pub const fn flakes(&self) -> &[LayeredFlake; P] {
        &self.flakes
    }

    fn reseed(&mut self, rng: &mut Rng) {
        #[allow(clippy::cast_possible_truncation, reason = "masked to two bits")]
        let shade_seed = (rng.next_u32() & 3) as u8;
        self.shade_seed = shade_seed;
        for flake in &mut self.flakes {
            flake.x = sub_pixel(rng.below(axis_limit(W)));
            flake.y = sub_pixel(rng.below(axis_limit(H)));
        }
    }
}

impl<const W: usize, const H: usize, const P: usize> Default for LayeredSnow<W, H, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize, const P: usize> Pattern<W, H> for LayeredSnow<W, H, P> {
    fn tick(&mut self, frame: &mut Frame2d<W, H>, rng: &mut Rng) -> bool {
        if self.countdown.is_cycle_start() {
            self.reseed(rng);
        }

        frame.clear();
        let x_limit = sub_pixel(axis_limit(W));
        let y_limit = sub_pixel(axis_limit(H));
        for (index, flake) in self.flakes.iter_mut().enumerate() {
            let row = flake.y.to_num::<usize>();
            let zone = if row * 2 < H { 0 } else { 2 };
            let color = SNOW_SHADES[zone + (shade_index(self.shade_seed, index) & 1)];
            if let Some(pixel) = frame.cell_mut(flake.x.to_num::<usize>(), row) {
                *pixel = color;
            }

            flake.x += flake_speed(index);
            flake.y += SubPixel::DELTA;
            if flake.y >= y_limit {
                flake.y = SubPixel::ZERO;
            }
            if flake.x >= x_limit {
                flake.x = SubPixel::ZERO;
                flake.y = sub_pixel(rng.below(axis_limit(H)));
            }
        }

        self.countdown.tick()
    }
}

#[allow(clippy::cast_possible_truncation, reason = "H is asserted to fit in u16")]
fn random_row<const H: usize>(rng: &mut Rng) -> u16 {
    rng.below_usize(H) as u16
}
