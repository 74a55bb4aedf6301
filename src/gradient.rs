//! Precomputed circular color ramps.
//!
//! A [`Gradient`] is built at compile time by linearly interpolating between a
//! small ordered set of color stops, with the last stop blending back into the first.
//! Patterns sample it by offset to get hues that cycle smoothly.

use core::ops::Deref;

use smart_leds::RGB8;

/// Red stop of [`RAINBOW_STOPS`].
pub const STOP_RED: RGB8 = RGB8::new(255, 0, 0);
/// Orange stop of [`RAINBOW_STOPS`]. Green is kept low so it reads as orange on LEDs.
pub const STOP_ORANGE: RGB8 = RGB8::new(255, 32, 0);
/// Yellow stop of [`RAINBOW_STOPS`].
pub const STOP_YELLOW: RGB8 = RGB8::new(255, 255, 0);
/// Green stop of [`RAINBOW_STOPS`].
pub const STOP_GREEN: RGB8 = RGB8::new(0, 255, 0);
/// Cyan stop of [`RAINBOW_STOPS`].
pub const STOP_CYAN: RGB8 = RGB8::new(0, 255, 255);
/// Blue stop of [`RAINBOW_STOPS`].
pub const STOP_BLUE: RGB8 = RGB8::new(0, 0, 255);
/// Magenta stop of [`RAINBOW_STOPS`].
pub const STOP_MAGENTA: RGB8 = RGB8::new(255, 0, 255);

/// Ordered stops of the rainbow ramp.
pub const RAINBOW_STOPS: [RGB8; 7] = [
    STOP_RED,
    STOP_ORANGE,
    STOP_YELLOW,
    STOP_GREEN,
    STOP_CYAN,
    STOP_BLUE,
    STOP_MAGENTA,
];

/// Number of entries in [`RAINBOW`]: 20 per stop.
pub const RAINBOW_LEN: usize = 140;

/// The gradient type shared by every pattern.
pub type Rainbow = Gradient<RAINBOW_LEN>;

/// Rainbow ramp through [`RAINBOW_STOPS`], looping from magenta back to red.
pub static RAINBOW: Rainbow = Gradient::from_stops(&RAINBOW_STOPS);

/// A fixed-size circular color ramp.
///
/// Derefs to `[RGB8; N]`. Use [`Gradient::get`] for wrapping lookups.
///
/// ```rust
/// use xmas_lights::gradient::{Gradient, STOP_BLUE, STOP_RED};
///
/// const RAMP: Gradient<4> = Gradient::from_stops(&[STOP_RED, STOP_BLUE]);
/// assert_eq!(RAMP[0], STOP_RED);
/// assert_eq!(RAMP[2], STOP_BLUE);
/// assert_eq!(RAMP.get(6), STOP_BLUE); // wraps
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gradient<const N: usize>([RGB8; N]);

impl<const N: usize> Gradient<N> {
    /// Number of entries.
    pub const LEN: usize = N;

    /// Interpolate `N / S` entries between each pair of consecutive stops.
    ///
    /// Entry `i` of the segment from stop `a` to stop `b` is `(a * (L - i) + b * i) / L`
    /// per channel, where `L = N / S`. The final segment runs from the last stop back to the first.
    #[must_use]
    pub const fn from_stops<const S: usize>(stops: &[RGB8; S]) -> Self {
        assert!(S > 0, "gradient needs at least one stop");
        assert!(N % S == 0, "gradient length must be a multiple of the stop count");
        let segment_len = N / S;
        assert!(segment_len > 0, "gradient must have at least one entry per stop");

        let mut table = [RGB8::new(0, 0, 0); N];
        let mut stop_index = 0;
        while stop_index < S {
            let start = stops[stop_index];
            let end = stops[(stop_index + 1) % S];
            let mut step = 0;
            while step < segment_len {
                table[stop_index * segment_len + step] = RGB8::new(
                    blend(start.r, end.r, step, segment_len),
                    blend(start.g, end.g, step, segment_len),
                    blend(start.b, end.b, step, segment_len),
                );
                step += 1;
            }
            stop_index += 1;
        }
        Self(table)
    }

    /// Color at `offset`, wrapping around the ramp.
    #[must_use]
    pub const fn get(&self, offset: usize) -> RGB8 {
        self.0[offset % N]
    }
}

impl<const N: usize> Deref for Gradient<N> {
    type Target = [RGB8; N];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "weighted average of two u8 values fits in u8"
)]
const fn blend(start: u8, end: u8, step: usize, segment_len: usize) -> u8 {
    ((start as usize * (segment_len - step) + end as usize * step) / segment_len) as u8
}
