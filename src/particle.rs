//! Fixed-point sub-pixel coordinates for particles.
//!
//! Positions carry **4 fractional bits**: one unit of the underlying integer is 1/16 of a
//! pixel (a *sub-pixel*). A particle moving one sub-pixel per tick crosses a pixel every
//! 16 ticks, which gives slow, smooth drifts at a 50 Hz frame rate.
//!
//! Both types are 16 bits wide with 12 integer bits, so grids are limited to 2047
//! (signed) or 4095 (unsigned) pixels per axis. [`assert_fits`] checks this at compile time.

use fixed::types::{I12F4, U12F4};

/// Unsigned sub-pixel position: 12 integer bits, 4 fractional bits.
pub type SubPixel = U12F4;

/// Signed sub-pixel position or velocity: 12 integer bits (with sign), 4 fractional bits.
pub type SignedSubPixel = I12F4;

/// Fractional bits in [`SubPixel`] and [`SignedSubPixel`].
pub const FRAC_BITS: u32 = 4;

/// Sub-pixels per pixel.
pub const SUBPIXELS_PER_PIXEL: u32 = 1 << FRAC_BITS;

/// Panics (at compile time when used in a `const`) if `pixels` plus one pixel of headroom
/// does not fit in a [`SignedSubPixel`].
pub const fn assert_fits(pixels: usize) {
    assert!(
        pixels < (i16::MAX as usize >> FRAC_BITS),
        "axis too long for 12-bit sub-pixel coordinates"
    );
}

/// Unsigned position from a raw sub-pixel count.
#[must_use]
#[allow(clippy::cast_possible_truncation, reason = "callers stay below the asserted axis limit")]
pub const fn sub_pixel(sub_pixels: u32) -> SubPixel {
    SubPixel::from_bits(sub_pixels as u16)
}

/// Signed position or velocity from a raw sub-pixel count.
#[must_use]
#[allow(clippy::cast_possible_truncation, reason = "callers stay below the asserted axis limit")]
pub const fn signed_sub_pixel(sub_pixels: i32) -> SignedSubPixel {
    SignedSubPixel::from_bits(sub_pixels as i16)
}

/// Exclusive upper bound, in sub-pixels, of an axis `pixels` long.
#[must_use]
#[allow(clippy::cast_possible_truncation, reason = "axis lengths are asserted small")]
pub const fn axis_limit(pixels: usize) -> u32 {
    (pixels as u32) << FRAC_BITS
}

/// Whole-pixel index of a signed position, or `None` if it lies outside `[0, pixels)`.
#[must_use]
pub fn pixel_index(position: SignedSubPixel, pixels: usize) -> Option<usize> {
    let whole = usize::try_from(position.to_num::<i32>()).ok()?;
    (whole < pixels).then_some(whole)
}
