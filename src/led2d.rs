//! The shared framebuffer and the wiring that maps it onto output lines.
//!
//! Patterns draw into a [`Frame2d`] in `(x, y)` space with `(0, 0)` at the top-left.
//! The [`wiring`] module describes which output line carries which rows, and in what
//! order, so the encoder can walk the frame in wire order.
//!
//! # Example
//!
//! ```rust
//! use xmas_lights::led2d::Frame2d;
//! use smart_leds::colors;
//!
//! let mut frame = Frame2d::<8, 2>::new();
//! frame[(3, 1)] = colors::RED;
//! frame.set_checked(9, 0, colors::BLUE); // off the grid: skipped
//! frame.fade(3, 2);                      // every channel * 3 >> 2
//! assert_eq!(frame[(3, 1)].r, 191);
//! ```

use core::ops::{Deref, DerefMut, Index, IndexMut};

use smart_leds::RGB8;

pub mod wiring;

pub use wiring::{LineGroup, Scan, Wiring};

/// Black, the cleared pixel value.
pub const BLACK: RGB8 = RGB8::new(0, 0, 0);

/// Fixed-size 2D framebuffer, stored row-major as `[[RGB8; W]; H]`.
///
/// Index with `frame[(x, y)]` or go through the row arrays with `frame[y][x]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame2d<const W: usize, const H: usize>(pub [[RGB8; W]; H]);

impl<const W: usize, const H: usize> Frame2d<W, H> {
    /// Frame2d width in pixels (columns).
    pub const WIDTH: usize = W;
    /// Frame2d height in pixels (rows).
    pub const HEIGHT: usize = H;
    /// Total number of pixels (WIDTH × HEIGHT).
    pub const LEN: usize = W * H;

    /// Create a new blank (all black) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([[BLACK; W]; H])
    }

    /// Create a frame filled with a single color.
    #[must_use]
    pub const fn filled(color: RGB8) -> Self {
        Self([[color; W]; H])
    }

    /// Set every pixel to black.
    pub fn clear(&mut self) {
        self.0 = [[BLACK; W]; H];
    }

    /// Scale every channel of every pixel by `numerator >> shift`.
    ///
    /// `fade(3, 2)` is the ×0.75 decay the trail patterns use.
    pub fn fade(&mut self, numerator: u16, shift: u32) {
        for pixel in self.0.iter_mut().flatten() {
            *pixel = scale(*pixel, numerator, shift);
        }
    }

    /// Write `color` at `(x, y)` if it is inside the grid; otherwise do nothing.
    ///
    /// Returns whether the pixel was written.
    pub fn set_checked(&mut self, x: i32, y: i32, color: RGB8) -> bool {
        match self.pixel_mut(x, y) {
            Some(pixel) => {
                *pixel = color;
                true
            }
            None => false,
        }
    }

    /// Mutable access to `(x, y)` if it is inside the grid.
    pub fn pixel_mut(&mut self, x: i32, y: i32) -> Option<&mut RGB8> {
        let x_index = usize::try_from(x).ok()?;
        let y_index = usize::try_from(y).ok()?;
        self.cell_mut(x_index, y_index)
    }

    /// Mutable access to `(x_index, y_index)` if it is inside the grid.
    pub fn cell_mut(&mut self, x_index: usize, y_index: usize) -> Option<&mut RGB8> {
        self.0.get_mut(y_index)?.get_mut(x_index)
    }

    /// Iterate over every pixel in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = &RGB8> {
        self.0.iter().flatten()
    }
}

/// Scale each channel by `numerator >> shift`, saturating at 255.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    reason = "value is clamped to u8::MAX before the cast"
)]
pub fn scale(color: RGB8, numerator: u16, shift: u32) -> RGB8 {
    let channel = |value: u8| -> u8 {
        let scaled = (u32::from(value) * u32::from(numerator)) >> shift;
        scaled.min(u32::from(u8::MAX)) as u8
    };
    RGB8::new(channel(color.r), channel(color.g), channel(color.b))
}

/// Per-channel maximum of two colors.
#[must_use]
pub fn max_blend(first: RGB8, second: RGB8) -> RGB8 {
    RGB8::new(
        first.r.max(second.r),
        first.g.max(second.g),
        first.b.max(second.b),
    )
}

impl<const W: usize, const H: usize> Deref for Frame2d<W, H> {
    type Target = [[RGB8; W]; H];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const W: usize, const H: usize> DerefMut for Frame2d<W, H> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const W: usize, const H: usize> Index<(usize, usize)> for Frame2d<W, H> {
    type Output = RGB8;

    fn index(&self, (x_index, y_index): (usize, usize)) -> &Self::Output {
        assert!(x_index < W, "x_index must be within width");
        assert!(y_index < H, "y_index must be within height");
        &self.0[y_index][x_index]
    }
}

impl<const W: usize, const H: usize> IndexMut<(usize, usize)> for Frame2d<W, H> {
    fn index_mut(&mut self, (x_index, y_index): (usize, usize)) -> &mut Self::Output {
        assert!(x_index < W, "x_index must be within width");
        assert!(y_index < H, "y_index must be within height");
        &mut self.0[y_index][x_index]
    }
}

impl<const W: usize, const H: usize> From<[[RGB8; W]; H]> for Frame2d<W, H> {
    fn from(array: [[RGB8; W]; H]) -> Self {
        Self(array)
    }
}

impl<const W: usize, const H: usize> From<Frame2d<W, H>> for [[RGB8; W]; H] {
    fn from(frame: Frame2d<W, H>) -> Self {
        frame.0
    }
}

impl<const W: usize, const H: usize> Default for Frame2d<W, H> {
    fn default() -> Self {
        Self::new()
    }
}
