//! Glyph lookup for the text scroller.
//!
//! A [`Glyph`] is a run of column bitmasks: bit `r` of a column is set when row `r` of
//! that column is lit. Glyphs are variable width, up to [`MAX_GLYPH_WIDTH`] columns and
//! [`MAX_GLYPH_HEIGHT`] rows.
//!
//! [`MonoGlyphFont`] builds glyphs from any `embedded-graphics` mono font by drawing the
//! character into a [`Glyph`] and trimming the blank columns on either side.

use core::convert::Infallible;

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, Drawable, OriginDimensions, Pixel, Point, Size};
use embedded_graphics::text::{Baseline, Text};

/// Widest glyph, in columns.
pub const MAX_GLYPH_WIDTH: usize = 16;

/// Tallest glyph, in rows (one bit per row of a `u16` column).
pub const MAX_GLYPH_HEIGHT: usize = 16;

/// Source of glyph bitmaps.
pub trait Font {
    /// Rows in every glyph.
    fn height(&self) -> usize;

    /// Bitmap for `ch`. Characters the font does not cover come back as a space.
    fn glyph(&self, ch: char) -> Glyph;
}

/// A variable-width glyph stored as column bitmasks.
///
/// ```rust
/// use xmas_lights::pattern::Glyph;
///
/// let bar = Glyph::from_columns(&[0b1111, 0b1001]);
/// assert_eq!(bar.width(), 2);
/// assert!(bar.is_lit(1, 3));
/// assert!(!bar.is_lit(1, 1));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    width: usize,
    columns: [u16; MAX_GLYPH_WIDTH],
}

impl Glyph {
    /// A blank glyph `width` columns wide.
    #[must_use]
    pub const fn blank(width: usize) -> Self {
        assert!(width <= MAX_GLYPH_WIDTH, "glyph too wide");
        Self {
            width,
            columns: [0; MAX_GLYPH_WIDTH],
        }
    }

    /// A glyph from its column bitmasks, leftmost first.
    #[must_use]
    pub const fn from_columns(columns: &[u16]) -> Self {
        let mut glyph = Self::blank(columns.len());
        let mut index = 0;
        while index < columns.len() {
            glyph.columns[index] = columns[index];
            index += 1;
        }
        glyph
    }

    /// Width in columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Bitmask of column `x`, or 0 past the glyph's width.
    #[must_use]
    pub const fn column(&self, x: usize) -> u16 {
        if x < self.width { self.columns[x] } else { 0 }
    }

    /// The used columns.
    #[must_use]
    pub fn columns(&self) -> &[u16] {
        &self.columns[..self.width]
    }

    /// Whether `(x, y)` is lit.
    #[must_use]
    pub const fn is_lit(&self, x: usize, y: usize) -> bool {
        y < MAX_GLYPH_HEIGHT && self.column(x) & (1 << y) != 0
    }

    /// Drop blank columns on both sides. A fully blank glyph becomes `blank_width` wide.
    #[must_use]
    pub fn trimmed(&self, blank_width: usize) -> Self {
        let used = self.columns();
        let Some(first) = used.iter().position(|&column| column != 0) else {
            return Self::blank(blank_width.min(MAX_GLYPH_WIDTH));
        };
        let last = used.iter().rposition(|&column| column != 0).unwrap_or(first);
        Self::from_columns(&used[first..=last])
    }
}

impl OriginDimensions for Glyph {
    #[allow(clippy::cast_possible_truncation, reason = "glyph bounds are 16")]
    fn size(&self) -> Size {
        Size::new(MAX_GLYPH_WIDTH as u32, MAX_GLYPH_HEIGHT as u32)
    }
}

// Drawing into a glyph grows its width to cover every lit column.
impl DrawTarget for Glyph {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            if x >= MAX_GLYPH_WIDTH || y >= MAX_GLYPH_HEIGHT {
                continue;
            }
            match color {
                BinaryColor::On => self.columns[x] |= 1 << y,
                BinaryColor::Off => self.columns[x] &= !(1 << y),
            }
            self.width = self.width.max(x + 1);
        }
        Ok(())
    }
}

/// [`Font`] over an `embedded-graphics` mono font, with blank side columns trimmed.
///
/// ```rust
/// use embedded_graphics::mono_font::ascii::FONT_5X8;
/// use xmas_lights::pattern::{Font, MonoGlyphFont};
///
/// let font = MonoGlyphFont::new(&FONT_5X8);
/// assert_eq!(font.height(), 8);
/// assert!(font.glyph('i').width() < font.glyph('W').width());
/// assert_eq!(font.glyph(' ').width(), 2);
/// ```
#[derive(Clone, Copy)]
pub struct MonoGlyphFont {
    font: &'static MonoFont<'static>,
}

impl MonoGlyphFont {
    /// Wrap a mono font. Its cell must fit in a [`Glyph`].
    #[must_use]
    pub const fn new(font: &'static MonoFont<'static>) -> Self {
        assert!(
            font.character_size.width as usize <= MAX_GLYPH_WIDTH,
            "font cell too wide"
        );
        assert!(
            font.character_size.height as usize <= MAX_GLYPH_HEIGHT,
            "font cell too tall"
        );
        Self { font }
    }

    /// Width of a space: half a cell.
    #[must_use]
    pub const fn space_width(&self) -> usize {
        self.font.character_size.width as usize / 2
    }
}

impl core::fmt::Debug for MonoGlyphFont {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MonoGlyphFont")
            .field("character_size", &self.font.character_size)
            .finish()
    }
}

impl Font for MonoGlyphFont {
    fn height(&self) -> usize {
        self.font.character_size.height as usize
    }

    fn glyph(&self, ch: char) -> Glyph {
        let ch = if ch.is_ascii_graphic() { ch } else { ' ' };
        let mut buffer = [0u8; 4];
        let text = ch.encode_utf8(&mut buffer);
        let style = MonoTextStyle::new(self.font, BinaryColor::On);

        let mut raster = Glyph::blank(0);
        let Ok(_) = Text::with_baseline(text, Point::zero(), style, Baseline::Top).draw(&mut raster);
        raster.trimmed(self.space_width())
    }
}
