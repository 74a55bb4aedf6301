//! A message scrolling right to left, colored by screen position.

use heapless::String;

use super::font::Font;
use super::{Countdown, Pattern};
use crate::gradient::{RAINBOW, Rainbow};
use crate::led2d::Frame2d;
use crate::rng::Rng;

/// Default text capacity, in bytes.
pub const TEXT_CAPACITY: usize = 32;

/// Ticks per one-column scroll step.
pub const TEXT_SUBTICKS: u32 = 3;

/// Blank columns after every glyph.
pub const GLYPH_SPACING: usize = 1;

/// Scrolling text.
///
/// Glyphs are drawn left to right starting `offset` columns left of the display edge and
/// centered vertically. Every lit pixel takes the gradient color of its screen column, so
/// the rainbow stays put while the letters move through it. The offset advances one
/// column every [`TEXT_SUBTICKS`] ticks; the cycle completes once the text has scrolled
/// far enough that its end has passed the middle of the display.
#[derive(Clone)]
pub struct TextScroller<const W: usize, const H: usize, const CAP: usize = TEXT_CAPACITY> {
    text: String<CAP>,
    font: &'static dyn Font,
    gradient: &'static Rainbow,
    offset: usize,
    subticks: Countdown,
}

impl<const W: usize, const H: usize, const CAP: usize> TextScroller<W, H, CAP> {
    /// An empty scroller drawing with `font` over [`RAINBOW`].
    #[must_use]
    pub const fn new(font: &'static dyn Font) -> Self {
        Self::with_gradient(font, &RAINBOW)
    }

    /// An empty scroller drawing with `font` over a custom gradient.
    #[must_use]
    pub const fn with_gradient(font: &'static dyn Font, gradient: &'static Rainbow) -> Self {
        Self {
            text: String::new(),
            font,
            gradient,
            offset: 0,
            subticks: Countdown::new(TEXT_SUBTICKS),
        }
    }

    /// Replace the text and scroll back to the start.
    ///
    /// Text longer than `CAP` bytes is cut at the last whole character that fits.
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        for ch in text.chars() {
            if self.text.push(ch).is_err() {
                break;
            }
        }
        self.restart();
    }

    /// The current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Columns the display is scrolled past the start of the text.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Scroll back to the start.
    pub const fn restart(&mut self) {
        self.offset = 0;
        self.subticks.restart();
    }

    /// Width of the whole text, spacing included.
    #[must_use]
    pub fn total_width(&self) -> usize {
        self.text
            .chars()
            .map(|ch| self.font.glyph(ch).width() + GLYPH_SPACING)
            .sum()
    }

    #[allow(
        clippy::cast_possible_wrap,
        reason = "widths and offsets are bounded by the text capacity and display size"
    )]
    fn draw(&self, frame: &mut Frame2d<W, H>) {
        let height = self.font.height();
        let top = (H as i32 - height as i32) / 2;
        let mut left = -(self.offset as i32);

        for ch in self.text.chars() {
            if left >= W as i32 {
                break;
            }
            let glyph = self.font.glyph(ch);
            for glyph_x in 0..glyph.width() {
                let Ok(column) = usize::try_from(left + glyph_x as i32) else {
                    continue;
                };
                if column >= W {
                    break;
                }
                let color = self.gradient.get(column);
                for glyph_y in (0..height).filter(|&glyph_y| glyph.is_lit(glyph_x, glyph_y)) {
                    frame.set_checked(column as i32, top + glyph_y as i32, color);
                }
            }
            left += (glyph.width() + GLYPH_SPACING) as i32;
        }
    }
}

impl<const W: usize, const H: usize, const CAP: usize> core::fmt::Debug
    for TextScroller<W, H, CAP>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TextScroller")
            .field("text", &self.text)
            .field("offset", &self.offset)
            .field("subticks", &self.subticks)
            .finish_non_exhaustive()
    }
}

impl<const W: usize, const H: usize, const CAP: usize> Pattern<W, H> for TextScroller<W, H, CAP> {
    fn tick(&mut self, frame: &mut Frame2d<W, H>, _rng: &mut Rng) -> bool {
        frame.clear();
        self.draw(frame);

        if !self.subticks.tick() {
            return false;
        }
        self.offset += 1;
        #[allow(clippy::cast_possible_wrap, reason = "text widths are small")]
        let end = self.total_width() as i32 - (W / 2) as i32;
        #[allow(clippy::cast_possible_wrap, reason = "offset never exceeds the text width")]
        let scrolled_past = self.offset as i32 >= end;
        if scrolled_past {
            self.offset = 0;
        }
        scrolled_past
    }
}
