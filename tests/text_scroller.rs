#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Host-level tests for the text scroller and glyph fonts.

use embedded_graphics::mono_font::ascii::FONT_5X8;
use xmas_lights::gradient::RAINBOW;
use xmas_lights::led2d::{BLACK, Frame2d};
use xmas_lights::pattern::text_scroller::TEXT_SUBTICKS;
use xmas_lights::pattern::{Font, Glyph, MonoGlyphFont, Pattern, TextScroller};
use xmas_lights::rng::Rng;

/// Five rows tall: `h` is 4 columns wide, `i` is 2, anything else is a 1-column bar.
struct StubFont;

impl Font for StubFont {
    fn height(&self) -> usize {
        5
    }

    fn glyph(&self, ch: char) -> Glyph {
        match ch {
            'h' => Glyph::from_columns(&[0b11111, 0b00100, 0b00100, 0b11111]),
            'i' => Glyph::from_columns(&[0b11101, 0b00000]),
            ' ' => Glyph::blank(2),
            _ => Glyph::from_columns(&[0b11111]),
        }
    }
}

static STUB: StubFont = StubFont;

fn lit_columns<const W: usize, const H: usize>(frame: &Frame2d<W, H>) -> Vec<usize> {
    (0..W)
        .filter(|&x_index| (0..H).any(|y_index| frame[(x_index, y_index)] != BLACK))
        .collect()
}

#[test]
fn short_text_finishes_on_first_scroll_step() {
    let mut scroller: TextScroller<50, 7> = TextScroller::new(&STUB);
    scroller.set_text("hi");
    assert_eq!(scroller.total_width(), 8);

    let mut frame = Frame2d::new();
    let mut rng = Rng::new(0);
    let subticks = usize::try_from(TEXT_SUBTICKS).unwrap();
    let finished: Vec<usize> = (1..=3 * subticks)
        .filter(|_| scroller.tick(&mut frame, &mut rng))
        .collect();
    assert_eq!(finished, [subticks, 2 * subticks, 3 * subticks]);
    assert_eq!(scroller.offset(), 0);
}

#[test]
fn glyphs_render_centered_with_spacing_and_screen_colors() {
    let mut scroller: TextScroller<20, 7> = TextScroller::new(&STUB);
    scroller.set_text("hi");
    let mut frame = Frame2d::new();
    scroller.tick(&mut frame, &mut Rng::new(0));

    // 'h' in columns 0..4, gap at 4, 'i' at 5 (its second column is blank).
    assert_eq!(lit_columns(&frame), [0, 1, 2, 3, 5]);
    // Five rows centered in seven: rows 1..=5.
    assert_eq!(frame[(0, 0)], BLACK);
    assert_eq!(frame[(0, 1)], RAINBOW[0]);
    assert_eq!(frame[(0, 5)], RAINBOW[0]);
    assert_eq!(frame[(0, 6)], BLACK);
    // 'i' has a hole at glyph row 1.
    assert_eq!(frame[(5, 1)], RAINBOW[5]);
    assert_eq!(frame[(5, 2)], BLACK);
    assert_eq!(frame[(3, 3)], RAINBOW[3]);
}

#[test]
fn scrolling_shifts_glyphs_left_but_colors_stay_with_columns() {
    let mut scroller: TextScroller<20, 7> = TextScroller::new(&STUB);
    scroller.set_text("x hi");
    let mut frame = Frame2d::new();
    let mut rng = Rng::new(0);
    for _ in 0..=TEXT_SUBTICKS * 2 {
        scroller.tick(&mut frame, &mut rng);
    }
    assert_eq!(scroller.offset(), 2);

    // 'x' (1 wide) at -2, space (2 wide) at 0..2, 'h' starts at column 3.
    assert_eq!(lit_columns(&frame), [3, 4, 5, 6, 8]);
    assert_eq!(frame[(3, 1)], RAINBOW[3]);
}

#[test]
fn long_text_keeps_scrolling_until_its_end_passes_mid_screen() {
    let mut scroller: TextScroller<10, 5> = TextScroller::new(&STUB);
    scroller.set_text("hhhh");
    // Width 20, half the screen is 5: done once the offset reaches 15.
    let mut frame = Frame2d::new();
    let mut rng = Rng::new(0);
    let subticks = usize::try_from(TEXT_SUBTICKS).unwrap();
    let first = (1..=100 * subticks).find(|_| scroller.tick(&mut frame, &mut rng));
    assert_eq!(first, Some(15 * subticks));
}

#[test]
fn set_text_truncates_and_restarts() {
    let mut scroller: TextScroller<10, 5, 4> = TextScroller::new(&STUB);
    scroller.set_text("hhhh");
    let mut frame = Frame2d::new();
    for _ in 0..TEXT_SUBTICKS {
        scroller.tick(&mut frame, &mut Rng::new(0));
    }
    assert_eq!(scroller.offset(), 1);

    scroller.set_text("hello world");
    assert_eq!(scroller.text(), "hell");
    assert_eq!(scroller.offset(), 0);
}

#[test]
fn set_text_never_splits_a_character() {
    let mut scroller: TextScroller<10, 5, 5> = TextScroller::new(&STUB);
    scroller.set_text("12.5°C");
    assert_eq!(scroller.text(), "12.5");
}

#[test]
fn mono_font_glyphs_are_trimmed() {
    let font = MonoGlyphFont::new(&FONT_5X8);
    assert_eq!(font.height(), 8);

    let bar = font.glyph('|');
    assert_eq!(bar.width(), 1);
    assert!(bar.columns()[0] != 0);

    let space = font.glyph(' ');
    assert_eq!(space.width(), font.space_width());
    assert!(space.columns().iter().all(|&column| column == 0));

    assert_eq!(font.glyph('\u{2603}'), space);
}

#[test]
fn mono_font_drives_the_scroller() {
    const FONT: MonoGlyphFont = MonoGlyphFont::new(&FONT_5X8);
    let mut scroller: TextScroller<16, 8> = TextScroller::new(&FONT);
    scroller.set_text("Hi");
    let mut frame = Frame2d::new();
    scroller.tick(&mut frame, &mut Rng::new(0));
    assert!(!lit_columns(&frame).is_empty());
    assert!(
        frame
            .pixels()
            .all(|pixel| *pixel == BLACK || RAINBOW.contains(pixel))
    );
}

#[test]
fn glyph_trim_keeps_inner_gaps() {
    let glyph = Glyph::from_columns(&[0, 0b1, 0, 0b10, 0]).trimmed(3);
    assert_eq!(glyph.columns(), &[0b1, 0, 0b10]);
    assert_eq!(Glyph::from_columns(&[0, 0]).trimmed(3), Glyph::blank(3));
}
