#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Host-level tests for gradient tables.

use smart_leds::RGB8;
use xmas_lights::gradient::{
    Gradient, RAINBOW, RAINBOW_LEN, RAINBOW_STOPS, STOP_MAGENTA, STOP_ORANGE, STOP_RED,
};

#[test]
fn rainbow_starts_each_segment_on_its_stop() {
    assert_eq!(RAINBOW.len(), RAINBOW_LEN);
    for (stop_index, stop) in RAINBOW_STOPS.iter().enumerate() {
        assert_eq!(RAINBOW[stop_index * 20], *stop);
    }
}

#[test]
fn rainbow_interpolates_with_integer_division() {
    // Red (255,0,0) to orange (255,32,0), step 1 of 20: g = 32 * 1 / 20 = 1.
    assert_eq!(RAINBOW[1], RGB8::new(255, 1, 0));
    // Step 10: g = 32 * 10 / 20 = 16.
    assert_eq!(RAINBOW[10], RGB8::new(255, 16, 0));
    assert_eq!(RAINBOW[20], STOP_ORANGE);
}

#[test]
fn rainbow_wraps_from_magenta_back_to_red() {
    // Last segment blends magenta (255,0,255) into red: b = 255 * 1 / 20 = 12 at step 19.
    assert_eq!(RAINBOW[120], STOP_MAGENTA);
    assert_eq!(RAINBOW[139], RGB8::new(255, 0, 12));
    assert_eq!(RAINBOW.get(RAINBOW_LEN), STOP_RED);
    assert_eq!(RAINBOW.get(RAINBOW_LEN + 10), RAINBOW[10]);
}

#[test]
fn custom_gradient_matches_blend_formula() {
    const STOPS: [RGB8; 2] = [RGB8::new(0, 100, 200), RGB8::new(200, 0, 100)];
    const RAMP: Gradient<8> = Gradient::from_stops(&STOPS);
    for step in 0..4u16 {
        let expected = |start: u8, end: u8| -> u8 {
            let mixed = (u16::from(start) * (4 - step) + u16::from(end) * step) / 4;
            u8::try_from(mixed).unwrap()
        };
        assert_eq!(
            RAMP[usize::from(step)],
            RGB8::new(expected(0, 200), expected(100, 0), expected(200, 100))
        );
        assert_eq!(
            RAMP[usize::from(step) + 4],
            RGB8::new(expected(200, 0), expected(0, 100), expected(100, 200))
        );
    }
}
