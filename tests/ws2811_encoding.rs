#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Host-level tests for the WS2811 encoder, using recorded lines instead of pins.

use smart_leds::RGB8;
use xmas_lights::led2d::{Frame2d, LineGroup, Scan, Wiring};
use xmas_lights::ws2811::{
    CHANNEL_ORDER_DEFAULT, ChannelOrder, LoopCost, ONE_HIGH_NS, ONE_LOW_NS, PhaseCycles,
    PhaseDelays, RESET_ZERO_SYMBOLS, RecordingLine, SYMBOLS_PER_PIXEL, Symbol, SymbolTimings,
    TOLERANCE_NS, Ws2811, ZERO_HIGH_NS, ZERO_LOW_NS, decode_bytes, pixel_symbols,
};

const CPU_HZ: u32 = 125_000_000;
// A subs/bne loop at three cycles per iteration, as on the Cortex-M0+.
const COST: LoopCost = LoopCost {
    cycles_per_iteration: 3,
    phase_cycles: 12,
    pixel_cycles: 40,
};
const TIMINGS: SymbolTimings = SymbolTimings::for_clock(CPU_HZ, COST);

fn recording_lines<const LINES: usize>() -> [RecordingLine; LINES] {
    core::array::from_fn(|_| RecordingLine::new(TIMINGS))
}

fn assert_close(actual_ns: u32, nominal_ns: u32) {
    assert!(
        actual_ns.abs_diff(nominal_ns) <= TOLERANCE_NS,
        "{actual_ns} ns is not within {TOLERANCE_NS} ns of {nominal_ns} ns"
    );
}

#[test]
fn timings_at_125_mhz_count_loop_iterations() {
    // 500 ns = 63 cycles: (63 - 12) / 3 = 17 iterations, and so on.
    assert_eq!(
        TIMINGS.zero,
        PhaseDelays {
            high: 17,
            low: 79,
            last_low: 66
        }
    );
    assert_eq!(
        TIMINGS.one,
        PhaseDelays {
            high: 46,
            low: 50,
            last_low: 37
        }
    );
    assert!(TIMINGS.is_within_tolerance());
}

#[test]
fn realized_phases_include_loop_and_pixel_cost() {
    assert_eq!(
        TIMINGS.realized(Symbol::Zero, false),
        PhaseCycles { high: 63, low: 249 }
    );
    assert_eq!(
        TIMINGS.realized(Symbol::Zero, true),
        PhaseCycles { high: 63, low: 250 }
    );
    assert_eq!(TIMINGS.cycles_to_ns(63), 504);
    assert_eq!(
        TIMINGS.realized(Symbol::One, true),
        PhaseCycles { high: 150, low: 163 }
    );
}

#[test]
fn one_cycle_loop_assumption_fails_on_three_cycle_loop() {
    // Delays computed as if each iteration took one cycle run three times too long.
    let naive = SymbolTimings::for_clock(
        CPU_HZ,
        LoopCost {
            cycles_per_iteration: 1,
            ..COST
        },
    );
    assert!(naive.is_within_tolerance());
    assert!(!naive.is_within_tolerance_on(COST));

    let zero_high = naive.cycles_to_ns(naive.realized_on(COST, Symbol::Zero, false).high);
    assert!(zero_high > ZERO_HIGH_NS + TOLERANCE_NS, "zero high {zero_high} ns");
}

#[test]
fn understated_pixel_cost_is_out_of_tolerance() {
    let slow_pixels = LoopCost {
        pixel_cycles: COST.pixel_cycles + 30,
        ..COST
    };
    assert!(!TIMINGS.is_within_tolerance_on(slow_pixels));
}

#[test]
fn every_recorded_phase_is_within_tolerance() {
    const WIRING: Wiring<1, 4, 1> = Wiring::row_per_line();
    let mut frame = Frame2d::<4, 1>::new();
    frame[(0, 0)] = RGB8::new(0xFF, 0x00, 0xFF);
    frame[(1, 0)] = RGB8::new(0x00, 0xFF, 0x00);
    frame[(3, 0)] = RGB8::new(0x5A, 0xA5, 0x0F);

    let mut matrix = Ws2811::new(recording_lines::<1>(), WIRING, CHANNEL_ORDER_DEFAULT);
    matrix.write_frame(&frame);

    let symbols =
        (0..4).flat_map(|x_index| pixel_symbols(frame[(x_index, 0)], CHANNEL_ORDER_DEFAULT));
    let phases = matrix.lines()[0].phases();
    assert_eq!(phases.len(), 4 * SYMBOLS_PER_PIXEL);
    for (phase, symbol) in phases.iter().zip(symbols) {
        let (high_ns, low_ns) = match symbol {
            Symbol::Zero => (ZERO_HIGH_NS, ZERO_LOW_NS),
            Symbol::One => (ONE_HIGH_NS, ONE_LOW_NS),
        };
        assert_close(TIMINGS.cycles_to_ns(phase.high), high_ns);
        assert_close(TIMINGS.cycles_to_ns(phase.low), low_ns);
    }
}

#[test]
fn last_symbol_of_each_pixel_carries_the_pixel_cost() {
    const WIRING: Wiring<1, 2, 1> = Wiring::row_per_line();
    let mut matrix = Ws2811::new(recording_lines::<1>(), WIRING, CHANNEL_ORDER_DEFAULT);
    matrix.write_frame(&Frame2d::new());

    let phases = matrix.lines()[0].phases();
    for (index, phase) in phases.iter().enumerate() {
        let ends_pixel = (index + 1) % SYMBOLS_PER_PIXEL == 0;
        assert_eq!(*phase, TIMINGS.realized(Symbol::Zero, ends_pixel));
    }
}

#[test]
fn high_threshold_separates_symbols() {
    let threshold = TIMINGS.high_threshold();
    assert!(TIMINGS.realized(Symbol::Zero, false).high < threshold);
    assert!(TIMINGS.realized(Symbol::One, false).high > threshold);
}

#[test]
fn pixel_symbols_are_msb_first() {
    let symbols: Vec<Symbol> = pixel_symbols(RGB8::new(0, 0, 0b1010_0001), ChannelOrder::Brg)
        .take(8)
        .collect();
    use Symbol::{One, Zero};
    assert_eq!(symbols, [One, Zero, One, Zero, Zero, Zero, Zero, One]);
}

#[test]
fn default_channel_order_is_blue_red_green() {
    assert_eq!(CHANNEL_ORDER_DEFAULT, ChannelOrder::Brg);
    let color = RGB8::new(0x11, 0x22, 0x33);
    assert_eq!(ChannelOrder::Brg.bytes(color), [0x33, 0x11, 0x22]);
    assert_eq!(ChannelOrder::Grb.bytes(color), [0x22, 0x11, 0x33]);
    assert_eq!(ChannelOrder::Rgb.bytes(color), [0x11, 0x22, 0x33]);
}

#[test]
fn pixel_emits_twenty_four_symbols() {
    assert_eq!(
        pixel_symbols(RGB8::new(1, 2, 3), CHANNEL_ORDER_DEFAULT).count(),
        SYMBOLS_PER_PIXEL
    );
}

#[test]
fn frame_decodes_back_to_brg_bytes() {
    const WIRING: Wiring<1, 3, 1> = Wiring::row_per_line();
    let mut frame = Frame2d::<3, 1>::new();
    frame[(0, 0)] = RGB8::new(0xFF, 0x00, 0x80);
    frame[(1, 0)] = RGB8::new(0x01, 0x02, 0x03);
    frame[(2, 0)] = RGB8::new(0xA5, 0x5A, 0xC3);

    let mut matrix = Ws2811::new(recording_lines::<1>(), WIRING, CHANNEL_ORDER_DEFAULT);
    matrix.write_frame(&frame);

    assert_eq!(
        matrix.lines()[0].decode(),
        [0x80, 0xFF, 0x00, 0x03, 0x01, 0x02, 0xC3, 0xA5, 0x5A]
    );
}

#[test]
fn black_frame_still_sends_every_bit() {
    const WIRING: Wiring<2, 5, 4> = Wiring::split_serpentine();
    let mut matrix = Ws2811::new(recording_lines::<2>(), WIRING, CHANNEL_ORDER_DEFAULT);
    matrix.write_frame(&Frame2d::new());

    for line in matrix.lines() {
        assert_eq!(line.phases().len(), 2 * 5 * SYMBOLS_PER_PIXEL);
        let zero_high = TIMINGS.realized(Symbol::Zero, false).high;
        assert!(line.phases().iter().all(|phase| phase.high == zero_high));
        assert!(line.decode().iter().all(|&byte| byte == 0));
    }
}

#[test]
fn serpentine_lines_carry_their_band_in_snake_order() {
    const WIRING: Wiring<2, 3, 4> = Wiring::split_serpentine();
    let mut frame = Frame2d::<3, 4>::new();
    for (y_index, row) in frame.iter_mut().enumerate() {
        for (x_index, pixel) in row.iter_mut().enumerate() {
            // Blue goes first on the wire, so tag pixels there.
            let tag = u8::try_from(y_index * 10 + x_index).unwrap();
            *pixel = RGB8::new(0, 0, tag);
        }
    }

    let mut matrix = Ws2811::new(recording_lines::<2>(), WIRING, CHANNEL_ORDER_DEFAULT);
    matrix.write_frame(&frame);

    let blue_tags = |line: &RecordingLine| -> Vec<u8> {
        line.decode().chunks_exact(3).map(|pixel| pixel[0]).collect()
    };
    let lines = matrix.lines();
    assert_eq!(blue_tags(&lines[0]), [0, 1, 2, 12, 11, 10]);
    assert_eq!(blue_tags(&lines[1]), [20, 21, 22, 32, 31, 30]);
}

#[test]
fn reversed_group_starts_at_right_edge() {
    const WIRING: Wiring<1, 4, 1> = Wiring::new([LineGroup::new(0, 1, Scan::Reversed)]);
    let mut frame = Frame2d::<4, 1>::new();
    frame[(3, 0)] = RGB8::new(0, 0, 0xEE);

    let mut matrix = Ws2811::new(recording_lines::<1>(), WIRING, ChannelOrder::Rgb);
    matrix.write_frame(&frame);

    assert_eq!(&matrix.lines()[0].decode()[..3], &[0x00, 0x00, 0xEE]);
}

#[test]
fn reset_sends_zero_symbols_on_every_line() {
    const WIRING: Wiring<3, 100, 3> = Wiring::row_per_line();
    let mut matrix = Ws2811::new(recording_lines::<3>(), WIRING, CHANNEL_ORDER_DEFAULT);
    matrix.reset();

    for line in matrix.lines() {
        assert_eq!(line.phases().len(), RESET_ZERO_SYMBOLS);
        assert!(
            line.phases()
                .iter()
                .all(|phase| *phase == TIMINGS.realized(Symbol::Zero, false))
        );
    }
}

#[test]
fn decode_ignores_trailing_partial_byte() {
    let phases = [TIMINGS.realized(Symbol::One, false); 11];
    assert_eq!(decode_bytes(&phases, TIMINGS.high_threshold()), [0xFF]);
}

#[test]
fn lines_can_be_taken_back_and_cleared() {
    const WIRING: Wiring<1, 2, 1> = Wiring::row_per_line();
    let mut matrix = Ws2811::new(recording_lines::<1>(), WIRING, CHANNEL_ORDER_DEFAULT);
    matrix.write_frame(&Frame2d::filled(RGB8::new(9, 9, 9)));
    matrix.lines_mut()[0].clear();
    let [line] = matrix.into_lines();
    assert!(line.phases().is_empty());
}
