//! Bit-banged WS2811 protocol encoder.
//!
//! WS2811 (low-speed mode) is a single-wire protocol: every bit is one *symbol*, a high
//! phase followed by a low phase, and the ratio of the two tells the LED whether it is a
//! `0` or a `1`:
//!
//! | symbol | high      | low       |
//! |--------|-----------|-----------|
//! | `0`    | 0.5 µs    | 2.0 µs    |
//! | `1`    | 1.2 µs    | 1.3 µs    |
//!
//! Each phase must land within ±150 ns. The chain is a shift register, so every bit of
//! every pixel is sent, black or not.
//!
//! [`Ws2811`] owns the output lines and a [`Wiring`]. [`Ws2811::write_frame`] sends the
//! whole frame, line after line, inside one critical section: an interrupt in the
//! middle of a symbol would stretch it and desynchronize the chain.
//!
//! The timing primitive is [`SymbolLine::emit`]. On hardware it is a [`BitBangLine`]:
//! a GPIO pin plus a [`CycleDelay`] loop, driven by iteration counts that
//! [`SymbolTimings::for_clock`] derives from the CPU clock and a [`LoopCost`]. The cost
//! covers the loop's cycles per iteration, the fixed work around every phase, and the
//! extra work between pixels, which the last low phase of each pixel absorbs. On the
//! host, `RecordingLine` captures the resulting phase durations so tests can check and
//! decode them.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;
use smart_leds::RGB8;

use crate::led2d::{Frame2d, Wiring};

#[cfg(feature = "host")]
mod recording;
#[cfg(feature = "host")]
pub use recording::{RecordingLine, decode_bytes};

/// High time of a `0` symbol, in nanoseconds.
pub const ZERO_HIGH_NS: u32 = 500;
/// Low time of a `0` symbol, in nanoseconds.
pub const ZERO_LOW_NS: u32 = 2_000;
/// High time of a `1` symbol, in nanoseconds.
pub const ONE_HIGH_NS: u32 = 1_200;
/// Low time of a `1` symbol, in nanoseconds.
pub const ONE_LOW_NS: u32 = 1_300;
/// Allowed error on each phase, in nanoseconds.
pub const TOLERANCE_NS: u32 = 150;

/// Zero symbols sent on each line at startup to flush whatever the chain held.
pub const RESET_ZERO_SYMBOLS: usize = 100;

/// Bits per color channel.
pub const BITS_PER_CHANNEL: usize = 8;
/// Symbols per pixel (three channels).
pub const SYMBOLS_PER_PIXEL: usize = 3 * BITS_PER_CHANNEL;

/// One protocol bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    /// Short high, long low.
    Zero,
    /// Long high, short low.
    One,
}

impl From<bool> for Symbol {
    fn from(bit: bool) -> Self {
        if bit { Self::One } else { Self::Zero }
    }
}

/// Duration of each phase of a symbol as it appears on the wire, in CPU cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseCycles {
    /// Cycles with the line held high.
    pub high: u32,
    /// Cycles with the line held low.
    pub low: u32,
}

/// Delay-loop iterations for each phase of one symbol.
///
/// `last_low` replaces `low` on the final symbol of a pixel, where the encoder also
/// fetches and packs the next pixel before the line goes high again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseDelays {
    /// Iterations with the line held high.
    pub high: u32,
    /// Iterations with the line held low.
    pub low: u32,
    /// Iterations with the line held low after the last symbol of a pixel.
    pub last_low: u32,
}

/// What a phase costs in CPU cycles besides the delay loop's iterations.
///
/// A phase of `n` iterations lasts `phase_cycles + n * cycles_per_iteration` cycles, plus
/// `pixel_cycles` for the low phase that ends a pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoopCost {
    /// Cycles per iteration of the delay loop.
    pub cycles_per_iteration: u32,
    /// Cycles each phase spends outside the loop: the pin write, loop entry and exit,
    /// and stepping to the next bit.
    pub phase_cycles: u32,
    /// Extra cycles between the last symbol of one pixel and the first of the next.
    pub pixel_cycles: u32,
}

/// Delay-loop iterations for both symbols at a given CPU clock and [`LoopCost`].
///
/// Build it in a `const` so the numbers are fixed at compile time, and assert
/// [`Self::is_within_tolerance`] next to it:
///
/// ```rust
/// use xmas_lights::ws2811::{LoopCost, SymbolTimings};
///
/// const COST: LoopCost = LoopCost {
///     cycles_per_iteration: 3,
///     phase_cycles: 12,
///     pixel_cycles: 40,
/// };
/// const TIMINGS: SymbolTimings = SymbolTimings::for_clock(125_000_000, COST);
/// const _: () = assert!(TIMINGS.is_within_tolerance());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SymbolTimings {
    /// Delays of a `0` symbol.
    pub zero: PhaseDelays,
    /// Delays of a `1` symbol.
    pub one: PhaseDelays,
    cpu_hz: u32,
    cost: LoopCost,
}

impl SymbolTimings {
    /// Delays that realize each nominal phase at `cpu_hz` given `cost`, rounded to the
    /// nearest iteration.
    ///
    /// # Panics
    ///
    /// At compile time when used in a `const`, if a phase is shorter than its fixed cost.
    #[must_use]
    pub const fn for_clock(cpu_hz: u32, cost: LoopCost) -> Self {
        assert!(cost.cycles_per_iteration > 0, "delay loop must take time");
        let pixel_end_cycles = cost.phase_cycles + cost.pixel_cycles;
        Self {
            zero: PhaseDelays {
                high: iterations(ZERO_HIGH_NS, cpu_hz, cost, cost.phase_cycles),
                low: iterations(ZERO_LOW_NS, cpu_hz, cost, cost.phase_cycles),
                last_low: iterations(ZERO_LOW_NS, cpu_hz, cost, pixel_end_cycles),
            },
            one: PhaseDelays {
                high: iterations(ONE_HIGH_NS, cpu_hz, cost, cost.phase_cycles),
                low: iterations(ONE_LOW_NS, cpu_hz, cost, cost.phase_cycles),
                last_low: iterations(ONE_LOW_NS, cpu_hz, cost, pixel_end_cycles),
            },
            cpu_hz,
            cost,
        }
    }

    /// Delays for `symbol`.
    #[must_use]
    pub const fn delays(&self, symbol: Symbol) -> PhaseDelays {
        match symbol {
            Symbol::Zero => self.zero,
            Symbol::One => self.one,
        }
    }

    /// The clock these delays were computed for.
    #[must_use]
    pub const fn cpu_hz(&self) -> u32 {
        self.cpu_hz
    }

    /// The loop cost these delays were computed for.
    #[must_use]
    pub const fn cost(&self) -> LoopCost {
        self.cost
    }

    /// Cycles `symbol` occupies on the wire when the loop really costs `actual`.
    #[must_use]
    pub const fn realized_on(
        &self,
        actual: LoopCost,
        symbol: Symbol,
        ends_pixel: bool,
    ) -> PhaseCycles {
        let delays = self.delays(symbol);
        let (low_iterations, low_extra) = if ends_pixel {
            (delays.last_low, actual.pixel_cycles)
        } else {
            (delays.low, 0)
        };
        PhaseCycles {
            high: actual.phase_cycles + delays.high * actual.cycles_per_iteration,
            low: actual.phase_cycles + low_iterations * actual.cycles_per_iteration + low_extra,
        }
    }

    /// Cycles `symbol` occupies on the wire under the cost the delays were computed for.
    #[must_use]
    pub const fn realized(&self, symbol: Symbol, ends_pixel: bool) -> PhaseCycles {
        self.realized_on(self.cost, symbol, ends_pixel)
    }

    /// Convert a cycle count at this clock to nanoseconds.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, reason = "phase durations fit in u32 nanoseconds")]
    pub const fn cycles_to_ns(&self, cycles: u32) -> u32 {
        (cycles as u64 * 1_000_000_000 / self.cpu_hz as u64) as u32
    }

    /// Whether every phase, including the stretched low phase that ends a pixel, and
    /// each full symbol period land within [`TOLERANCE_NS`] of nominal.
    #[must_use]
    pub const fn is_within_tolerance(&self) -> bool {
        self.is_within_tolerance_on(self.cost)
    }

    /// [`Self::is_within_tolerance`] when the loop really costs `actual`.
    #[must_use]
    pub const fn is_within_tolerance_on(&self, actual: LoopCost) -> bool {
        self.symbol_within(actual, Symbol::Zero, false, ZERO_HIGH_NS, ZERO_LOW_NS)
            && self.symbol_within(actual, Symbol::Zero, true, ZERO_HIGH_NS, ZERO_LOW_NS)
            && self.symbol_within(actual, Symbol::One, false, ONE_HIGH_NS, ONE_LOW_NS)
            && self.symbol_within(actual, Symbol::One, true, ONE_HIGH_NS, ONE_LOW_NS)
    }

    const fn symbol_within(
        &self,
        actual: LoopCost,
        symbol: Symbol,
        ends_pixel: bool,
        high_ns: u32,
        low_ns: u32,
    ) -> bool {
        let phases = self.realized_on(actual, symbol, ends_pixel);
        let high = self.cycles_to_ns(phases.high);
        let low = self.cycles_to_ns(phases.low);
        within(high, high_ns) && within(low, low_ns) && within(high + low, high_ns + low_ns)
    }

    /// High-phase cycle count halfway between the two symbols, for decoding recordings.
    #[must_use]
    pub const fn high_threshold(&self) -> u32 {
        let zero = self.realized(Symbol::Zero, false).high;
        let one = self.realized(Symbol::One, false).high;
        zero + (one - zero) / 2
    }
}

#[allow(clippy::cast_possible_truncation, reason = "nanosecond phases at MHz clocks fit in u32")]
const fn iterations(nanoseconds: u32, cpu_hz: u32, cost: LoopCost, fixed_cycles: u32) -> u32 {
    let cycles = ((nanoseconds as u64 * cpu_hz as u64 + 500_000_000) / 1_000_000_000) as u32;
    assert!(
        cycles > fixed_cycles,
        "CPU clock too slow for this symbol phase"
    );
    (cycles - fixed_cycles + cost.cycles_per_iteration / 2) / cost.cycles_per_iteration
}

const fn within(actual: u32, nominal: u32) -> bool {
    actual.abs_diff(nominal) <= TOLERANCE_NS
}

/// Order in which a pixel's channels go on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelOrder {
    /// Blue, red, green. The order the strips in this project are wired for.
    Brg,
    /// Red, green, blue.
    Rgb,
    /// Green, red, blue (common on WS2812 parts).
    Grb,
}

/// Default channel order.
pub const CHANNEL_ORDER_DEFAULT: ChannelOrder = ChannelOrder::Brg;

impl ChannelOrder {
    /// The three channel bytes of `color`, in wire order.
    #[must_use]
    pub const fn bytes(self, color: RGB8) -> [u8; 3] {
        match self {
            Self::Brg => [color.b, color.r, color.g],
            Self::Rgb => [color.r, color.g, color.b],
            Self::Grb => [color.g, color.r, color.b],
        }
    }

    /// The 24 wire bits of `color` in the low bits of a word, first bit highest.
    #[must_use]
    pub const fn word(self, color: RGB8) -> u32 {
        let [first, second, third] = self.bytes(color);
        ((first as u32) << 16) | ((second as u32) << 8) | third as u32
    }
}

/// Symbols for a 24-bit pixel word, most significant bit first.
pub fn word_symbols(word: u32) -> impl Iterator<Item = Symbol> {
    (0..SYMBOLS_PER_PIXEL)
        .rev()
        .map(move |bit| Symbol::from((word >> bit) & 1 == 1))
}

/// Symbols for one pixel: each channel in `order`, each MSB first.
pub fn pixel_symbols(color: RGB8, order: ChannelOrder) -> impl Iterator<Item = Symbol> {
    word_symbols(order.word(color))
}

/// One output line that can emit timed symbols.
///
/// This is the single timing primitive the encoder relies on.
/// Implementations must emit the high phase then the low phase with no gap beyond
/// what [`SymbolTimings`] already budgets.
pub trait SymbolLine {
    /// Drive one symbol onto the line.
    fn emit(&mut self, symbol: Symbol);

    /// Drive the 24 bits of a pixel word, most significant first.
    ///
    /// Lines with real timing override this to shorten the final low phase by the
    /// cycles the encoder spends between pixels.
    fn emit_pixel(&mut self, word: u32) {
        for symbol in word_symbols(word) {
            self.emit(symbol);
        }
    }
}

impl<T: SymbolLine + ?Sized> SymbolLine for &mut T {
    fn emit(&mut self, symbol: Symbol) {
        (**self).emit(symbol);
    }

    fn emit_pixel(&mut self, word: u32) {
        (**self).emit_pixel(word);
    }
}

/// A busy-wait loop with a known cost per iteration.
pub trait CycleDelay {
    /// Cycles one iteration takes.
    const CYCLES_PER_ITERATION: u32;
    /// Cycles a call costs beyond its iterations.
    const CALL_CYCLES: u32;

    /// Spin for `iterations` iterations.
    fn delay_iterations(&mut self, iterations: u32);
}

/// [`CycleDelay`] backed by `cortex_m::asm::delay`.
///
/// `asm::delay(n)` runs `1 + n / 2` iterations of a `subs`/`bne` loop, three cycles
/// each on the Cortex-M0+, so the argument is chosen to hit an exact iteration count.
#[cfg(feature = "arm")]
#[derive(Clone, Copy, Debug, Default)]
pub struct CortexMDelay;

#[cfg(feature = "arm")]
impl CycleDelay for CortexMDelay {
    const CYCLES_PER_ITERATION: u32 = 3;
    const CALL_CYCLES: u32 = 4;

    #[inline(always)]
    fn delay_iterations(&mut self, iterations: u32) {
        if iterations > 0 {
            cortex_m::asm::delay(2 * (iterations - 1));
        }
    }
}

/// [`CycleDelay`] backed by `riscv::asm::delay`, which runs `1 + n / 2` iterations of an
/// `addi`/`bne` loop.
#[cfg(feature = "riscv")]
#[derive(Clone, Copy, Debug, Default)]
pub struct RiscvDelay;

#[cfg(feature = "riscv")]
impl CycleDelay for RiscvDelay {
    const CYCLES_PER_ITERATION: u32 = 3;
    const CALL_CYCLES: u32 = 4;

    #[inline(always)]
    fn delay_iterations(&mut self, iterations: u32) {
        if iterations > 0 {
            riscv::asm::delay(2 * (iterations - 1));
        }
    }
}

#[allow(clippy::cast_possible_truncation, reason = "24 fits in u32")]
const PIXEL_BITS: u32 = SYMBOLS_PER_PIXEL as u32;
const TOP_BIT: u32 = 1 << 31;

/// A GPIO pin driven with iteration-counted delays.
///
/// The pin's error type must be [`Infallible`]: there is no way to retry a symbol.
pub struct BitBangLine<P, D> {
    pin: P,
    delay: D,
    timings: SymbolTimings,
}

impl<P, D> BitBangLine<P, D>
where
    P: OutputPin<Error = Infallible>,
    D: CycleDelay,
{
    /// Wrap a pin. The line idles low.
    ///
    /// # Panics
    ///
    /// If `timings` were computed for a different iteration cost than `D` has.
    pub fn new(mut pin: P, delay: D, timings: SymbolTimings) -> Self {
        assert_eq!(
            timings.cost().cycles_per_iteration,
            D::CYCLES_PER_ITERATION,
            "timings computed for a different delay loop"
        );
        let Ok(()) = pin.set_low();
        Self {
            pin,
            delay,
            timings,
        }
    }

    /// Give the pin back.
    pub fn into_pin(self) -> P {
        self.pin
    }

    #[inline(always)]
    fn drive(&mut self, high: u32, low: u32) {
        let Ok(()) = self.pin.set_high();
        self.delay.delay_iterations(high);
        let Ok(()) = self.pin.set_low();
        self.delay.delay_iterations(low);
    }
}

impl<P, D> SymbolLine for BitBangLine<P, D>
where
    P: OutputPin<Error = Infallible>,
    D: CycleDelay,
{
    #[inline(always)]
    fn emit(&mut self, symbol: Symbol) {
        let delays = self.timings.delays(symbol);
        self.drive(delays.high, delays.low);
    }

    #[inline(always)]
    fn emit_pixel(&mut self, word: u32) {
        // Left-align the 24 bits so the next one is always the top bit.
        let mut bits = word << (u32::BITS - PIXEL_BITS);
        for _ in 1..PIXEL_BITS {
            let delays = self.timings.delays(Symbol::from(bits & TOP_BIT != 0));
            self.drive(delays.high, delays.low);
            bits <<= 1;
        }
        let delays = self.timings.delays(Symbol::from(bits & TOP_BIT != 0));
        self.drive(delays.high, delays.last_low);
    }
}

/// A WS2811 matrix: `LINES` output lines carrying a `W`×`H` frame as described by a [`Wiring`].
///
/// ```rust
/// use xmas_lights::led2d::{Frame2d, Wiring};
/// use xmas_lights::ws2811::{
///     CHANNEL_ORDER_DEFAULT, LoopCost, RecordingLine, SymbolTimings, Ws2811,
/// };
///
/// const COST: LoopCost = LoopCost {
///     cycles_per_iteration: 3,
///     phase_cycles: 12,
///     pixel_cycles: 40,
/// };
/// const TIMINGS: SymbolTimings = SymbolTimings::for_clock(125_000_000, COST);
/// const WIRING: Wiring<2, 4, 2> = Wiring::row_per_line();
///
/// let lines = [RecordingLine::new(TIMINGS), RecordingLine::new(TIMINGS)];
/// let mut matrix = Ws2811::new(lines, WIRING, CHANNEL_ORDER_DEFAULT);
/// matrix.write_frame(&Frame2d::new());
/// assert_eq!(matrix.lines()[0].phases().len(), 4 * 24);
/// ```
pub struct Ws2811<L, const LINES: usize, const W: usize, const H: usize> {
    lines: [L; LINES],
    wiring: Wiring<LINES, W, H>,
    order: ChannelOrder,
}

impl<L, const LINES: usize, const W: usize, const H: usize> Ws2811<L, LINES, W, H>
where
    L: SymbolLine,
{
    /// Bind output lines to a wiring. `lines[i]` carries `wiring.groups()[i]`.
    pub const fn new(lines: [L; LINES], wiring: Wiring<LINES, W, H>, order: ChannelOrder) -> Self {
        Self {
            lines,
            wiring,
            order,
        }
    }

    /// Send [`RESET_ZERO_SYMBOLS`] zero symbols on every line, inside a critical section.
    ///
    /// Used once at startup to push stale data out of the chain.
    pub fn reset(&mut self) {
        critical_section::with(|_| {
            for line in &mut self.lines {
                for _ in 0..RESET_ZERO_SYMBOLS {
                    line.emit(Symbol::Zero);
                }
            }
        });
    }

    /// Emit every pixel of `frame`, one line after another, as one uninterruptible block.
    ///
    /// There is no acknowledgement from the LEDs, so there is nothing to report.
    pub fn write_frame(&mut self, frame: &Frame2d<W, H>) {
        let order = self.order;
        let wiring = &self.wiring;
        let lines = &mut self.lines;
        critical_section::with(|_| {
            for (group, line) in wiring.groups().iter().zip(lines.iter_mut()) {
                for (x_index, y_index) in group.pixel_order::<W>() {
                    line.emit_pixel(order.word(frame.0[y_index][x_index]));
                }
            }
        });
    }

    /// The wiring this matrix was built with.
    #[must_use]
    pub const fn wiring(&self) -> &Wiring<LINES, W, H> {
        &self.wiring
    }

    /// The output lines.
    #[must_use]
    pub const fn lines(&self) -> &[L; LINES] {
        &self.lines
    }

    /// Mutable access to the output lines.
    pub const fn lines_mut(&mut self) -> &mut [L; LINES] {
        &mut self.lines
    }

    /// Give the output lines back.
    pub fn into_lines(self) -> [L; LINES] {
        self.lines
    }
}
