#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

//! Three 100-LED strings hung side by side, one per GPIO line.
//!
//! Rotates through snow, rainbow drops, and candy cane.

use core::{convert::Infallible, panic};

use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use static_cell::StaticCell;
use xmas_lights::{
    Result,
    led2d::Wiring,
    pattern::{Animation, CandyCane, RainbowDrops, Snow},
    rng::Rng,
    sequencer::Sequencer,
    show::run_show,
    ws2811::{
        BitBangLine, CHANNEL_ORDER_DEFAULT, CortexMDelay, CycleDelay, LoopCost, SymbolTimings,
        Ws2811,
    },
};
use {defmt_rtt as _, panic_probe as _};

const WIDTH: usize = 100;
const HEIGHT: usize = 3;

// RP2040 default system clock.
const CPU_HZ: u32 = 125_000_000;
// Pin write and bit stepping around every phase, on top of the delay call.
const PHASE_CYCLES: u32 = CortexMDelay::CALL_CYCLES + 8;
// Fetching and packing the next pixel after the last bit of the current one.
const PIXEL_CYCLES: u32 = 40;
const COST: LoopCost = LoopCost {
    cycles_per_iteration: CortexMDelay::CYCLES_PER_ITERATION,
    phase_cycles: PHASE_CYCLES,
    pixel_cycles: PIXEL_CYCLES,
};
const TIMINGS: SymbolTimings = SymbolTimings::for_clock(CPU_HZ, COST);
const _: () = assert!(TIMINGS.is_within_tolerance());

const WIRING: Wiring<HEIGHT, WIDTH, HEIGHT> = Wiring::row_per_line();

type Line = BitBangLine<Output<'static>, CortexMDelay>;
type Show = Sequencer<Animation<WIDTH, HEIGHT>, 3>;

static SEQUENCER: StaticCell<Show> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(_spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    let lines: [Line; HEIGHT] = [
        BitBangLine::new(Output::new(p.PIN_2, Level::Low), CortexMDelay, TIMINGS),
        BitBangLine::new(Output::new(p.PIN_3, Level::Low), CortexMDelay, TIMINGS),
        BitBangLine::new(Output::new(p.PIN_4, Level::Low), CortexMDelay, TIMINGS),
    ];
    let mut encoder = Ws2811::new(lines, WIRING, CHANNEL_ORDER_DEFAULT);

    let sequencer = SEQUENCER.init(Sequencer::new([
        Animation::Snow(Snow::new()),
        Animation::RainbowDrops(RainbowDrops::new()),
        Animation::CandyCane(CandyCane::new()),
    ]));
    let mut rng = Rng::new(ring_oscillator_seed());

    run_show(&mut encoder, sequencer, &mut rng, async |_patterns| {}).await
}

/// 64 bits from the ring oscillator's random bit.
fn ring_oscillator_seed() -> u64 {
    (0..u64::BITS).fold(0, |seed, _| {
        (seed << 1) | u64::from(embassy_rp::pac::ROSC.randombit().read().randombit())
    })
}
