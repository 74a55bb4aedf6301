#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

//! A 32x16 panel built from two serpentine-wired 32x8 halves, one GPIO line each.
//!
//! Rotates through ripples, layered snow, and a scroller showing the supply voltage,
//! which is re-read after every rotation.

use core::{convert::Infallible, panic};

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_rp::{
    adc::{self, Adc, Channel},
    bind_interrupts,
    gpio::{Level, Output, Pull},
};
use embedded_graphics::mono_font::ascii::FONT_6X10;
use static_cell::StaticCell;
use xmas_lights::{
    Error, Result,
    led2d::Wiring,
    pattern::{Animation, LayeredSnow, MonoGlyphFont, Ripples, TextScroller},
    rng::Rng,
    sequencer::Sequencer,
    show::run_show,
    voltage::Millivolts,
    ws2811::{
        BitBangLine, CHANNEL_ORDER_DEFAULT, CortexMDelay, CycleDelay, LoopCost, SymbolTimings,
        Ws2811,
    },
};
use {defmt_rtt as _, panic_probe as _};

const WIDTH: usize = 32;
const HEIGHT: usize = 16;
const LINES: usize = 2;
const PATTERNS: usize = 3;
const TEXT_INDEX: usize = 2;
const VOLTAGE_TEXT_LEN: usize = 8;

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

// Each half is wired as a snake: odd rows run right to left.
const WIRING: Wiring<LINES, WIDTH, HEIGHT> = Wiring::split_serpentine();

const FONT: MonoGlyphFont = MonoGlyphFont::new(&FONT_6X10);

type Line = BitBangLine<Output<'static>, CortexMDelay>;
type Show = Sequencer<Animation<WIDTH, HEIGHT>, PATTERNS>;

static SEQUENCER: StaticCell<Show> = StaticCell::new();

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => adc::InterruptHandler;
});

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(_spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    let lines: [Line; LINES] = [
        BitBangLine::new(Output::new(p.PIN_2, Level::Low), CortexMDelay, TIMINGS),
        BitBangLine::new(Output::new(p.PIN_3, Level::Low), CortexMDelay, TIMINGS),
    ];
    let mut encoder = Ws2811::new(lines, WIRING, CHANNEL_ORDER_DEFAULT);

    let mut adc = Adc::new(p.ADC, Irqs, adc::Config::default());
    let mut supply = Channel::new_pin(p.PIN_26, Pull::None);

    let sequencer = SEQUENCER.init(Sequencer::new([
        Animation::Ripples(Ripples::new()),
        Animation::LayeredSnow(LayeredSnow::new()),
        Animation::TextScroller(TextScroller::new(&FONT)),
    ]));
    let millivolts = read_supply(&mut adc, &mut supply).await?;
    info!("supply: {}", millivolts);
    show_voltage(sequencer.patterns_mut(), millivolts)?;

    let mut rng = Rng::new(ring_oscillator_seed());

    run_show(&mut encoder, sequencer, &mut rng, async |patterns| {
        let refreshed = match read_supply(&mut adc, &mut supply).await {
            Ok(millivolts) => show_voltage(patterns, millivolts),
            Err(err) => Err(err),
        };
        if let Err(err) = refreshed {
            warn!("supply text not refreshed: {}", defmt::Display2Format(&err));
        }
    })
    .await
}

async fn read_supply(
    adc: &mut Adc<'static, adc::Async>,
    supply: &mut Channel<'static>,
) -> Result<Millivolts> {
    let raw = adc.read(supply).await.map_err(|_| Error::AnalogRead)?;
    // The divider is scaled for 10-bit readings; the RP2040 converter gives 12.
    Ok(Millivolts::from_raw(raw >> 2))
}

fn show_voltage(
    patterns: &mut [Animation<WIDTH, HEIGHT>; PATTERNS],
    millivolts: Millivolts,
) -> Result<()> {
    let text = millivolts.to_text::<VOLTAGE_TEXT_LEN>()?;
    if let Some(text_scroller) = patterns[TEXT_INDEX].as_text_scroller_mut() {
        text_scroller.set_text(&text);
    }
    Ok(())
}

/// 64 bits from the ring oscillator's random bit.
fn ring_oscillator_seed() -> u64 {
    (0..u64::BITS).fold(0, |seed, _| {
        (seed << 1) | u64::from(embassy_rp::pac::ROSC.randombit().read().randombit())
    })
}
