//! The firmware main loop: tick the active pattern, write the frame, sleep, repeat.

use defmt::{debug, info};
use embassy_time::{Duration, Timer};

use crate::led2d::Frame2d;
use crate::pattern::Pattern;
use crate::rng::Rng;
use crate::sequencer::{Sequencer, Step};
use crate::ws2811::{SymbolLine, Ws2811};

/// Pause between frames.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(20);

/// Run the show forever.
///
/// Clears the strings once, then every [`FRAME_INTERVAL`] advances `sequencer`, writes the
/// frame through `encoder`, and sleeps. After each full rotation `on_rotation` gets the
/// patterns, which is where firmware refreshes anything that depends on the outside
/// world, such as a scroller's text.
pub async fn run_show<L, P, F, const LINES: usize, const W: usize, const H: usize, const N: usize>(
    encoder: &mut Ws2811<L, LINES, W, H>,
    sequencer: &mut Sequencer<P, N>,
    rng: &mut Rng,
    mut on_rotation: F,
) -> !
where
    L: SymbolLine,
    P: Pattern<W, H>,
    F: AsyncFnMut(&mut [P; N]),
{
    let mut frame = Frame2d::<W, H>::new();
    encoder.reset();
    info!("show: {} patterns on {}x{} over {} lines", N, W, H, LINES);

    loop {
        match sequencer.tick(&mut frame, rng) {
            Step::Running => {}
            Step::Switched { index } => debug!("show: pattern {}", index),
            Step::RotationComplete => {
                debug!("show: rotation complete");
                on_rotation(sequencer.patterns_mut()).await;
            }
        }

        encoder.write_frame(&frame);
        Timer::after(FRAME_INTERVAL).await;
    }
}
