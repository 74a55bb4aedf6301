#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Host-level tests for pattern rotation.

use smart_leds::{RGB8, colors};
use xmas_lights::led2d::Frame2d;
use xmas_lights::pattern::{Countdown, Pattern};
use xmas_lights::rng::Rng;
use xmas_lights::sequencer::{Sequencer, Step};

/// Fills the frame with one color and finishes every `period` ticks.
#[derive(Debug)]
struct Solid {
    color: RGB8,
    countdown: Countdown,
    ticks: usize,
}

impl Solid {
    const fn new(color: RGB8, period: u32) -> Self {
        Self {
            color,
            countdown: Countdown::new(period),
            ticks: 0,
        }
    }
}

impl Pattern<4, 2> for Solid {
    fn tick(&mut self, frame: &mut Frame2d<4, 2>, _rng: &mut Rng) -> bool {
        self.ticks += 1;
        *frame = Frame2d::filled(self.color);
        self.countdown.tick()
    }
}

#[test]
fn advances_only_when_the_active_pattern_finishes() {
    let mut sequencer = Sequencer::new([
        Solid::new(colors::RED, 3),
        Solid::new(colors::GREEN, 1),
        Solid::new(colors::BLUE, 2),
    ]);
    let mut frame = Frame2d::<4, 2>::new();
    let mut rng = Rng::new(0);

    let steps: Vec<Step> = (0..7)
        .map(|_| sequencer.tick(&mut frame, &mut rng))
        .collect();
    assert_eq!(
        steps,
        [
            Step::Running,
            Step::Running,
            Step::Switched { index: 1 },
            Step::Switched { index: 2 },
            Step::Running,
            Step::RotationComplete,
            Step::Running,
        ]
    );
    assert_eq!(sequencer.active_index(), 0);
    assert_eq!(frame, Frame2d::filled(colors::RED));

    let ticks: Vec<usize> = sequencer.patterns().iter().map(|solid| solid.ticks).collect();
    assert_eq!(ticks, [4, 1, 2]);
}

#[test]
fn single_pattern_completes_a_rotation_each_cycle() {
    let mut sequencer = Sequencer::new([Solid::new(colors::WHITE, 2)]);
    let mut frame = Frame2d::<4, 2>::new();
    let mut rng = Rng::new(0);
    assert_eq!(sequencer.tick(&mut frame, &mut rng), Step::Running);
    assert_eq!(sequencer.tick(&mut frame, &mut rng), Step::RotationComplete);
    assert_eq!(sequencer.active_index(), 0);
}

#[test]
fn patterns_can_be_updated_between_rotations() {
    let mut sequencer = Sequencer::new([Solid::new(colors::RED, 1), Solid::new(colors::RED, 1)]);
    sequencer.patterns_mut()[1].color = colors::YELLOW;
    let mut frame = Frame2d::<4, 2>::new();
    let mut rng = Rng::new(0);
    sequencer.tick(&mut frame, &mut rng);
    assert_eq!(sequencer.active().color, colors::YELLOW);
    sequencer.tick(&mut frame, &mut rng);
    assert_eq!(frame[(3, 1)], colors::YELLOW);
}
