//! Host stand-in for an output line that records phases instead of toggling a pin.

use super::{
    BITS_PER_CHANNEL, PhaseCycles, SYMBOLS_PER_PIXEL, Symbol, SymbolLine, SymbolTimings,
    word_symbols,
};

/// A [`SymbolLine`] that records the phase durations a [`BitBangLine`](super::BitBangLine)
/// with the same timings would put on the wire.
#[derive(Clone, Debug)]
pub struct RecordingLine {
    timings: SymbolTimings,
    phases: Vec<PhaseCycles>,
}

impl RecordingLine {
    /// An empty recording using `timings` for each symbol.
    #[must_use]
    pub const fn new(timings: SymbolTimings) -> Self {
        Self {
            timings,
            phases: Vec::new(),
        }
    }

    /// Every phase pair emitted so far, in order.
    #[must_use]
    pub fn phases(&self) -> &[PhaseCycles] {
        &self.phases
    }

    /// The timings this line records with.
    #[must_use]
    pub const fn timings(&self) -> SymbolTimings {
        self.timings
    }

    /// Decode the recording into bytes using the timings' high-phase threshold.
    #[must_use]
    pub fn decode(&self) -> Vec<u8> {
        decode_bytes(&self.phases, self.timings.high_threshold())
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.phases.clear();
    }
}

impl SymbolLine for RecordingLine {
    fn emit(&mut self, symbol: Symbol) {
        self.phases.push(self.timings.realized(symbol, false));
    }

    fn emit_pixel(&mut self, word: u32) {
        for (index, symbol) in word_symbols(word).enumerate() {
            let ends_pixel = index + 1 == SYMBOLS_PER_PIXEL;
            self.phases.push(self.timings.realized(symbol, ends_pixel));
        }
    }
}

/// Turn recorded phases back into bytes, MSB first.
///
/// A phase pair whose high time exceeds `high_threshold` cycles is a `1`.
/// Trailing phases that do not fill a whole byte are ignored.
#[must_use]
pub fn decode_bytes(phases: &[PhaseCycles], high_threshold: u32) -> Vec<u8> {
    phases
        .chunks_exact(BITS_PER_CHANNEL)
        .map(|byte_phases| {
            byte_phases.iter().fold(0u8, |byte, phase| {
                (byte << 1) | u8::from(phase.high > high_threshold)
            })
        })
        .collect()
}
