//! Supply voltage from a raw analog reading.
//!
//! The supply reaches the analog input through a resistor divider. Multiplying the raw
//! reading by [`MILLIVOLTS_SCALE`] and shifting right by [`MILLIVOLTS_SHIFT`] undoes the
//! divider: a 12.2 V battery reads about 700 and a 4.71 V supply about 270.
//!
//! ```rust
//! use xmas_lights::voltage::Millivolts;
//!
//! let battery = Millivolts::from_raw(700);
//! assert_eq!(battery, Millivolts(12_200));
//! assert_eq!(battery.to_text::<8>()?.as_str(), "12.20V");
//! # Ok::<(), xmas_lights::Error>(())
//! ```

use core::fmt::{self, Write as _};

use heapless::String;

use crate::{Error, Result};

/// Multiplier from raw reading to millivolts, before the shift.
pub const MILLIVOLTS_SCALE: u32 = 4462;

/// Right shift applied after [`MILLIVOLTS_SCALE`].
pub const MILLIVOLTS_SHIFT: u32 = 8;

/// A voltage in millivolts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Millivolts(pub u32);

impl Millivolts {
    /// Convert a raw analog reading.
    #[must_use]
    pub const fn from_raw(raw: u16) -> Self {
        Self((raw as u32 * MILLIVOLTS_SCALE) >> MILLIVOLTS_SHIFT)
    }

    /// Whole volts.
    #[must_use]
    pub const fn volts(self) -> u32 {
        self.0 / 1000
    }

    /// Hundredths of a volt past [`Self::volts`].
    #[must_use]
    pub const fn centivolts(self) -> u32 {
        self.0 % 1000 / 10
    }

    /// Render as `"V.ccV"` into a fixed-capacity string.
    ///
    /// # Errors
    ///
    /// [`Error::TextCapacity`] if the text needs more than `N` bytes.
    pub fn to_text<const N: usize>(self) -> Result<String<N>> {
        let mut text = String::new();
        write!(text, "{self}").map_err(|_| Error::TextCapacity { capacity: N })?;
        Ok(text)
    }
}

impl fmt::Display for Millivolts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}V", self.volts(), self.centivolts())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Millivolts {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(f, "{=u32}mV", self.0);
    }
}
