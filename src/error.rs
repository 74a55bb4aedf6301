use derive_more::{Display, Error};

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors from the few fallible operations in this crate.
///
/// Animation and frame encoding never fail; these cover the voltage text and the
/// analog reading that feeds it.
#[derive(Debug, Display, Error)]
pub enum Error {
    /// Formatted text did not fit in the fixed-capacity string.
    #[display("text does not fit in {capacity} bytes")]
    TextCapacity {
        /// Capacity of the destination string in bytes.
        capacity: usize,
    },

    /// The analog-to-digital converter did not return a reading.
    #[display("analog read failed")]
    AnalogRead,
}
