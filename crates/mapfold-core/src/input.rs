//! Input unit and input source traits.
//!
//! An `InputUnit` is one independently readable piece of raw data. An
//! `InputSource` interprets a [`Config`] and enumerates units lazily; the
//! resulting iterator is forward-only and is consumed exactly once by the
//! worker factory.

use std::io;

use crate::config::Config;
use crate::error::MapReduceError;

/// One discoverable, independently readable piece of raw input.
pub trait InputUnit: Send {
    /// Identifier sufficient to re-open the underlying data (a path, a
    /// byte range, a buffer name). Used to attribute failures.
    fn id(&self) -> String;

    /// Read the raw contents.
    ///
    /// Owning workers call this at most once.
    fn read(&self) -> io::Result<Vec<u8>>;
}

/// Produces input units from a configuration.
pub trait InputSource {
    /// The unit type this source yields.
    type Unit: InputUnit;

    /// Lazy sequence of units. An `Err` item is a discovery failure for
    /// that position in the enumeration.
    type Units: Iterator<Item = Result<Self::Unit, MapReduceError>>;

    /// Enumerate units for `config`.
    ///
    /// Yielding zero units is not an error here; the caller decides.
    fn generate(&self, config: &Config) -> Result<Self::Units, MapReduceError>;
}
