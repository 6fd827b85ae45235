//! Error types for engine construction and host configuration.

use thiserror::Error;

/// Errors that can occur while setting up a sort.
///
/// Stepping a validly initialized engine never fails, all fallibility is concentrated at
/// construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    /// A negative element count was requested.
    #[error("invalid length {0}: length must not be negative")]
    InvalidLength(isize),

    /// An index or length reaches past the end of the buffer.
    /// Raised by the checked constructors; inside an engine this is a bug and panics instead.
    #[error("index {index} is out of range for a buffer of length {len}")]
    OutOfRangeAccess { index: usize, len: usize },

    #[error("unknown algorithm `{0}`, expected one of selection, insertion, merge, quick")]
    UnknownAlgorithm(String),

    #[error("invalid value range: min {min} is greater than max {max}")]
    InvalidValueRange { min: i32, max: i32 },
}
