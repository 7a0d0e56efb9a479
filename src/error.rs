use std::fmt;

use crate::types::Offset;

/// Unified error type for the skip log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The log holds no entries.
    EmptyLog,
    /// No entry is stored under the queried offset.
    OffsetNotFound(Offset),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyLog => write!(f, "log is empty"),
            Error::OffsetNotFound(offset) => write!(f, "offset not found: {offset}"),
        }
    }
}

impl std::error::Error for Error {}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
