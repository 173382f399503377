//! Error types for vgacam-core
//!
//! This module provides a no_std compatible error type that can be used
//! throughout the crate.

use core::fmt;

/// Core error type - no_std compatible, Copy for efficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Bus transaction failed after the retry budget was exhausted
    Transport,
    /// Named block was not found in the tuning table
    BlockNotFound,
    /// Tuning table entry was truncated, unterminated or not valid hex
    MalformedEntry,
    /// A power-control GPIO line could not be acquired or driven
    GpioUnavailable,
    /// Sensor initialization failed (device ID read or init program dispatch)
    InitFailed,
    /// A register program aborted mid-sequence. `completed` entries were
    /// applied before the failure and are not rolled back; the sensor is
    /// left in a partial configuration until the next successful init.
    PartiallyApplied {
        /// Number of entries (writes and delays) fully executed
        completed: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => write!(f, "bus transaction failed"),
            Self::BlockNotFound => write!(f, "tuning block not found"),
            Self::MalformedEntry => write!(f, "malformed tuning table entry"),
            Self::GpioUnavailable => write!(f, "power control GPIO unavailable"),
            Self::InitFailed => write!(f, "sensor initialization failed"),
            Self::PartiallyApplied { completed } => {
                write!(f, "register program aborted after {} entries", completed)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;
