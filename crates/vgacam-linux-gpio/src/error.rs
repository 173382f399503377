//! Error types for Linux GPIO power operations

use thiserror::Error;

/// Linux GPIO specific errors
#[derive(Debug, Error)]
pub enum LinuxGpioError {
    /// Device not specified
    #[error("No device specified. Use dev=/dev/gpiochipN")]
    NoDevice,

    /// GPIO line request failed
    #[error("GPIO line request failed: {0}")]
    LineRequestFailed(#[source] gpiocdev::Error),

    /// Setting a line value failed
    #[error("Failed to set line {offset}: {source}")]
    SetLineFailed {
        offset: u32,
        #[source]
        source: gpiocdev::Error,
    },
}

/// Result type for Linux GPIO operations
pub type Result<T> = std::result::Result<T, LinuxGpioError>;
