//! Error types for Linux I2C operations

use thiserror::Error;

/// Linux I2C specific errors
#[derive(Debug, Error)]
pub enum LinuxI2cError {
    /// Failed to open the adapter device
    #[error("Failed to open {path}: {source}")]
    OpenFailed {
        path: String,
        #[source]
        source: i2cdev::linux::LinuxI2CError,
    },

    /// Device not specified
    #[error("No device specified. Use dev=/dev/i2c-N")]
    NoDevice,

    /// Slave address outside the 7-bit range
    #[error("Invalid slave address 0x{0:02x} (must be 7-bit)")]
    InvalidAddress(u16),
}

/// Result type for Linux I2C operations
pub type Result<T> = std::result::Result<T, LinuxI2cError>;
