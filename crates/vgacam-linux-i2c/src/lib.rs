//! vgacam-linux-i2c - Linux i2c-dev support
//!
//! This crate provides register-bus access to the sensor through the Linux
//! i2c-dev character device interface (`/dev/i2c-N`).
//!
//! # Example
//!
//! ```no_run
//! use vgacam_linux_i2c::{LinuxI2cBus, LinuxI2cConfig};
//!
//! // Open with the default slave address (0x30)
//! let mut bus = LinuxI2cBus::open_device("/dev/i2c-1")?;
//!
//! // Or with an explicit address
//! let config = LinuxI2cConfig::new("/dev/i2c-1").with_addr(0x30);
//! let mut bus = LinuxI2cBus::open(&config)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Usage with vgacam CLI
//!
//! ```bash
//! vgacam init --bus i2c:dev=/dev/i2c-1
//! vgacam set frame-rate 15 --bus i2c:dev=/dev/i2c-1,addr=0x30
//! ```
//!
//! # System Requirements
//!
//! - Linux kernel with i2c-dev support enabled (`CONFIG_I2C_CHARDEV`)
//! - Read/write access to `/dev/i2c-N`

pub mod device;
pub mod error;

// Re-exports
pub use device::{parse_options, LinuxI2cBus, LinuxI2cConfig};
pub use error::{LinuxI2cError, Result};

/// Open a Linux I2C adapter and return a boxed RegisterBus
///
/// This is a convenience function for use in the CLI backend dispatch.
///
/// # Arguments
///
/// * `options` - Slice of (key, value) pairs from backend string parsing
pub fn open_linux_i2c(
    options: &[(&str, &str)],
) -> std::result::Result<Box<dyn vgacam_core::bus::RegisterBus>, Box<dyn std::error::Error>> {
    let config = parse_options(options)?;
    let bus = LinuxI2cBus::open(&config)?;
    Ok(Box::new(bus))
}
