//! vgacam-linux-gpio - Linux GPIO power sequencing support
//!
//! This crate provides the sensor's power-control backend on top of Linux's
//! GPIO character device interface (`/dev/gpiochipN`), via the gpiocdev
//! crate.
//!
//! # Usage with vgacam CLI
//!
//! ```bash
//! vgacam power-on --power \
//!     gpio:dev=/dev/gpiochip0,analog=2,standby=3,enable=4,creset=5,reset=6,clock=7,ram=8,core=9,io=10,af=11
//! ```
//!
//! An optional `scl=N` line enables the 9-pulse bus-clear run at the end of
//! every power-off.
//!
//! # System Requirements
//!
//! - Linux kernel with the GPIO character device interface
//! - Read/write access to `/dev/gpiochipN`

pub mod device;
pub mod error;

// Re-exports
pub use device::{parse_options, LinuxGpioPower, LinuxGpioPowerConfig};
pub use error::{LinuxGpioError, Result};

/// Open a Linux GPIO power backend and return it boxed
///
/// This is a convenience function for use in the CLI backend dispatch.
///
/// # Arguments
///
/// * `options` - Slice of (key, value) pairs from backend string parsing
pub fn open_linux_gpio(
    options: &[(&str, &str)],
) -> std::result::Result<Box<dyn vgacam_core::power::PowerBackend>, Box<dyn std::error::Error>> {
    let config = parse_options(options)?;
    let power = LinuxGpioPower::new(config)?;
    Ok(Box::new(power))
}
