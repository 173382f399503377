//! Linux I2C device implementation
//!
//! This module provides the `LinuxI2cBus` struct that implements the
//! `RegisterBus` trait using Linux's i2c-dev interface.

use crate::error::{LinuxI2cError, Result};

use i2cdev::core::I2CDevice;
use i2cdev::linux::LinuxI2CDevice;

use vgacam_core::bus::RegisterBus;
use vgacam_core::error::{Error as CoreError, Result as CoreResult};

/// Default 7-bit slave address of the sensor
const DEFAULT_ADDR: u16 = 0x30;

/// Configuration for opening a Linux I2C register bus
#[derive(Debug, Clone)]
pub struct LinuxI2cConfig {
    /// Adapter device path (e.g., "/dev/i2c-1")
    pub device: String,
    /// 7-bit slave address (default: 0x30)
    pub addr: u16,
}

impl Default for LinuxI2cConfig {
    fn default() -> Self {
        Self {
            device: String::new(),
            addr: DEFAULT_ADDR,
        }
    }
}

impl LinuxI2cConfig {
    /// Create a new configuration with the given adapter path
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            ..Default::default()
        }
    }

    /// Set the 7-bit slave address
    pub fn with_addr(mut self, addr: u16) -> Self {
        self.addr = addr;
        self
    }
}

/// Linux I2C register bus using the i2c-dev interface
///
/// Register access is the sensor's two-byte convention: a write transfers
/// `[sub-address, value]`, a read writes the sub-address and then reads one
/// byte back.
pub struct LinuxI2cBus {
    dev: LinuxI2CDevice,
    addr: u16,
}

impl LinuxI2cBus {
    /// Open a Linux I2C adapter with the given configuration
    pub fn open(config: &LinuxI2cConfig) -> Result<Self> {
        if config.device.is_empty() {
            return Err(LinuxI2cError::NoDevice);
        }
        if config.addr > 0x7F {
            return Err(LinuxI2cError::InvalidAddress(config.addr));
        }

        log::debug!("linux_i2c: Opening adapter {}", config.device);

        let dev = LinuxI2CDevice::new(&config.device, config.addr).map_err(|e| {
            LinuxI2cError::OpenFailed {
                path: config.device.clone(),
                source: e,
            }
        })?;

        log::info!(
            "linux_i2c: Opened {} (addr=0x{:02x})",
            config.device,
            config.addr
        );

        Ok(Self {
            dev,
            addr: config.addr,
        })
    }

    /// Open an adapter with the default slave address
    pub fn open_device(device: &str) -> Result<Self> {
        Self::open(&LinuxI2cConfig::new(device))
    }

    /// The configured slave address
    pub fn addr(&self) -> u16 {
        self.addr
    }
}

impl RegisterBus for LinuxI2cBus {
    fn write(&mut self, addr: u8, value: u8) -> CoreResult<()> {
        log::trace!("linux_i2c: write 0x{:02x} = 0x{:02x}", addr, value);
        self.dev.write(&[addr, value]).map_err(|e| {
            log::debug!("linux_i2c: write 0x{:02x} failed: {}", addr, e);
            CoreError::Transport
        })
    }

    fn read(&mut self, addr: u8) -> CoreResult<u8> {
        self.dev.write(&[addr]).map_err(|e| {
            log::debug!("linux_i2c: sub-address 0x{:02x} write failed: {}", addr, e);
            CoreError::Transport
        })?;
        let mut buf = [0u8; 1];
        self.dev.read(&mut buf).map_err(|e| {
            log::debug!("linux_i2c: read 0x{:02x} failed: {}", addr, e);
            CoreError::Transport
        })?;
        log::trace!("linux_i2c: read 0x{:02x} = 0x{:02x}", addr, buf[0]);
        Ok(buf[0])
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(ms as u64));
    }
}

/// Parse a numeric option that may be hex (`0x..`) or decimal
fn parse_u16(value: &str) -> Option<u16> {
    if let Some(hex) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        u16::from_str_radix(hex, 16).ok()
    } else {
        value.parse().ok()
    }
}

/// Parse backend options from a list of key-value pairs
///
/// # Supported Options
///
/// - `dev=/dev/i2c-N` - Required: adapter device path
/// - `addr=0x30` - Optional: 7-bit slave address (hex or decimal)
pub fn parse_options(options: &[(&str, &str)]) -> std::result::Result<LinuxI2cConfig, String> {
    let mut config = LinuxI2cConfig::default();

    for (key, value) in options {
        match *key {
            "dev" => {
                config.device = value.to_string();
            }
            "addr" => {
                let addr =
                    parse_u16(value).ok_or_else(|| format!("Invalid addr value: {}", value))?;
                if addr > 0x7F {
                    return Err(format!("Invalid slave address: 0x{:02x} (must be 7-bit)", addr));
                }
                config.addr = addr;
            }
            _ => {
                log::warn!("linux_i2c: Unknown option: {}={}", key, value);
            }
        }
    }

    if config.device.is_empty() {
        return Err("No device specified. Use dev=/dev/i2c-N".to_string());
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_requires_a_device() {
        assert!(parse_options(&[]).is_err());
        assert!(parse_options(&[("addr", "0x30")]).is_err());
    }

    #[test]
    fn parse_defaults_the_slave_address() {
        let config = parse_options(&[("dev", "/dev/i2c-1")]).unwrap();
        assert_eq!(config.device, "/dev/i2c-1");
        assert_eq!(config.addr, DEFAULT_ADDR);
    }

    #[test]
    fn parse_accepts_hex_and_decimal_addresses() {
        let config = parse_options(&[("dev", "/dev/i2c-1"), ("addr", "0x21")]).unwrap();
        assert_eq!(config.addr, 0x21);
        let config = parse_options(&[("dev", "/dev/i2c-1"), ("addr", "33")]).unwrap();
        assert_eq!(config.addr, 33);
    }

    #[test]
    fn parse_rejects_non_7bit_addresses() {
        assert!(parse_options(&[("dev", "/dev/i2c-1"), ("addr", "0x80")]).is_err());
    }
}
