//! Linux GPIO power backend implementation
//!
//! This module provides the `LinuxGpioPower` struct that implements the
//! `PowerBackend` trait using Linux's GPIO character device interface
//! (gpiocdev).
//!
//! Each power-control line of the sensor module (supply switches, standby,
//! resets, clock gate) maps to one line offset on a GPIO chip. Regulator
//! enables are plain GPIO lines too; boards with a PMIC expose the enable
//! pins through a gpiochip expander.

use crate::error::{LinuxGpioError, Result};

use gpiocdev::line::{Offset, Value};
use gpiocdev::request::{Config, Request};

use vgacam_core::error::{Error as CoreError, Result as CoreResult};
use vgacam_core::power::{PowerBackend, PowerLine, Regulator};

/// Number of SCL pulses used to clear a wedged bus
const BUS_CLEAR_PULSES: u32 = 9;

/// Half-period of the bus-clear clock in microseconds (~100 kHz)
const BUS_CLEAR_HALF_PERIOD_US: u64 = 5;

/// Configuration for opening a Linux GPIO power backend
#[derive(Debug, Clone)]
pub struct LinuxGpioPowerConfig {
    /// Device path (e.g., "/dev/gpiochip0")
    pub device: String,
    /// Analog supply switch line offset
    pub analog: Offset,
    /// Standby line offset
    pub standby: Offset,
    /// Companion-chip enable line offset
    pub enable: Offset,
    /// Companion-chip reset line offset
    pub companion_reset: Offset,
    /// Sensor reset line offset
    pub reset: Offset,
    /// Master clock gate line offset
    pub clock: Offset,
    /// RAM regulator enable line offset
    pub ram: Offset,
    /// Core regulator enable line offset
    pub core: Offset,
    /// I/O regulator enable line offset
    pub io: Offset,
    /// AF regulator enable line offset
    pub af: Offset,
    /// Bus SCL line offset for bus-clear recovery (optional)
    pub scl: Option<Offset>,
}

/// Linux GPIO power backend
///
/// Lines are requested on [`PowerBackend::acquire`] and dropped on
/// [`PowerBackend::release`]; holding them only for the duration of a
/// transition leaves the chip free for other consumers in between.
pub struct LinuxGpioPower {
    config: LinuxGpioPowerConfig,
    request: Option<Request>,
}

impl LinuxGpioPower {
    /// Create a backend over the given configuration
    ///
    /// No lines are requested until the first transition.
    pub fn new(config: LinuxGpioPowerConfig) -> Result<Self> {
        if config.device.is_empty() {
            return Err(LinuxGpioError::NoDevice);
        }
        log::debug!("linux_gpio: power backend on {}", config.device);
        Ok(Self {
            config,
            request: None,
        })
    }

    fn offset_for_line(&self, line: PowerLine) -> Offset {
        match line {
            PowerLine::AnalogPower => self.config.analog,
            PowerLine::Standby => self.config.standby,
            PowerLine::Enable => self.config.enable,
            PowerLine::CompanionReset => self.config.companion_reset,
            PowerLine::Reset => self.config.reset,
        }
    }

    fn offset_for_regulator(&self, regulator: Regulator) -> Offset {
        match regulator {
            Regulator::Ram1v8 => self.config.ram,
            Regulator::Core1v2 => self.config.core,
            Regulator::Io2v8 => self.config.io,
            Regulator::Af2v8 => self.config.af,
        }
    }

    fn set(&mut self, offset: Offset, high: bool) -> CoreResult<()> {
        let request = self.request.as_ref().ok_or(CoreError::GpioUnavailable)?;
        let value = if high { Value::Active } else { Value::Inactive };
        request.set_value(offset, value).map_err(|e| {
            log::error!("linux_gpio: failed to set line {}: {}", offset, e);
            CoreError::GpioUnavailable
        })?;
        Ok(())
    }

    /// Pulse SCL to release a slave holding SDA low
    fn bus_clear(&self, scl: Offset) -> Result<()> {
        let mut cfg = Config::default();
        cfg.with_line(scl).as_output(Value::Active);
        let request = Request::from_config(cfg)
            .on_chip(&self.config.device)
            .with_consumer("vgacam-busclear")
            .request()
            .map_err(LinuxGpioError::LineRequestFailed)?;

        for _ in 0..BUS_CLEAR_PULSES {
            request
                .set_value(scl, Value::Inactive)
                .map_err(|e| LinuxGpioError::SetLineFailed {
                    offset: scl,
                    source: e,
                })?;
            std::thread::sleep(std::time::Duration::from_micros(BUS_CLEAR_HALF_PERIOD_US));
            request
                .set_value(scl, Value::Active)
                .map_err(|e| LinuxGpioError::SetLineFailed {
                    offset: scl,
                    source: e,
                })?;
            std::thread::sleep(std::time::Duration::from_micros(BUS_CLEAR_HALF_PERIOD_US));
        }
        // request drops here, returning SCL to the bus controller
        Ok(())
    }
}

impl PowerBackend for LinuxGpioPower {
    fn acquire(&mut self) -> CoreResult<()> {
        if self.request.is_some() {
            return Ok(());
        }

        // All power-control lines as outputs, preserving no prior state:
        // the sequencer drives every line it cares about explicitly.
        let mut cfg = Config::default();
        for offset in [
            self.config.analog,
            self.config.standby,
            self.config.enable,
            self.config.companion_reset,
            self.config.reset,
            self.config.clock,
            self.config.ram,
            self.config.core,
            self.config.io,
            self.config.af,
        ] {
            cfg.with_line(offset).as_output(Value::Inactive);
        }

        let request = Request::from_config(cfg)
            .on_chip(&self.config.device)
            .with_consumer("vgacam")
            .request()
            .map_err(|e| {
                log::error!("linux_gpio: line request failed: {}", e);
                CoreError::GpioUnavailable
            })?;

        self.request = Some(request);
        Ok(())
    }

    fn release(&mut self) {
        self.request = None;
    }

    fn set_line(&mut self, line: PowerLine, high: bool) -> CoreResult<()> {
        log::trace!("linux_gpio: {:?} -> {}", line, high);
        self.set(self.offset_for_line(line), high)
    }

    fn set_regulator(&mut self, regulator: Regulator, on: bool) -> CoreResult<()> {
        log::trace!("linux_gpio: {:?} -> {}", regulator, on);
        self.set(self.offset_for_regulator(regulator), on)
    }

    fn set_clock(&mut self, enabled: bool) -> CoreResult<()> {
        log::trace!("linux_gpio: clock -> {}", enabled);
        self.set(self.config.clock, enabled)
    }

    fn recover_bus(&mut self) -> CoreResult<()> {
        match self.config.scl {
            Some(scl) => {
                log::debug!("linux_gpio: bus clear on SCL line {}", scl);
                self.bus_clear(scl).map_err(|e| {
                    log::error!("linux_gpio: bus clear failed: {}", e);
                    CoreError::GpioUnavailable
                })
            }
            None => {
                log::debug!("linux_gpio: no SCL line configured, skipping bus clear");
                Ok(())
            }
        }
    }

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(std::time::Duration::from_micros(us as u64));
    }
}

/// Parse backend options from a list of key-value pairs
///
/// # Supported Options
///
/// - `dev=/dev/gpiochipN` - GPIO chip device path (required, or use gpiochip)
/// - `gpiochip=N` - GPIO chip number (alternative to dev)
/// - `analog=N` - Analog supply switch line offset (required)
/// - `standby=N` - Standby line offset (required)
/// - `enable=N` - Companion enable line offset (required)
/// - `creset=N` - Companion reset line offset (required)
/// - `reset=N` - Sensor reset line offset (required)
/// - `clock=N` - Master clock gate line offset (required)
/// - `ram=N` / `core=N` / `io=N` / `af=N` - Regulator enables (required)
/// - `scl=N` - Bus SCL line for bus-clear recovery (optional)
pub fn parse_options(
    options: &[(&str, &str)],
) -> std::result::Result<LinuxGpioPowerConfig, String> {
    let mut device = String::new();
    let mut gpiochip: Option<u32> = None;
    let mut lines: [Option<Offset>; 10] = [None; 10];
    let mut scl: Option<Offset> = None;
    const NAMES: [&str; 10] = [
        "analog", "standby", "enable", "creset", "reset", "clock", "ram", "core", "io", "af",
    ];

    for (key, value) in options {
        if let Some(slot) = NAMES.iter().position(|n| n == key) {
            lines[slot] = Some(
                value
                    .parse()
                    .map_err(|_| format!("Invalid {} value: {}", key, value))?,
            );
            continue;
        }
        match *key {
            "dev" => {
                device = value.to_string();
            }
            "gpiochip" => {
                gpiochip = Some(
                    value
                        .parse()
                        .map_err(|_| format!("Invalid gpiochip value: {}", value))?,
                );
            }
            "scl" => {
                scl = Some(
                    value
                        .parse()
                        .map_err(|_| format!("Invalid scl value: {}", value))?,
                );
            }
            _ => {
                log::warn!("linux_gpio: Unknown option: {}={}", key, value);
            }
        }
    }

    // Handle dev vs gpiochip
    if device.is_empty() {
        if let Some(n) = gpiochip {
            device = format!("/dev/gpiochip{}", n);
        } else {
            return Err("Either 'dev' or 'gpiochip' must be specified.\n\
                 e.g. gpio:dev=/dev/gpiochip0,analog=2,standby=3,enable=4,creset=5,reset=6,\
                 clock=7,ram=8,core=9,io=10,af=11"
                .to_string());
        }
    } else if gpiochip.is_some() {
        return Err("Only one of 'dev' or 'gpiochip' can be specified".to_string());
    }

    for (slot, name) in NAMES.iter().enumerate() {
        if lines[slot].is_none() {
            return Err(format!("Missing required parameter: {}", name));
        }
    }

    Ok(LinuxGpioPowerConfig {
        device,
        analog: lines[0].unwrap(),
        standby: lines[1].unwrap(),
        enable: lines[2].unwrap(),
        companion_reset: lines[3].unwrap(),
        reset: lines[4].unwrap(),
        clock: lines[5].unwrap(),
        ram: lines[6].unwrap(),
        core: lines[7].unwrap(),
        io: lines[8].unwrap(),
        af: lines[9].unwrap(),
        scl,
    })
}
