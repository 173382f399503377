//! Backend registration and dispatch
//!
//! This module provides a centralized registry for the bus and power
//! backends, with support for feature-gated inclusion and dynamic help text
//! generation.

use vgacam_core::bus::RegisterBus;
use vgacam_core::power::PowerBackend;

/// Information about a backend
pub struct BackendInfo {
    /// Primary name (used for matching)
    pub name: &'static str,
    /// Alternative names/aliases
    pub aliases: &'static [&'static str],
    /// Short description
    pub description: &'static str,
}

/// Get information about all available bus backends (enabled at compile time)
#[allow(unused_mut, clippy::vec_init_then_push)]
pub fn available_bus_backends() -> Vec<BackendInfo> {
    let mut backends = Vec::new();

    #[cfg(feature = "dummy")]
    backends.push(BackendInfo {
        name: "dummy",
        aliases: &[],
        description: "In-memory sensor emulator for testing",
    });

    #[cfg(feature = "linux-i2c")]
    backends.push(BackendInfo {
        name: "i2c",
        aliases: &["linux_i2c", "i2cdev"],
        description: "Linux i2c-dev interface (dev=/dev/i2c-N,addr=<0x..>)",
    });

    backends
}

/// Get information about all available power backends (enabled at compile time)
#[allow(unused_mut, clippy::vec_init_then_push)]
pub fn available_power_backends() -> Vec<BackendInfo> {
    let mut backends = Vec::new();

    #[cfg(feature = "dummy")]
    backends.push(BackendInfo {
        name: "dummy",
        aliases: &[],
        description: "Recording power backend with no hardware side effects",
    });

    #[cfg(feature = "linux-gpio")]
    backends.push(BackendInfo {
        name: "gpio",
        aliases: &["linux_gpio"],
        description:
            "Linux GPIO character device (dev=/dev/gpiochipN,analog=..,standby=..,enable=..,\
             creset=..,reset=..,clock=..,ram=..,core=..,io=..,af=..[,scl=..])",
    });

    backends
}

/// Generate help text listing all available backends
pub fn backend_help() -> String {
    let mut help = String::from("Available bus backends:\n");
    for b in &available_bus_backends() {
        help.push_str(&format!("  {:12} - {}\n", b.name, b.description));
    }
    help.push_str("\nAvailable power backends:\n");
    for b in &available_power_backends() {
        help.push_str(&format!("  {:12} - {}\n", b.name, b.description));
    }
    help
}

/// Generate a short list of backend names for CLI help
pub fn backend_names_short(backends: &[BackendInfo]) -> String {
    let names: Vec<&str> = backends.iter().map(|b| b.name).collect();
    names.join(", ")
}

/// Parse a backend string into name and options
///
/// Format: "name" or "name:option1=value1,option2=value2"
pub fn parse_backend_string(s: &str) -> (&str, Vec<(&str, &str)>) {
    if let Some((name, opts)) = s.split_once(':') {
        let options: Vec<_> = opts
            .split(',')
            .filter_map(|opt| opt.split_once('='))
            .collect();
        (name, options)
    } else {
        (s, Vec::new())
    }
}

/// Open a register bus from a backend string
#[allow(unused_variables)]
pub fn open_bus(spec: &str) -> Result<Box<dyn RegisterBus>, Box<dyn std::error::Error>> {
    let (name, options) = parse_backend_string(spec);

    match name {
        #[cfg(feature = "dummy")]
        "dummy" => Ok(Box::new(vgacam_dummy::DummyBus::new())),

        #[cfg(feature = "linux-i2c")]
        "i2c" | "linux_i2c" | "i2cdev" => {
            log::info!("Opening Linux I2C bus...");
            vgacam_linux_i2c::open_linux_i2c(&options).map_err(|e| {
                format!(
                    "Failed to open Linux I2C bus: {}\n\
                     Make sure the adapter exists and you have read/write permissions.\n\
                     You may need to: sudo usermod -aG i2c $USER",
                    e
                )
                .into()
            })
        }

        _ => Err(unknown_backend_error("bus", name)),
    }
}

/// Open a power backend from a backend string
#[allow(unused_variables)]
pub fn open_power(spec: &str) -> Result<Box<dyn PowerBackend>, Box<dyn std::error::Error>> {
    let (name, options) = parse_backend_string(spec);

    match name {
        #[cfg(feature = "dummy")]
        "dummy" => Ok(Box::new(vgacam_dummy::DummyPower::new())),

        #[cfg(feature = "linux-gpio")]
        "gpio" | "linux_gpio" => {
            log::info!("Opening Linux GPIO power backend...");
            vgacam_linux_gpio::open_linux_gpio(&options).map_err(|e| {
                format!(
                    "Failed to open Linux GPIO power backend: {}\n\
                     Make sure the chip exists and you have read/write permissions.",
                    e
                )
                .into()
            })
        }

        _ => Err(unknown_backend_error("power", name)),
    }
}

fn unknown_backend_error(kind: &str, name: &str) -> Box<dyn std::error::Error> {
    let mut msg = format!("Unknown {} backend: {}\n\n", kind, name);
    msg.push_str(&backend_help());
    msg.push_str("\nUse 'vgacam list-backends' for more details");
    msg.into()
}
