//! CLI argument parsing

use crate::backends;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use vgacam_core::controls::ControlKind;

/// Generate dynamic help text for the bus argument
fn bus_help() -> String {
    format!(
        "Bus backend to use [available: {}]",
        backends::backend_names_short(&backends::available_bus_backends())
    )
}

/// Generate dynamic help text for the power argument
fn power_help() -> String {
    format!(
        "Power backend to use [available: {}]",
        backends::backend_names_short(&backends::available_power_backends())
    )
}

#[derive(Parser)]
#[command(name = "vgacam")]
#[command(author, version, about = "VGA camera sensor configuration tool", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Bus backend, e.g. "dummy" or "i2c:dev=/dev/i2c-1,addr=0x30"
    #[arg(short, long, global = true, default_value = "dummy", help = bus_help())]
    pub bus: String,

    /// Power backend, e.g. "dummy" or "gpio:dev=/dev/gpiochip0,..."
    #[arg(short, long, global = true, default_value = "dummy", help = power_help())]
    pub power: String,

    /// Tuning table file; when present, programs are interpreted from it
    /// instead of the compiled-in tables
    #[arg(short, long, global = true)]
    pub table: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// User-facing control names
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ControlArg {
    /// Exposure bias (-4 ..= 4)
    Exposure,
    /// White balance preset (0=auto, 1=sunny, 2=cloudy, 3=tungsten, 4=fluorescent)
    WhiteBalance,
    /// Color effect (0=none, 1=gray, 2=sepia, 3=aqua, 4=negative)
    Effect,
    /// Frame rate in fps (7, 10 or 15)
    FrameRate,
    /// Blur level (0 ..= 3)
    Blur,
    /// Video-telephony profile (0=off, 1=on)
    VtMode,
    /// Data-line test pattern (0=off, 1=on)
    DatalineTest,
    /// Stop the data-line test (value ignored)
    DatalineStop,
}

impl ControlArg {
    /// The core control kind this argument names
    pub fn kind(self) -> ControlKind {
        match self {
            Self::Exposure => ControlKind::Exposure,
            Self::WhiteBalance => ControlKind::WhiteBalance,
            Self::Effect => ControlKind::Effect,
            Self::FrameRate => ControlKind::FrameRate,
            Self::Blur => ControlKind::Blur,
            Self::VtMode => ControlKind::VtMode,
            Self::DatalineTest => ControlKind::DatalineTest,
            Self::DatalineStop => ControlKind::DatalineStop,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the power-on sequence
    PowerOn,

    /// Run the power-off sequence
    PowerOff,

    /// Power on and initialize the sensor
    Init,

    /// Power-cycle and re-initialize the sensor
    Reset,

    /// Initialize the sensor and start preview output
    Preview,

    /// Apply a control value
    Set {
        /// Control to set
        #[arg(value_enum)]
        control: ControlArg,

        /// Raw control value
        #[arg(default_value_t = 0, allow_hyphen_values = true)]
        value: i32,
    },

    /// Show sensor state after initialization
    Status,

    /// List supported backends
    ListBackends,
}
