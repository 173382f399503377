//! Sensor runtime state

use crate::controls::{BlurLevel, ColorEffect, ExposureBias, FrameRate, WhiteBalance};

/// Default crystal frequency when the platform does not specify one
pub const DEFAULT_CRYSTAL_HZ: u32 = 24_000_000;

/// Physical data bus of the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusMode {
    /// ITU-R 656/601 parallel output
    Parallel,
    /// MIPI CSI-2 single lane
    Serial,
}

/// Outcome of the last preview initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewStatus {
    /// Last init dispatched its program successfully
    Ok,
    /// Last init failed; preview must not be started
    Failed,
}

/// A discrete frame-size descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    /// Index into [`FRAME_SIZES`]
    pub index: usize,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Supported frame sizes. The sensor delivers a single fixed VGA size.
pub const FRAME_SIZES: &[FrameSize] = &[FrameSize {
    index: 0,
    width: 640,
    height: 480,
}];

/// Snapshot of the user-facing control values last applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserSettings {
    /// Exposure bias
    pub exposure: ExposureBias,
    /// White balance preset
    pub white_balance: WhiteBalance,
    /// Color effect
    pub effect: ColorEffect,
    /// Frame rate
    pub frame_rate: FrameRate,
    /// Blur level
    pub blur: BlurLevel,
}

/// Mutable sensor state carried by the session
#[derive(Debug, Clone, Copy)]
pub struct SensorState {
    /// Index of the current frame size in [`FRAME_SIZES`]
    pub framesize_index: usize,
    /// Crystal (MCLK) frequency in Hz
    pub crystal_hz: u32,
    /// Physical bus mode
    pub bus_mode: BusMode,
    /// Video-telephony profile selected
    pub vt_mode: bool,
    /// Data-line test pattern requested
    pub dataline_test: bool,
    /// Result of the last preview init
    pub last_preview_init: PreviewStatus,
    /// Last applied user control values
    pub user: UserSettings,
}

impl Default for SensorState {
    fn default() -> Self {
        Self {
            framesize_index: 0,
            crystal_hz: DEFAULT_CRYSTAL_HZ,
            bus_mode: BusMode::Parallel,
            vt_mode: false,
            dataline_test: false,
            last_preview_init: PreviewStatus::Ok,
            user: UserSettings::default(),
        }
    }
}

impl SensorState {
    /// Current frame-size descriptor
    pub fn frame_size(&self) -> FrameSize {
        FRAME_SIZES[self.framesize_index]
    }
}
