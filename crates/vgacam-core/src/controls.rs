//! Control surface mapping
//!
//! Discrete control values map to register programs through lookup tables
//! rather than per-control switch blocks. Exposure, frame rate and blur have
//! separate video-telephony variants; the VT flag picks the table, the value
//! picks the row.

use crate::program::RegisterProgram;
use crate::programs;

/// Exposure bias steps (EV -4 .. +4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExposureBias {
    /// EV -4
    Minus4,
    /// EV -3
    Minus3,
    /// EV -2
    Minus2,
    /// EV -1
    Minus1,
    /// EV 0
    #[default]
    Zero,
    /// EV +1
    Plus1,
    /// EV +2
    Plus2,
    /// EV +3
    Plus3,
    /// EV +4
    Plus4,
}

impl ExposureBias {
    /// Map a raw control value (-4 ..= 4) to a bias step
    pub fn from_raw(value: i32) -> Option<Self> {
        Some(match value {
            -4 => Self::Minus4,
            -3 => Self::Minus3,
            -2 => Self::Minus2,
            -1 => Self::Minus1,
            0 => Self::Zero,
            1 => Self::Plus1,
            2 => Self::Plus2,
            3 => Self::Plus3,
            4 => Self::Plus4,
            _ => return None,
        })
    }
}

/// White balance presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WhiteBalance {
    /// Automatic white balance
    #[default]
    Auto,
    /// Daylight
    Sunny,
    /// Cloudy
    Cloudy,
    /// Tungsten
    Tungsten,
    /// Fluorescent
    Fluorescent,
}

impl WhiteBalance {
    /// Map a raw control value (0 ..= 4) to a preset
    pub fn from_raw(value: i32) -> Option<Self> {
        Some(match value {
            0 => Self::Auto,
            1 => Self::Sunny,
            2 => Self::Cloudy,
            3 => Self::Tungsten,
            4 => Self::Fluorescent,
            _ => return None,
        })
    }
}

/// Color effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorEffect {
    /// No effect
    #[default]
    None,
    /// Monochrome
    Gray,
    /// Sepia tone
    Sepia,
    /// Aqua tone
    Aqua,
    /// Negative
    Negative,
}

impl ColorEffect {
    /// Map a raw control value (0 ..= 4) to an effect
    pub fn from_raw(value: i32) -> Option<Self> {
        Some(match value {
            0 => Self::None,
            1 => Self::Gray,
            2 => Self::Sepia,
            3 => Self::Aqua,
            4 => Self::Negative,
            _ => return None,
        })
    }
}

/// Supported frame rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameRate {
    /// 7 fps
    Fps7,
    /// 10 fps
    Fps10,
    /// 15 fps
    #[default]
    Fps15,
}

impl FrameRate {
    /// Map a raw fps value (7, 10 or 15) to a frame rate
    pub fn from_raw(value: i32) -> Option<Self> {
        Some(match value {
            7 => Self::Fps7,
            10 => Self::Fps10,
            15 => Self::Fps15,
            _ => return None,
        })
    }
}

/// Blur (low-pass) levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlurLevel {
    /// Blur off
    #[default]
    Off,
    /// Level 1
    Level1,
    /// Level 2
    Level2,
    /// Level 3
    Level3,
}

impl BlurLevel {
    /// Map a raw control value (0 ..= 3) to a blur level
    pub fn from_raw(value: i32) -> Option<Self> {
        Some(match value {
            0 => Self::Off,
            1 => Self::Level1,
            2 => Self::Level2,
            3 => Self::Level3,
            _ => return None,
        })
    }
}

/// Kinds of control the surface exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Exposure bias
    Exposure,
    /// White balance preset
    WhiteBalance,
    /// Color effect
    Effect,
    /// Frame rate
    FrameRate,
    /// Blur level
    Blur,
    /// Video-telephony profile toggle
    VtMode,
    /// Data-line test pattern toggle
    DatalineTest,
    /// Stop the data-line test
    DatalineStop,
}

/// A fully typed control request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Set exposure bias
    Exposure(ExposureBias),
    /// Set white balance preset
    WhiteBalance(WhiteBalance),
    /// Set color effect
    Effect(ColorEffect),
    /// Set frame rate
    FrameRate(FrameRate),
    /// Set blur level
    Blur(BlurLevel),
    /// Toggle the video-telephony profile
    VtMode(bool),
    /// Toggle the data-line test pattern flag
    DatalineTest(bool),
    /// Stop the data-line test and reset
    DatalineStop,
}

const EV_TABLE: [&RegisterProgram; 9] = [
    &programs::EV_M4,
    &programs::EV_M3,
    &programs::EV_M2,
    &programs::EV_M1,
    &programs::EV_DEFAULT,
    &programs::EV_P1,
    &programs::EV_P2,
    &programs::EV_P3,
    &programs::EV_P4,
];

const EV_VT_TABLE: [&RegisterProgram; 9] = [
    &programs::EV_VT_M4,
    &programs::EV_VT_M3,
    &programs::EV_VT_M2,
    &programs::EV_VT_M1,
    &programs::EV_VT_DEFAULT,
    &programs::EV_VT_P1,
    &programs::EV_VT_P2,
    &programs::EV_VT_P3,
    &programs::EV_VT_P4,
];

const WB_TABLE: [&RegisterProgram; 5] = [
    &programs::WB_AUTO,
    &programs::WB_SUNNY,
    &programs::WB_CLOUDY,
    &programs::WB_TUNGSTEN,
    &programs::WB_FLUORESCENT,
];

const EFFECT_TABLE: [&RegisterProgram; 5] = [
    &programs::EFFECT_NONE,
    &programs::EFFECT_GRAY,
    &programs::EFFECT_SEPIA,
    &programs::EFFECT_AQUA,
    &programs::EFFECT_NEGATIVE,
];

const FPS_TABLE: [&RegisterProgram; 3] = [&programs::FPS_7, &programs::FPS_10, &programs::FPS_15];

const VT_FPS_TABLE: [&RegisterProgram; 3] = [
    &programs::VT_FPS_7,
    &programs::VT_FPS_10,
    &programs::VT_FPS_15,
];

const BLUR_TABLE: [&RegisterProgram; 4] = [
    &programs::BLUR_NONE,
    &programs::BLUR_P1,
    &programs::BLUR_P2,
    &programs::BLUR_P3,
];

const BLUR_VT_TABLE: [&RegisterProgram; 4] = [
    &programs::BLUR_VT_NONE,
    &programs::BLUR_VT_P1,
    &programs::BLUR_VT_P2,
    &programs::BLUR_VT_P3,
];

impl Control {
    /// Build a control from a raw (kind, value) pair
    ///
    /// Returns `None` for a discrete value with no corresponding program;
    /// callers treat that as a no-op, leaving sensor state unchanged.
    pub fn from_raw(kind: ControlKind, value: i32) -> Option<Self> {
        match kind {
            ControlKind::Exposure => ExposureBias::from_raw(value).map(Self::Exposure),
            ControlKind::WhiteBalance => WhiteBalance::from_raw(value).map(Self::WhiteBalance),
            ControlKind::Effect => ColorEffect::from_raw(value).map(Self::Effect),
            ControlKind::FrameRate => FrameRate::from_raw(value).map(Self::FrameRate),
            ControlKind::Blur => BlurLevel::from_raw(value).map(Self::Blur),
            ControlKind::VtMode => Some(Self::VtMode(value != 0)),
            ControlKind::DatalineTest => Some(Self::DatalineTest(value != 0)),
            ControlKind::DatalineStop => Some(Self::DatalineStop),
        }
    }

    /// Register program for this control, taking the VT-mode variant where
    /// one exists. Mode toggles carry no program.
    pub fn program(&self, vt_mode: bool) -> Option<&'static RegisterProgram> {
        match self {
            Self::Exposure(bias) => {
                let table = if vt_mode { &EV_VT_TABLE } else { &EV_TABLE };
                Some(table[*bias as usize])
            }
            Self::WhiteBalance(wb) => Some(WB_TABLE[*wb as usize]),
            Self::Effect(fx) => Some(EFFECT_TABLE[*fx as usize]),
            Self::FrameRate(fps) => {
                let table = if vt_mode { &VT_FPS_TABLE } else { &FPS_TABLE };
                Some(table[*fps as usize])
            }
            Self::Blur(level) => {
                let table = if vt_mode { &BLUR_VT_TABLE } else { &BLUR_TABLE };
                Some(table[*level as usize])
            }
            Self::VtMode(_) | Self::DatalineTest(_) | Self::DatalineStop => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposure_lookup_honors_vt_mode() {
        let c = Control::Exposure(ExposureBias::Minus2);
        assert_eq!(c.program(false).unwrap().name, "ev_m2");
        assert_eq!(c.program(true).unwrap().name, "ev_vt_m2");
    }

    #[test]
    fn frame_rate_and_blur_have_vt_variants() {
        assert_eq!(
            Control::FrameRate(FrameRate::Fps10).program(true).unwrap().name,
            "vt_fps_10"
        );
        assert_eq!(
            Control::Blur(BlurLevel::Level3).program(false).unwrap().name,
            "blur_p3"
        );
    }

    #[test]
    fn white_balance_ignores_vt_mode() {
        let c = Control::WhiteBalance(WhiteBalance::Tungsten);
        assert_eq!(c.program(false).unwrap().name, "wb_tungsten");
        assert_eq!(c.program(true).unwrap().name, "wb_tungsten");
    }

    #[test]
    fn unsupported_raw_values_map_to_none() {
        assert!(Control::from_raw(ControlKind::Exposure, 9).is_none());
        assert!(Control::from_raw(ControlKind::FrameRate, 30).is_none());
        assert!(Control::from_raw(ControlKind::Blur, -1).is_none());
    }

    #[test]
    fn toggles_have_no_program() {
        assert!(Control::VtMode(true).program(false).is_none());
        assert!(Control::DatalineStop.program(true).is_none());
    }
}
