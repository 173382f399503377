//! Static register program tables
//!
//! Data, not logic. Each table is the compiled-in binary form of one tuning
//! block; its name matches the block name a tuning table would carry, so the
//! dispatcher can source either representation interchangeably. Word format
//! is `0xAAVV` (address high byte, value low byte); `0xFFnn` is an nn-ms
//! delay directive.
//!
//! Register map conventions of the sensor: `0x03` selects the register page,
//! `0x01` is the power/sleep control on page 0.

use crate::program::RegisterProgram;

/// Device-ID register sub-address (page 0)
pub const DEVICE_ID_REG: u8 = 0x04;

/// Expected device-ID value
pub const DEVICE_ID: u8 = 0x8C;

/// Full initialization, normal (camera) profile
pub static INIT: RegisterProgram = RegisterProgram::new(
    "init_reg",
    &[
        0x0300, 0x01F1, 0x01F3, 0x01F1, // page 0, soft reset pulse
        0x0520, 0x0700, 0x10C0, 0x1190, 0x1204, // windowing, sync polarity
        0x2000, 0x2104, 0x2200, 0x2304, // window start/size high bytes
        0x0303, 0x3183, 0x3209, 0x3380, // page 3, PLL setup
        0xFF0A, // PLL settle
        0x0310, 0x4000, 0x4138, 0x6090, // page 16, ISP enable, AE target
        0x0311, 0x1099, 0x122D, // page 17, D-gamma
        0x0320, 0x100C, 0x111C, 0x2E00, // page 32, AE window
        0x0322, 0x10E2, 0x80D0, 0x8258, // page 34, AWB gains
        0x0300, 0x01F0, // exit sleep
        0xFF05,
    ],
);

/// Full initialization, video-telephony profile (lower AE target, fixed
/// 50 Hz anti-banding)
pub static INIT_VT: RegisterProgram = RegisterProgram::new(
    "init_vt_reg",
    &[
        0x0300, 0x01F1, 0x01F3, 0x01F1,
        0x0520, 0x0700, 0x10C0, 0x1194, 0x1204,
        0x0303, 0x3185, 0x3209, 0x3380,
        0xFF0A,
        0x0310, 0x4000, 0x4130, 0x6078,
        0x0320, 0x100C, 0x111C, 0x2E01,
        0x0322, 0x10E2, 0x80C8, 0x8260,
        0x0300, 0x01F0,
        0xFF05,
    ],
);

// Exposure bias tables: page 16, register 0x40 holds the bias in
// sign-magnitude form (bit 7 = negative).

/// Exposure bias -4
pub static EV_M4: RegisterProgram = RegisterProgram::new("ev_m4", &[0x0310, 0x40D0]);
/// Exposure bias -3
pub static EV_M3: RegisterProgram = RegisterProgram::new("ev_m3", &[0x0310, 0x40B0]);
/// Exposure bias -2
pub static EV_M2: RegisterProgram = RegisterProgram::new("ev_m2", &[0x0310, 0x40A0]);
/// Exposure bias -1
pub static EV_M1: RegisterProgram = RegisterProgram::new("ev_m1", &[0x0310, 0x4090]);
/// Exposure bias 0
pub static EV_DEFAULT: RegisterProgram = RegisterProgram::new("ev_default", &[0x0310, 0x4000]);
/// Exposure bias +1
pub static EV_P1: RegisterProgram = RegisterProgram::new("ev_p1", &[0x0310, 0x4010]);
/// Exposure bias +2
pub static EV_P2: RegisterProgram = RegisterProgram::new("ev_p2", &[0x0310, 0x4020]);
/// Exposure bias +3
pub static EV_P3: RegisterProgram = RegisterProgram::new("ev_p3", &[0x0310, 0x4030]);
/// Exposure bias +4
pub static EV_P4: RegisterProgram = RegisterProgram::new("ev_p4", &[0x0310, 0x4050]);

// VT exposure tables additionally pin the AE target (page 16, 0x60).

/// VT exposure bias -4
pub static EV_VT_M4: RegisterProgram =
    RegisterProgram::new("ev_vt_m4", &[0x0310, 0x40D0, 0x6050]);
/// VT exposure bias -3
pub static EV_VT_M3: RegisterProgram =
    RegisterProgram::new("ev_vt_m3", &[0x0310, 0x40B0, 0x6058]);
/// VT exposure bias -2
pub static EV_VT_M2: RegisterProgram =
    RegisterProgram::new("ev_vt_m2", &[0x0310, 0x40A0, 0x6060]);
/// VT exposure bias -1
pub static EV_VT_M1: RegisterProgram =
    RegisterProgram::new("ev_vt_m1", &[0x0310, 0x4090, 0x6068]);
/// VT exposure bias 0
pub static EV_VT_DEFAULT: RegisterProgram =
    RegisterProgram::new("ev_vt_default", &[0x0310, 0x4000, 0x6078]);
/// VT exposure bias +1
pub static EV_VT_P1: RegisterProgram =
    RegisterProgram::new("ev_vt_p1", &[0x0310, 0x4010, 0x6080]);
/// VT exposure bias +2
pub static EV_VT_P2: RegisterProgram =
    RegisterProgram::new("ev_vt_p2", &[0x0310, 0x4020, 0x6088]);
/// VT exposure bias +3
pub static EV_VT_P3: RegisterProgram =
    RegisterProgram::new("ev_vt_p3", &[0x0310, 0x4030, 0x6090]);
/// VT exposure bias +4
pub static EV_VT_P4: RegisterProgram =
    RegisterProgram::new("ev_vt_p4", &[0x0310, 0x4050, 0x6098]);

// White balance: page 34, 0x10 mode control, 0x80/0x82 manual R/B gains.

/// Auto white balance
pub static WB_AUTO: RegisterProgram =
    RegisterProgram::new("wb_auto", &[0x0322, 0x10E2, 0x8340, 0x8420]);
/// Daylight preset
pub static WB_SUNNY: RegisterProgram =
    RegisterProgram::new("wb_sunny", &[0x0322, 0x1020, 0x80D0, 0x8258]);
/// Cloudy preset
pub static WB_CLOUDY: RegisterProgram =
    RegisterProgram::new("wb_cloudy", &[0x0322, 0x1020, 0x80E0, 0x8250]);
/// Tungsten preset
pub static WB_TUNGSTEN: RegisterProgram =
    RegisterProgram::new("wb_tungsten", &[0x0322, 0x1020, 0x8098, 0x82C0]);
/// Fluorescent preset
pub static WB_FLUORESCENT: RegisterProgram =
    RegisterProgram::new("wb_fluorescent", &[0x0322, 0x1020, 0x80B0, 0x8290]);

// Color effects: page 16, 0x11 effect select, 0x44/0x45 fixed Cb/Cr.

/// No effect
pub static EFFECT_NONE: RegisterProgram =
    RegisterProgram::new("effect_none", &[0x0310, 0x1103, 0x1230]);
/// Monochrome
pub static EFFECT_GRAY: RegisterProgram =
    RegisterProgram::new("effect_gray", &[0x0310, 0x1103, 0x1233, 0x4480, 0x4580]);
/// Sepia tone
pub static EFFECT_SEPIA: RegisterProgram =
    RegisterProgram::new("effect_sepia", &[0x0310, 0x1103, 0x1233, 0x4470, 0x4598]);
/// Aqua tone
pub static EFFECT_AQUA: RegisterProgram =
    RegisterProgram::new("effect_aqua", &[0x0310, 0x1103, 0x1233, 0x44B0, 0x4540]);
/// Negative
pub static EFFECT_NEGATIVE: RegisterProgram =
    RegisterProgram::new("effect_negative", &[0x0310, 0x1103, 0x1238]);

// Frame rate: page 0, 0x11 vdo control (fixed-frame bit), page 32 exposure
// bounds.

/// 7 fps, normal profile
pub static FPS_7: RegisterProgram =
    RegisterProgram::new("fps_7", &[0x0300, 0x1194, 0x0320, 0x8309, 0x8420]);
/// 10 fps, normal profile
pub static FPS_10: RegisterProgram =
    RegisterProgram::new("fps_10", &[0x0300, 0x1194, 0x0320, 0x8306, 0x8440]);
/// 15 fps, normal profile
pub static FPS_15: RegisterProgram =
    RegisterProgram::new("fps_15", &[0x0300, 0x1190, 0x0320, 0x8304, 0x84E0]);

/// 7 fps, VT profile
pub static VT_FPS_7: RegisterProgram =
    RegisterProgram::new("vt_fps_7", &[0x0300, 0x1194, 0x0320, 0x830D, 0x8480]);
/// 10 fps, VT profile
pub static VT_FPS_10: RegisterProgram =
    RegisterProgram::new("vt_fps_10", &[0x0300, 0x1194, 0x0320, 0x8309, 0x8460]);
/// 15 fps, VT profile
pub static VT_FPS_15: RegisterProgram =
    RegisterProgram::new("vt_fps_15", &[0x0300, 0x1194, 0x0320, 0x8306, 0x8420]);

// Blur: page 16, 0x48 low-pass filter strength.

/// Blur off
pub static BLUR_NONE: RegisterProgram = RegisterProgram::new("blur_none", &[0x0310, 0x4800]);
/// Blur level 1
pub static BLUR_P1: RegisterProgram = RegisterProgram::new("blur_p1", &[0x0310, 0x4820]);
/// Blur level 2
pub static BLUR_P2: RegisterProgram = RegisterProgram::new("blur_p2", &[0x0310, 0x4840]);
/// Blur level 3
pub static BLUR_P3: RegisterProgram = RegisterProgram::new("blur_p3", &[0x0310, 0x4860]);

/// VT blur off
pub static BLUR_VT_NONE: RegisterProgram =
    RegisterProgram::new("blur_vt_none", &[0x0310, 0x4800, 0x4900]);
/// VT blur level 1
pub static BLUR_VT_P1: RegisterProgram =
    RegisterProgram::new("blur_vt_p1", &[0x0310, 0x4828, 0x4910]);
/// VT blur level 2
pub static BLUR_VT_P2: RegisterProgram =
    RegisterProgram::new("blur_vt_p2", &[0x0310, 0x4848, 0x4920]);
/// VT blur level 3
pub static BLUR_VT_P3: RegisterProgram =
    RegisterProgram::new("blur_vt_p3", &[0x0310, 0x4868, 0x4930]);

/// Enable the data-line test pattern
pub static DATALINE: RegisterProgram =
    RegisterProgram::new("dataline", &[0x0300, 0x5005, 0xFF02]);

/// Stop the data-line test pattern
pub static DATALINE_STOP: RegisterProgram =
    RegisterProgram::new("dataline_stop", &[0x0300, 0x5000, 0xFF02]);
