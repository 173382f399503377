//! vgacam-core - Core library for VGA camera sensor configuration
//!
//! This crate drives a register-configured CMOS image sensor over a two-byte
//! addressable serial bus and sequences its power/reset lifecycle. It is
//! designed to be `no_std` compatible for use in embedded environments;
//! transport and GPIO backends implement the [`bus::RegisterBus`] and
//! [`power::PowerBackend`] traits.
//!
//! # Features
//!
//! - `std` - Enable standard library support (includes `alloc`)
//! - `alloc` - Enable heap allocation for the tuning table and orchestration
//!
//! # Example
//!
//! ```ignore
//! use vgacam_core::camera::Camera;
//!
//! let mut camera = Camera::new(bus, power);
//! camera.power_on()?;
//! camera.init()?;
//! camera.set_control_raw(ControlKind::FrameRate, 15)?;
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod bus;
#[cfg(feature = "alloc")]
pub mod camera;
pub mod controls;
pub mod error;
pub mod power;
pub mod program;
pub mod programs;
#[cfg(feature = "alloc")]
pub mod session;
pub mod state;
#[cfg(feature = "alloc")]
pub mod tuning;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::{Error, Result};
