//! # Controller Module
//!
//! Linux evdev gamepad input.
//!
//! This module handles:
//! - Gamepad detection and connection via evdev
//! - Translating evdev key and axis events into raw samples
//! - Feeding those samples to the input engine as a `RawInputSource`

pub mod evdev_source;
pub mod translate;
