//! # ROV Control Library
//!
//! Gamepad input handling for the ROV surface console.
//!
//! This library turns raw gamepad samples into typed, per-component events:
//! deadzone filtering for sticks and the trigger, press/release/click tracking
//! for buttons and the D-pad, and fan-out to subscribed listeners from a
//! fixed-rate poll loop.

pub mod config;
pub mod error;
pub mod controller;
pub mod gamepad;
