//! # Gamepad Module
//!
//! Controller-input engine.
//!
//! This module handles:
//! - Mapping raw hardware identifiers to logical components
//! - Applying linear and radial deadzones to axes
//! - Tracking button presses, releases and click durations
//! - Dispatching typed events to subscribed listeners
//! - Polling the raw input source at a fixed rate

pub mod click;
pub mod component;
pub mod deadzone;
pub mod dispatch;
pub mod engine;
pub mod event;
pub mod poll;
pub mod source;
