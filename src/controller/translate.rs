//! # Evdev Event Translator
//!
//! Converts raw evdev events from an Xbox-style gamepad into [`RawSample`]s
//! understood by the input engine.
//!
//! ## Button Codes (EV_KEY)
//!
//! | evdev Code | Raw button |
//! |------------|------------|
//! | BTN_SOUTH | 0 (A) |
//! | BTN_EAST | 1 (B) |
//! | BTN_WEST | 2 (X) |
//! | BTN_NORTH | 3 (Y) |
//! | BTN_TL | 4 (left shoulder) |
//! | BTN_TR | 5 (right shoulder) |
//! | BTN_SELECT | 6 (back) |
//! | BTN_START | 7 (select) |
//! | BTN_THUMBL | 8 (left stick click) |
//! | BTN_THUMBR | 9 (right stick click) |
//!
//! ## Axis Codes (EV_ABS)
//!
//! | evdev Code | Raw axis | Output range |
//! |------------|----------|--------------|
//! | ABS_X / ABS_Y | X / Y | -1.0..=1.0 |
//! | ABS_RX / ABS_RY | RX / RY | -1.0..=1.0 |
//! | ABS_Z (left trigger) | Z | combined, see below |
//! | ABS_RZ (right trigger) | Z | combined, see below |
//! | ABS_HAT0X / ABS_HAT0Y | POV | d-pad code |
//!
//! The two triggers share one axis: `left - right`, each trigger normalized to
//! `0.0..=1.0` first. Both hat axes are folded into a single POV code.

use evdev::{AbsoluteAxisType, InputEvent, InputEventKind, Key};
use std::collections::HashMap;
use std::time::UNIX_EPOCH;

use crate::gamepad::component::{RawAxis, RawIdentifier, DPAD_CENTERED};
use crate::gamepad::source::RawSample;

/// Reported range of an absolute axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsRange {
    pub min: i32,
    pub max: i32,
}

/// Default stick range of the xpad driver.
pub const STICK_RANGE: AbsRange = AbsRange::new(-32768, 32767);
/// Default trigger range of the xpad driver.
pub const TRIGGER_RANGE: AbsRange = AbsRange::new(0, 255);

impl AbsRange {
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Maps a raw value onto `-1.0..=1.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rov_control::controller::translate::AbsRange;
    ///
    /// let range = AbsRange::new(0, 255);
    /// assert!((range.normalize(0) + 1.0).abs() < 0.01);
    /// assert!((range.normalize(255) - 1.0).abs() < 0.01);
    /// ```
    #[must_use]
    pub fn normalize(&self, raw: i32) -> f32 {
        self.unit(raw) * 2.0 - 1.0
    }

    /// Maps a raw value onto `0.0..=1.0`.
    #[must_use]
    pub fn unit(&self, raw: i32) -> f32 {
        if self.max <= self.min {
            return 0.0;
        }
        let span = self.max as f32 - self.min as f32;
        ((raw as f32 - self.min as f32) / span).clamp(0.0, 1.0)
    }
}

/// Returns the raw button index of a gamepad key.
#[must_use]
pub fn button_index(key: Key) -> Option<u8> {
    match key {
        Key::BTN_SOUTH => Some(0),
        Key::BTN_EAST => Some(1),
        Key::BTN_WEST => Some(2),
        Key::BTN_NORTH => Some(3),
        Key::BTN_TL => Some(4),
        Key::BTN_TR => Some(5),
        Key::BTN_SELECT => Some(6),
        Key::BTN_START => Some(7),
        Key::BTN_THUMBL => Some(8),
        Key::BTN_THUMBR => Some(9),
        _ => None,
    }
}

/// Folds the two hat axes (`-1`/`0`/`1` each) into a POV d-pad code.
///
/// # Examples
///
/// ```
/// use rov_control::controller::translate::pov_code;
///
/// assert_eq!(pov_code(1, 0), 0.5);   // right
/// assert_eq!(pov_code(0, -1), 0.25); // up
/// assert_eq!(pov_code(0, 0), 0.0);   // centered
/// ```
#[must_use]
pub fn pov_code(hat_x: i32, hat_y: i32) -> f32 {
    match (hat_x.signum(), hat_y.signum()) {
        (-1, -1) => 0.125,
        (0, -1) => 0.25,
        (1, -1) => 0.375,
        (1, 0) => 0.5,
        (1, 1) => 0.625,
        (0, 1) => 0.75,
        (-1, 1) => 0.875,
        (-1, 0) => 1.0,
        _ => DPAD_CENTERED,
    }
}

/// Stateful evdev-to-sample translator.
///
/// Keeps the latest trigger and hat positions because each of those raw
/// channels is built from two evdev axes.
#[derive(Debug, Clone)]
pub struct EventTranslator {
    ranges: HashMap<u16, AbsRange>,
    left_trigger: f32,
    right_trigger: f32,
    hat_x: i32,
    hat_y: i32,
}

impl Default for EventTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl EventTranslator {
    /// Creates a translator using the xpad default ranges.
    #[must_use]
    pub fn new() -> Self {
        let ranges = HashMap::from([
            (AbsoluteAxisType::ABS_X.0, STICK_RANGE),
            (AbsoluteAxisType::ABS_Y.0, STICK_RANGE),
            (AbsoluteAxisType::ABS_RX.0, STICK_RANGE),
            (AbsoluteAxisType::ABS_RY.0, STICK_RANGE),
            (AbsoluteAxisType::ABS_Z.0, TRIGGER_RANGE),
            (AbsoluteAxisType::ABS_RZ.0, TRIGGER_RANGE),
        ]);

        Self {
            ranges,
            left_trigger: 0.0,
            right_trigger: 0.0,
            hat_x: 0,
            hat_y: 0,
        }
    }

    /// Overrides the range reported by the device for `axis`.
    pub fn set_range(&mut self, axis: AbsoluteAxisType, range: AbsRange) {
        self.ranges.insert(axis.0, range);
    }

    fn range(&self, axis: AbsoluteAxisType) -> AbsRange {
        self.ranges.get(&axis.0).copied().unwrap_or(STICK_RANGE)
    }

    /// Translates one evdev event. Returns `None` for events outside the
    /// gamepad layout (sync reports, motion sensors, unknown keys).
    pub fn translate(&mut self, event: &InputEvent) -> Option<RawSample> {
        let timestamp = event
            .timestamp()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);

        let (identifier, value) = match event.kind() {
            InputEventKind::Key(key) => (
                RawIdentifier::Button(button_index(key)?),
                event.value() as f32,
            ),
            InputEventKind::AbsAxis(axis) => self.translate_axis(axis, event.value())?,
            _ => return None,
        };

        Some(RawSample::new(identifier, value, timestamp))
    }

    fn translate_axis(&mut self, axis: AbsoluteAxisType, raw: i32) -> Option<(RawIdentifier, f32)> {
        match axis {
            AbsoluteAxisType::ABS_X => Some(self.stick_sample(axis, RawAxis::X, raw)),
            AbsoluteAxisType::ABS_Y => Some(self.stick_sample(axis, RawAxis::Y, raw)),
            AbsoluteAxisType::ABS_RX => Some(self.stick_sample(axis, RawAxis::Rx, raw)),
            AbsoluteAxisType::ABS_RY => Some(self.stick_sample(axis, RawAxis::Ry, raw)),

            AbsoluteAxisType::ABS_Z => {
                self.left_trigger = self.range(axis).unit(raw);
                Some(self.trigger_sample())
            }
            AbsoluteAxisType::ABS_RZ => {
                self.right_trigger = self.range(axis).unit(raw);
                Some(self.trigger_sample())
            }

            AbsoluteAxisType::ABS_HAT0X => {
                self.hat_x = raw;
                Some(self.hat_sample())
            }
            AbsoluteAxisType::ABS_HAT0Y => {
                self.hat_y = raw;
                Some(self.hat_sample())
            }

            _ => None,
        }
    }

    fn stick_sample(&self, axis: AbsoluteAxisType, raw_axis: RawAxis, raw: i32) -> (RawIdentifier, f32) {
        (RawIdentifier::Axis(raw_axis), self.range(axis).normalize(raw))
    }

    fn trigger_sample(&self) -> (RawIdentifier, f32) {
        (
            RawIdentifier::Axis(RawAxis::Z),
            self.left_trigger - self.right_trigger,
        )
    }

    fn hat_sample(&self) -> (RawIdentifier, f32) {
        (
            RawIdentifier::Axis(RawAxis::Pov),
            pov_code(self.hat_x, self.hat_y),
        )
    }
}
