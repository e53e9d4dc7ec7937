//! # Click Tracker
//!
//! Turns digital button transitions into press, release and click events.
//! A click is reported on every release together with how long the button was
//! held.
//!
//! Samples are taken as they come, without checking the previous state: a
//! repeated `1.0` is another press and restarts the hold time, a repeated
//! `0.0` is another release and click.

use std::collections::HashMap;

use super::component::Component;
use super::event::Event;

/// Digital value of a pressed button.
pub const BUTTON_DOWN: f32 = 1.0;
/// Digital value of a released button.
pub const BUTTON_UP: f32 = 0.0;

/// Result of feeding one digital sample to the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// `ButtonPressed`
    Pressed(Event),
    /// `ButtonReleased` followed by `ButtonClicked`
    Released(Event, Event),
    /// Neither 0 nor 1; the sample must be dropped.
    Anomalous,
}

/// Per-button last-press timestamps.
#[derive(Debug, Clone, Default)]
pub struct ClickTracker {
    last_pressed: HashMap<Component, u64>,
}

impl ClickTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a digital sample of `button`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rov_control::gamepad::click::{ClickTracker, Transition};
    /// use rov_control::gamepad::component::Component;
    /// use rov_control::gamepad::event::Event;
    ///
    /// let mut tracker = ClickTracker::new();
    /// tracker.update(Component::AButton, 1.0, 100);
    ///
    /// assert_eq!(
    ///     tracker.update(Component::AButton, 0.0, 350),
    ///     Transition::Released(
    ///         Event::ButtonReleased { timestamp: 350 },
    ///         Event::ButtonClicked { timestamp: 350, hold_duration_nanos: 250 },
    ///     )
    /// );
    /// ```
    pub fn update(&mut self, button: Component, value: f32, timestamp: u64) -> Transition {
        if value == BUTTON_DOWN {
            self.last_pressed.insert(button, timestamp);
            Transition::Pressed(Event::ButtonPressed { timestamp })
        } else if value == BUTTON_UP {
            let pressed_at = self.last_pressed.get(&button).copied().unwrap_or(timestamp);
            Transition::Released(
                Event::ButtonReleased { timestamp },
                Event::ButtonClicked {
                    timestamp,
                    hold_duration_nanos: timestamp.saturating_sub(pressed_at),
                },
            )
        } else {
            Transition::Anomalous
        }
    }

    /// Timestamp of the most recent press of `button`.
    #[must_use]
    pub fn last_pressed(&self, button: Component) -> Option<u64> {
        self.last_pressed.get(&button).copied()
    }
}
