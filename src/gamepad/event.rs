//! # Gamepad Events
//!
//! Application-level events published by the input engine.
//!
//! All timestamps are in nanoseconds, as reported by the raw input source.

/// Event published for a [`Component`](super::component::Component).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Filtered axis position in `-1.0..=1.0`.
    AxisMoved { timestamp: u64, value: f32 },
    /// Button went down.
    ButtonPressed { timestamp: u64 },
    /// Button went up.
    ButtonReleased { timestamp: u64 },
    /// Button went up after being held for `hold_duration_nanos`.
    ButtonClicked { timestamp: u64, hold_duration_nanos: u64 },
}

/// Payload-free tag of an [`Event`] variant, used as a subscription key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    AxisMoved,
    ButtonPressed,
    ButtonReleased,
    ButtonClicked,
}

impl Event {
    /// Returns the variant tag of this event.
    ///
    /// # Examples
    ///
    /// ```
    /// use rov_control::gamepad::event::{Event, EventKind};
    ///
    /// let event = Event::ButtonPressed { timestamp: 10 };
    /// assert_eq!(event.kind(), EventKind::ButtonPressed);
    /// ```
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Event::AxisMoved { .. } => EventKind::AxisMoved,
            Event::ButtonPressed { .. } => EventKind::ButtonPressed,
            Event::ButtonReleased { .. } => EventKind::ButtonReleased,
            Event::ButtonClicked { .. } => EventKind::ButtonClicked,
        }
    }

    /// Returns the event timestamp in nanoseconds.
    #[must_use]
    pub fn timestamp(&self) -> u64 {
        match *self {
            Event::AxisMoved { timestamp, .. }
            | Event::ButtonPressed { timestamp }
            | Event::ButtonReleased { timestamp }
            | Event::ButtonClicked { timestamp, .. } => timestamp,
        }
    }
}
