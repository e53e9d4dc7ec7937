//! # Component Identity Map
//!
//! Maps raw hardware identifiers onto the fixed set of logical gamepad
//! [`Component`]s.
//!
//! ## Default Layout (Xbox)
//!
//! | Raw identifier | Component |
//! |----------------|-----------|
//! | Button 0 | A |
//! | Button 1 | B |
//! | Button 2 | X |
//! | Button 3 | Y |
//! | Button 4 | Left shoulder |
//! | Button 5 | Right shoulder |
//! | Button 6 | Back |
//! | Button 7 | Select |
//! | Button 8 | Left stick click |
//! | Button 9 | Right stick click |
//! | Axis X / Y | Left stick |
//! | Axis RX / RY | Right stick |
//! | Axis Z | Trigger |
//! | Axis POV | D-Pad (see below) |
//!
//! ## D-Pad Codes
//!
//! The d-pad reports on a single POV channel. Each position is a fixed
//! fraction: `0.125` up-left, `0.25` up, `0.375` up-right, `0.5` right,
//! `0.625` down-right, `0.75` down, `0.875` down-left, `1.0` left and
//! `0.0` centered (released).

use serde::Deserialize;
use std::collections::HashMap;

/// Logical gamepad component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    LeftShoulderButton,
    RightShoulderButton,
    LeftStickButton,
    RightStickButton,
    AButton,
    BButton,
    XButton,
    YButton,
    BackButton,
    SelectButton,
    DpadAny,
    DpadUp,
    DpadUpRight,
    DpadRight,
    DpadDownRight,
    DpadDown,
    DpadDownLeft,
    DpadLeft,
    DpadUpLeft,
    LeftStickX,
    LeftStickY,
    RightStickX,
    RightStickY,
    Trigger,
}

/// Orthogonal axis pairs a radial deadzone may span, as `(x, y)`.
pub const RADIAL_AXIS_PAIRS: [(Component, Component); 2] = [
    (Component::LeftStickX, Component::LeftStickY),
    (Component::RightStickX, Component::RightStickY),
];

/// Position codes reported on the POV channel, one per d-pad direction.
pub const DPAD_CODES: [(f32, Component); 8] = [
    (0.125, Component::DpadUpLeft),
    (0.25, Component::DpadUp),
    (0.375, Component::DpadUpRight),
    (0.5, Component::DpadRight),
    (0.625, Component::DpadDownRight),
    (0.75, Component::DpadDown),
    (0.875, Component::DpadDownLeft),
    (1.0, Component::DpadLeft),
];

/// POV code for a centered (released) d-pad.
pub const DPAD_CENTERED: f32 = 0.0;

impl Component {
    /// Every component, in declaration order.
    pub const ALL: [Component; 24] = [
        Component::LeftShoulderButton,
        Component::RightShoulderButton,
        Component::LeftStickButton,
        Component::RightStickButton,
        Component::AButton,
        Component::BButton,
        Component::XButton,
        Component::YButton,
        Component::BackButton,
        Component::SelectButton,
        Component::DpadAny,
        Component::DpadUp,
        Component::DpadUpRight,
        Component::DpadRight,
        Component::DpadDownRight,
        Component::DpadDown,
        Component::DpadDownLeft,
        Component::DpadLeft,
        Component::DpadUpLeft,
        Component::LeftStickX,
        Component::LeftStickY,
        Component::RightStickX,
        Component::RightStickY,
        Component::Trigger,
    ];

    /// Returns true for analog axes (sticks and trigger).
    #[must_use]
    pub fn is_axis(self) -> bool {
        matches!(
            self,
            Component::LeftStickX
                | Component::LeftStickY
                | Component::RightStickX
                | Component::RightStickY
                | Component::Trigger
        )
    }

    /// Returns the `(x, y)` stick pair this axis belongs to, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use rov_control::gamepad::component::Component;
    ///
    /// assert_eq!(
    ///     Component::RightStickY.radial_pair(),
    ///     Some((Component::RightStickX, Component::RightStickY))
    /// );
    /// assert_eq!(Component::Trigger.radial_pair(), None);
    /// ```
    #[must_use]
    pub fn radial_pair(self) -> Option<(Component, Component)> {
        RADIAL_AXIS_PAIRS
            .iter()
            .copied()
            .find(|&(x, y)| x == self || y == self)
    }

    /// Returns the other axis of this axis' stick, if any.
    #[must_use]
    pub fn radial_partner(self) -> Option<Component> {
        self.radial_pair()
            .map(|(x, y)| if x == self { y } else { x })
    }
}

/// Raw analog channels exposed by the input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawAxis {
    X,
    Y,
    Z,
    Rx,
    Ry,
    Rz,
    /// Point-of-view hat (d-pad).
    Pov,
}

/// Raw hardware identifier of a sample.
///
/// The identifier space is partitioned: buttons are digital (`0.0`/`1.0`),
/// axes are analog (`-1.0..=1.0`, or a d-pad code on [`RawAxis::Pov`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawIdentifier {
    Button(u8),
    Axis(RawAxis),
}

/// Result of classifying a raw identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classified {
    /// Digital button
    Button(Component),
    /// Analog axis
    Axis(Component),
    /// The POV channel carrying d-pad codes
    Dpad,
    /// Not part of the layout
    Unmapped,
}

/// Immutable lookup tables from raw identifiers to components.
///
/// Built once at construction and owned by the engine; two instances never
/// share state.
#[derive(Debug, Clone)]
pub struct ComponentMap {
    buttons: HashMap<u8, Component>,
    axes: HashMap<RawAxis, Component>,
}

impl Default for ComponentMap {
    fn default() -> Self {
        Self::xbox()
    }
}

impl ComponentMap {
    /// Creates the Xbox layout described in the module documentation.
    #[must_use]
    pub fn xbox() -> Self {
        let buttons = HashMap::from([
            (0, Component::AButton),
            (1, Component::BButton),
            (2, Component::XButton),
            (3, Component::YButton),
            (4, Component::LeftShoulderButton),
            (5, Component::RightShoulderButton),
            (6, Component::BackButton),
            (7, Component::SelectButton),
            (8, Component::LeftStickButton),
            (9, Component::RightStickButton),
        ]);

        let axes = HashMap::from([
            (RawAxis::X, Component::LeftStickX),
            (RawAxis::Y, Component::LeftStickY),
            (RawAxis::Rx, Component::RightStickX),
            (RawAxis::Ry, Component::RightStickY),
            (RawAxis::Z, Component::Trigger),
        ]);

        Self { buttons, axes }
    }

    /// Classifies a raw identifier. Never fails: unknown identifiers come back
    /// as [`Classified::Unmapped`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rov_control::gamepad::component::{Classified, Component, ComponentMap, RawAxis, RawIdentifier};
    ///
    /// let map = ComponentMap::xbox();
    /// assert_eq!(map.classify(RawIdentifier::Button(0)), Classified::Button(Component::AButton));
    /// assert_eq!(map.classify(RawIdentifier::Axis(RawAxis::Pov)), Classified::Dpad);
    /// assert_eq!(map.classify(RawIdentifier::Button(42)), Classified::Unmapped);
    /// ```
    #[must_use]
    pub fn classify(&self, identifier: RawIdentifier) -> Classified {
        match identifier {
            RawIdentifier::Button(index) => self
                .buttons
                .get(&index)
                .map_or(Classified::Unmapped, |&c| Classified::Button(c)),
            RawIdentifier::Axis(RawAxis::Pov) => Classified::Dpad,
            RawIdentifier::Axis(axis) => self
                .axes
                .get(&axis)
                .map_or(Classified::Unmapped, |&c| Classified::Axis(c)),
        }
    }

    /// Reverse lookup: the raw identifier a component is reported on.
    ///
    /// All d-pad components share the POV channel.
    #[must_use]
    pub fn identifier_of(&self, component: Component) -> Option<RawIdentifier> {
        if dpad_code_of(component).is_some() || component == Component::DpadAny {
            return Some(RawIdentifier::Axis(RawAxis::Pov));
        }

        self.buttons
            .iter()
            .find(|(_, &c)| c == component)
            .map(|(&index, _)| RawIdentifier::Button(index))
            .or_else(|| {
                self.axes
                    .iter()
                    .find(|(_, &c)| c == component)
                    .map(|(&axis, _)| RawIdentifier::Axis(axis))
            })
    }
}

/// Decodes a d-pad direction from a POV code.
///
/// Returns `None` for the centered code and for anything unrecognized.
#[must_use]
pub fn dpad_direction(code: f32) -> Option<Component> {
    DPAD_CODES
        .iter()
        .find(|&&(c, _)| c == code)
        .map(|&(_, component)| component)
}

/// Encodes a d-pad direction as its POV code.
#[must_use]
pub fn dpad_code_of(component: Component) -> Option<f32> {
    DPAD_CODES
        .iter()
        .find(|&&(_, c)| c == component)
        .map(|&(code, _)| code)
}
