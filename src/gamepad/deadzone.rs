//! # Deadzone Engine
//!
//! Suppresses small axis movements near center and rescales the remaining
//! travel so that full deflection still reaches `±1.0`.
//!
//! ## Linear Deadzone
//!
//! Applied to a single axis: with `a = |raw|`, values where `a < threshold`
//! are suppressed, everything else becomes
//! `raw * (a - threshold) / (1 - threshold)`.
//!
//! ## Radial Deadzone
//!
//! Applied to the joint magnitude `m = sqrt(x² + y²)` of a stick. When
//! `m < threshold` the stick is at rest; otherwise each axis becomes
//! `(axis / m) * ((m - threshold) / (1 - threshold))`, which keeps the stick
//! direction and maps the live annulus onto the unit circle. A radial rule is
//! owned by one axis of a stick and only filters samples of that axis; its
//! partner only contributes its latest raw value.
//!
//! ## Usage
//!
//! ```
//! use rov_control::gamepad::component::Component;
//! use rov_control::gamepad::deadzone::{DeadzoneEngine, DeadzoneKind};
//!
//! let mut deadzones = DeadzoneEngine::new();
//! deadzones.configure(Component::Trigger, DeadzoneKind::Linear, 0.1)?;
//!
//! let filtered = deadzones.filter(Component::Trigger, 0.05, 0.0).unwrap();
//! assert!(filtered.suppressed);
//! assert_eq!(filtered.value, 0.0);
//! # Ok::<(), rov_control::error::RovControlError>(())
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

use super::component::Component;
use crate::error::{Result, RovControlError};

/// How a deadzone is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeadzoneKind {
    /// Per-axis distance from center.
    Linear,
    /// Joint magnitude of a stick's two axes.
    Radial,
}

/// A configured deadzone. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeadzoneRule {
    owner: Component,
    kind: DeadzoneKind,
    threshold: f32,
    /// `(x, y)` stick axes for radial rules.
    pair: Option<(Component, Component)>,
}

/// Output of a deadzone rule for one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Filtered {
    /// Filtered value, `0.0` when suppressed.
    pub value: f32,
    /// The sample lies inside the deadzone.
    pub suppressed: bool,
}

impl Filtered {
    const SUPPRESSED: Filtered = Filtered {
        value: 0.0,
        suppressed: true,
    };

    fn live(value: f32) -> Self {
        Self {
            value,
            suppressed: false,
        }
    }
}

impl DeadzoneRule {
    /// Builds a rule for `owner`, validating the threshold and the axes.
    ///
    /// # Errors
    ///
    /// Returns [`RovControlError::Configuration`] if:
    /// - `threshold` is negative or NaN
    /// - `owner` is not an analog axis
    /// - `kind` is radial and `owner` is not part of a stick pair
    pub fn new(owner: Component, kind: DeadzoneKind, threshold: f32) -> Result<Self> {
        if threshold.is_nan() || threshold < 0.0 {
            return Err(RovControlError::Configuration(format!(
                "You cannot set a deadzone with a negative value: component = {:?}, kind = {:?}, threshold = {}",
                owner, kind, threshold
            )));
        }

        if !owner.is_axis() {
            return Err(RovControlError::Configuration(format!(
                "Component {:?} is not an axis",
                owner
            )));
        }

        let pair = match kind {
            DeadzoneKind::Linear => None,
            DeadzoneKind::Radial => Some(owner.radial_pair().ok_or_else(|| {
                RovControlError::Configuration(format!(
                    "Component {:?} is not part of a radial deadzone axes group",
                    owner
                ))
            })?),
        };

        Ok(Self {
            owner,
            kind,
            threshold,
            pair,
        })
    }

    /// The axis whose samples this rule filters.
    #[must_use]
    pub fn owner(&self) -> Component {
        self.owner
    }

    #[must_use]
    pub fn kind(&self) -> DeadzoneKind {
        self.kind
    }

    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Axes taking part in this rule: the owner alone, or both stick axes.
    #[must_use]
    pub fn axes(&self) -> Vec<Component> {
        match self.pair {
            Some((x, y)) => vec![x, y],
            None => vec![self.owner],
        }
    }

    /// The partner axis whose latest value a radial rule needs.
    #[must_use]
    pub fn partner(&self) -> Option<Component> {
        self.pair
            .map(|(x, y)| if x == self.owner { y } else { x })
    }

    /// Filters an owner sample. `partner_raw` is ignored by linear rules.
    #[must_use]
    pub fn apply(&self, raw: f32, partner_raw: f32) -> Filtered {
        match self.kind {
            DeadzoneKind::Linear => self.apply_linear(raw),
            DeadzoneKind::Radial => self.apply_radial(raw, partner_raw),
        }
    }

    #[inline]
    fn apply_linear(&self, raw: f32) -> Filtered {
        let abs_raw = raw.abs();
        if abs_raw < self.threshold || self.threshold >= 1.0 {
            return Filtered::SUPPRESSED;
        }

        Filtered::live(raw * ((abs_raw - self.threshold) / (1.0 - self.threshold)))
    }

    #[inline]
    fn apply_radial(&self, raw: f32, partner_raw: f32) -> Filtered {
        let magnitude = raw.hypot(partner_raw);
        if magnitude < self.threshold || self.threshold >= 1.0 {
            return Filtered::SUPPRESSED;
        }

        // Only reachable with a zero threshold
        if magnitude == 0.0 {
            return Filtered::live(0.0);
        }

        let scale = (magnitude - self.threshold) / (1.0 - self.threshold);
        Filtered::live((raw / magnitude) * scale)
    }
}

/// Holds the deadzone rules of all axes, at most one per axis.
#[derive(Debug, Clone, Default)]
pub struct DeadzoneEngine {
    rules: HashMap<Component, DeadzoneRule>,
}

impl DeadzoneEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the deadzone of `component`, replacing any previous rule
    /// owned by that axis.
    ///
    /// # Errors
    ///
    /// See [`DeadzoneRule::new`]. A failed call leaves the engine unchanged.
    pub fn configure(
        &mut self,
        component: Component,
        kind: DeadzoneKind,
        threshold: f32,
    ) -> Result<()> {
        let rule = DeadzoneRule::new(component, kind, threshold)?;
        debug!(
            "Configured {:?} deadzone {} on {:?} (axes {:?})",
            kind,
            threshold,
            component,
            rule.axes()
        );

        if let Some(previous) = self.rules.insert(component, rule) {
            debug!("Replaced previous deadzone on {:?}: {:?}", component, previous);
        }
        Ok(())
    }

    /// Returns the rule owned by `component`, if any.
    #[must_use]
    pub fn rule(&self, component: Component) -> Option<&DeadzoneRule> {
        self.rules.get(&component)
    }

    /// Returns the radial rule owned by the stick partner of `component`
    /// when `component` has no rule of its own.
    ///
    /// Such a rule still suppresses `component` inside the deadzone, but
    /// never produces live values for it.
    #[must_use]
    pub fn shared_radial(&self, component: Component) -> Option<&DeadzoneRule> {
        if self.rules.contains_key(&component) {
            return None;
        }

        let partner = component.radial_partner()?;
        self.rules
            .get(&partner)
            .filter(|rule| rule.kind() == DeadzoneKind::Radial)
    }

    /// Filters a sample of `component`.
    ///
    /// Returns `None` when no rule is configured, in which case the raw value
    /// should pass through unfiltered.
    #[must_use]
    pub fn filter(&self, component: Component, raw: f32, partner_raw: f32) -> Option<Filtered> {
        self.rules
            .get(&component)
            .map(|rule| rule.apply(raw, partner_raw))
    }
}
