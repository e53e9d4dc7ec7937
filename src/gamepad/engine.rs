//! # Input Engine
//!
//! Turns raw samples into published [`Event`]s.
//!
//! Each sample is classified through the [`ComponentMap`]. Buttons go through
//! the [`ClickTracker`], the POV channel is decoded into d-pad directions and
//! axes are filtered by the [`DeadzoneEngine`] before the result is handed to
//! the [`EventRegistry`].
//!
//! ## Deadzone Edges
//!
//! An axis with a deadzone publishes `AxisMoved(0.0)` exactly once when it
//! enters the deadzone and stays silent until a sample leaves it again. Axes
//! start at rest, so a freshly configured axis publishes nothing until it
//! first leaves its deadzone.
//!
//! A radial rule covers both axes of its stick. When only one axis owns the
//! rule, its partner still publishes the entering `AxisMoved(0.0)` but never
//! a live value through that rule.
//!
//! ## Usage
//!
//! ```
//! use rov_control::gamepad::component::{Component, RawIdentifier};
//! use rov_control::gamepad::engine::InputEngine;
//! use rov_control::gamepad::event::EventKind;
//! use rov_control::gamepad::source::RawSample;
//!
//! let mut engine = InputEngine::new();
//! engine.subscribe(Component::AButton, EventKind::ButtonClicked, |event| {
//!     println!("A clicked: {:?}", event);
//! });
//!
//! engine.process(RawSample::new(RawIdentifier::Button(0), 1.0, 100))?;
//! let published = engine.process(RawSample::new(RawIdentifier::Button(0), 0.0, 900))?;
//! assert_eq!(published, 2); // released + clicked
//! # Ok::<(), rov_control::error::UnmappedInput>(())
//! ```

use std::collections::HashMap;
use tracing::{trace, warn};

use super::click::{ClickTracker, Transition};
use super::component::{dpad_direction, Classified, Component, ComponentMap, DPAD_CENTERED};
use super::deadzone::{DeadzoneEngine, DeadzoneKind, DeadzoneRule};
use super::dispatch::EventRegistry;
use super::event::{Event, EventKind};
use super::source::{RawInputSource, RawSample};
use crate::error::{Result, UnmappedInput};

/// Latest raw value of an axis and whether it currently rests in its deadzone.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisState {
    pub raw: f32,
    pub suppressed: bool,
}

/// Single-writer pipeline from raw samples to listeners.
///
/// # Thread Safety
///
/// `InputEngine` is not synchronized. It is driven by one poll task at a time;
/// [`PollLoop`](super::poll::PollLoop) moves it onto that task while running.
#[derive(Debug, Default)]
pub struct InputEngine {
    components: ComponentMap,
    deadzones: DeadzoneEngine,
    clicks: ClickTracker,
    axes: HashMap<Component, AxisState>,
    registry: EventRegistry,
}

impl InputEngine {
    /// Creates an engine with the Xbox layout, no deadzones and no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with a custom identity map.
    #[must_use]
    pub fn with_components(components: ComponentMap) -> Self {
        Self {
            components,
            ..Self::default()
        }
    }

    /// Configures the deadzone owned by `component`.
    ///
    /// The axis' suppressed flag is re-evaluated against its latest raw value.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a negative threshold, a non-axis
    /// component or a radial rule outside a stick pair.
    pub fn configure_deadzone(
        &mut self,
        component: Component,
        kind: DeadzoneKind,
        threshold: f32,
    ) -> Result<()> {
        self.deadzones.configure(component, kind, threshold)?;

        let partner_raw = self.partner_raw(component);
        let state = self.axes.entry(component).or_default();
        let raw = state.raw;
        if let Some(filtered) = self.deadzones.filter(component, raw, partner_raw) {
            state.suppressed = filtered.suppressed;
        }

        // A partner without its own rule rests with the stick
        if let Some(partner) = component.radial_partner() {
            if let Some(rule) = self.deadzones.shared_radial(partner).copied() {
                let state = self.axes.entry(partner).or_default();
                state.suppressed = rule.apply(state.raw, raw).suppressed;
            }
        }
        Ok(())
    }

    /// Appends a listener for `(component, kind)`.
    pub fn subscribe<F>(&mut self, component: Component, kind: EventKind, listener: F)
    where
        F: FnMut(&Event) + Send + 'static,
    {
        self.registry.subscribe(component, kind, listener);
    }

    #[must_use]
    pub fn deadzones(&self) -> &DeadzoneEngine {
        &self.deadzones
    }

    #[must_use]
    pub fn components(&self) -> &ComponentMap {
        &self.components
    }

    /// Returns the tracked state of an axis that has reported or been configured.
    #[must_use]
    pub fn axis_state(&self, component: Component) -> Option<AxisState> {
        self.axes.get(&component).copied()
    }

    /// Runs one poll tick: refreshes `source` and drains its queue.
    ///
    /// Unmappable samples are logged and skipped. Returns the number of
    /// samples taken from the source.
    pub fn tick<S>(&mut self, source: &mut S) -> usize
    where
        S: RawInputSource + ?Sized,
    {
        source.refresh();

        let mut drained = 0;
        while let Some(sample) = source.next_sample() {
            drained += 1;
            if let Err(e) = self.process(sample) {
                warn!("{}", e);
            }
        }

        trace!("Poll tick processed {} samples", drained);
        drained
    }

    /// Processes a single raw sample and publishes the resulting events.
    ///
    /// Returns the number of events published.
    ///
    /// # Errors
    ///
    /// Returns [`UnmappedInput`] when the sample cannot be interpreted; no
    /// state changes and nothing is published in that case.
    pub fn process(&mut self, sample: RawSample) -> std::result::Result<usize, UnmappedInput> {
        let RawSample {
            identifier,
            value,
            timestamp_nanos: timestamp,
        } = sample;

        match self.components.classify(identifier) {
            Classified::Button(button) => self.process_button(button, value, timestamp),
            Classified::Dpad => self.process_dpad(value, timestamp),
            Classified::Axis(axis) => Ok(self.process_axis(axis, value, timestamp)),
            Classified::Unmapped => Err(UnmappedInput::UnknownIdentifier(identifier)),
        }
    }

    fn process_button(
        &mut self,
        button: Component,
        value: f32,
        timestamp: u64,
    ) -> std::result::Result<usize, UnmappedInput> {
        match self.clicks.update(button, value, timestamp) {
            Transition::Pressed(pressed) => {
                self.registry.publish(button, &pressed);
                Ok(1)
            }
            Transition::Released(released, clicked) => {
                self.registry.publish(button, &released);
                self.registry.publish(button, &clicked);
                Ok(2)
            }
            Transition::Anomalous => Err(UnmappedInput::MalformedButtonValue {
                component: button,
                value,
            }),
        }
    }

    fn process_dpad(&mut self, code: f32, timestamp: u64) -> std::result::Result<usize, UnmappedInput> {
        if code == DPAD_CENTERED {
            self.registry
                .publish(Component::DpadAny, &Event::ButtonReleased { timestamp });
            return Ok(1);
        }

        let direction = dpad_direction(code).ok_or(UnmappedInput::UnknownDpadCode(code))?;
        self.registry
            .publish(direction, &Event::ButtonPressed { timestamp });
        Ok(1)
    }

    fn process_axis(&mut self, axis: Component, raw: f32, timestamp: u64) -> usize {
        if let Some(rule) = self.deadzones.shared_radial(axis).copied() {
            return self.process_shared_axis(&rule, axis, raw, timestamp);
        }

        let partner_raw = self.partner_raw(axis);
        let filtered = self.deadzones.filter(axis, raw, partner_raw);

        let state = self.axes.entry(axis).or_default();
        state.raw = raw;

        let value = match filtered {
            None => raw,
            Some(f) if f.suppressed => {
                if state.suppressed {
                    return 0;
                }
                state.suppressed = true;
                0.0
            }
            Some(f) => {
                state.suppressed = false;
                f.value
            }
        };

        self.registry
            .publish(axis, &Event::AxisMoved { timestamp, value });
        1
    }

    /// Sample of an axis covered by its partner's radial rule: publishes the
    /// entering `AxisMoved(0.0)` and nothing else.
    fn process_shared_axis(
        &mut self,
        rule: &DeadzoneRule,
        axis: Component,
        raw: f32,
        timestamp: u64,
    ) -> usize {
        let owner_raw = self.axes.get(&rule.owner()).map_or(0.0, |state| state.raw);
        let inside = rule.apply(raw, owner_raw).suppressed;

        let state = self.axes.entry(axis).or_default();
        state.raw = raw;

        let entering = inside && !state.suppressed;
        state.suppressed = inside;
        if !entering {
            return 0;
        }

        self.registry
            .publish(axis, &Event::AxisMoved { timestamp, value: 0.0 });
        1
    }

    /// Latest raw value of the radial partner of `axis`, `0.0` if it has none
    /// or has not reported yet.
    fn partner_raw(&self, axis: Component) -> f32 {
        self.deadzones
            .rule(axis)
            .and_then(|rule| rule.partner())
            .and_then(|partner| self.axes.get(&partner))
            .map_or(0.0, |state| state.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamepad::component::{RawAxis, RawIdentifier};
    use crate::gamepad::source::MockRawInputSource;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    type Recorded = Arc<Mutex<Vec<(Component, Event)>>>;

    /// Helper to record every event of `kind` on `components` into one log.
    fn record(engine: &mut InputEngine, components: &[Component], kinds: &[EventKind]) -> Recorded {
        let log: Recorded = Arc::new(Mutex::new(Vec::new()));
        for &component in components {
            for &kind in kinds {
                let log = Arc::clone(&log);
                engine.subscribe(component, kind, move |event| {
                    log.lock().unwrap().push((component, *event));
                });
            }
        }
        log
    }

    fn axis(raw: RawAxis, value: f32, timestamp: u64) -> RawSample {
        RawSample::new(RawIdentifier::Axis(raw), value, timestamp)
    }

    fn button(index: u8, value: f32, timestamp: u64) -> RawSample {
        RawSample::new(RawIdentifier::Button(index), value, timestamp)
    }

    fn axis_values(log: &Recorded) -> Vec<f32> {
        log.lock()
            .unwrap()
            .iter()
            .filter_map(|(_, e)| match e {
                Event::AxisMoved { value, .. } => Some(*value),
                _ => None,
            })
            .collect()
    }

    // ==================== Axis Tests ====================

    #[test]
    fn test_axis_without_deadzone_passes_through() {
        let mut engine = InputEngine::new();
        let log = record(&mut engine, &[Component::LeftStickX], &[EventKind::AxisMoved]);

        for (t, v) in [0.0, 0.01, 0.01, -0.5].into_iter().enumerate() {
            engine.process(axis(RawAxis::X, v, t as u64)).unwrap();
        }

        assert_eq!(axis_values(&log), vec![0.0, 0.01, 0.01, -0.5]);
    }

    #[test]
    fn test_linear_zero_event_fires_once() {
        let mut engine = InputEngine::new();
        engine.configure_deadzone(Component::Trigger, DeadzoneKind::Linear, 0.1).unwrap();
        let log = record(&mut engine, &[Component::Trigger], &[EventKind::AxisMoved]);

        for (t, v) in [0.5, 0.05, 0.03, -0.02, 0.0, 1.0].into_iter().enumerate() {
            engine.process(axis(RawAxis::Z, v, t as u64)).unwrap();
        }

        let values = axis_values(&log);
        assert_eq!(values.len(), 3);
        assert!((values[0] - 0.5 * (0.4 / 0.9)).abs() < 1e-5);
        assert_eq!(values[1], 0.0);
        assert!((values[2] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_axis_starts_at_rest() {
        let mut engine = InputEngine::new();
        engine.configure_deadzone(Component::Trigger, DeadzoneKind::Linear, 0.1).unwrap();
        let log = record(&mut engine, &[Component::Trigger], &[EventKind::AxisMoved]);

        engine.process(axis(RawAxis::Z, 0.05, 1)).unwrap();
        engine.process(axis(RawAxis::Z, 0.0, 2)).unwrap();

        assert!(log.lock().unwrap().is_empty());
        assert_eq!(
            engine.axis_state(Component::Trigger),
            Some(AxisState { raw: 0.0, suppressed: true })
        );
    }

    #[test]
    fn test_reentering_deadzone_fires_again() {
        let mut engine = InputEngine::new();
        engine.configure_deadzone(Component::LeftStickY, DeadzoneKind::Linear, 0.2).unwrap();
        let log = record(&mut engine, &[Component::LeftStickY], &[EventKind::AxisMoved]);

        for (t, v) in [0.9, 0.1, 0.1, 0.9, 0.1].into_iter().enumerate() {
            engine.process(axis(RawAxis::Y, v, t as u64)).unwrap();
        }

        let zeros = axis_values(&log).into_iter().filter(|v| *v == 0.0).count();
        assert_eq!(zeros, 2);
        assert_eq!(axis_values(&log).len(), 4);
    }

    #[test]
    fn test_radial_right_stick_scenario() {
        let mut engine = InputEngine::new();
        engine.configure_deadzone(Component::RightStickX, DeadzoneKind::Radial, 0.25).unwrap();
        engine.configure_deadzone(Component::RightStickY, DeadzoneKind::Radial, 0.25).unwrap();
        let log = record(
            &mut engine,
            &[Component::RightStickX, Component::RightStickY],
            &[EventKind::AxisMoved],
        );

        // Magnitude ~0.141 < 0.25
        engine.process(axis(RawAxis::Rx, 0.1, 1)).unwrap();
        engine.process(axis(RawAxis::Ry, 0.1, 2)).unwrap();
        assert!(log.lock().unwrap().is_empty());

        // Magnitude 0.9 >= 0.25
        engine.process(axis(RawAxis::Ry, 0.0, 3)).unwrap();
        engine.process(axis(RawAxis::Rx, 0.9, 4)).unwrap();

        let log = log.lock().unwrap();
        assert_eq!(log.len(), 1);
        let (component, event) = log[0];
        assert_eq!(component, Component::RightStickX);
        match event {
            Event::AxisMoved { timestamp, value } => {
                assert_eq!(timestamp, 4);
                assert!((value - 0.866_666_7).abs() < 1e-4);
            }
            other => panic!("expected AxisMoved, got {:?}", other),
        }
    }

    #[test]
    fn test_radial_reads_partner_latest_value() {
        let mut engine = InputEngine::new();
        engine.configure_deadzone(Component::LeftStickX, DeadzoneKind::Radial, 0.25).unwrap();
        let log = record(&mut engine, &[Component::LeftStickX], &[EventKind::AxisMoved]);

        // Y is covered by X's rule and stays silent, but its raw value is tracked
        engine.process(axis(RawAxis::Y, 0.2, 1)).unwrap();
        // X alone would be inside the deadzone, jointly it is not
        engine.process(axis(RawAxis::X, 0.2, 2)).unwrap();

        let values = axis_values(&log);
        assert_eq!(values.len(), 1);
        let magnitude = 0.2_f32.hypot(0.2);
        let expected = (0.2 / magnitude) * ((magnitude - 0.25) / 0.75);
        assert!((values[0] - expected).abs() < 1e-5);
    }

    #[test]
    fn test_radial_both_axes_report_zero_inside() {
        let mut engine = InputEngine::new();
        engine.configure_deadzone(Component::LeftStickX, DeadzoneKind::Radial, 0.3).unwrap();
        engine.configure_deadzone(Component::LeftStickY, DeadzoneKind::Radial, 0.3).unwrap();
        let log = record(
            &mut engine,
            &[Component::LeftStickX, Component::LeftStickY],
            &[EventKind::AxisMoved],
        );

        engine.process(axis(RawAxis::X, 0.8, 1)).unwrap();
        engine.process(axis(RawAxis::Y, 0.6, 2)).unwrap();
        // Stick still deflected along X
        engine.process(axis(RawAxis::Y, 0.0, 3)).unwrap();
        // Magnitude 0.1, then ~0.141: both inside
        engine.process(axis(RawAxis::X, 0.1, 4)).unwrap();
        engine.process(axis(RawAxis::Y, 0.1, 5)).unwrap();
        engine.process(axis(RawAxis::X, 0.05, 6)).unwrap();

        let log = log.lock().unwrap();
        assert_eq!(log.len(), 5);
        assert_eq!(log[3], (Component::LeftStickX, Event::AxisMoved { timestamp: 4, value: 0.0 }));
        assert_eq!(log[4], (Component::LeftStickY, Event::AxisMoved { timestamp: 5, value: 0.0 }));
    }

    #[test]
    fn test_radial_partner_stays_silent() {
        let mut engine = InputEngine::new();
        engine.configure_deadzone(Component::RightStickX, DeadzoneKind::Radial, 0.25).unwrap();
        engine.configure_deadzone(Component::RightStickY, DeadzoneKind::Radial, 0.25).unwrap();
        let y_log = record(&mut engine, &[Component::RightStickY], &[EventKind::AxisMoved]);

        engine.process(axis(RawAxis::Rx, 1.0, 1)).unwrap();
        engine.process(axis(RawAxis::Rx, -1.0, 2)).unwrap();

        assert!(y_log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_radial_rule_on_one_axis_covers_partner() {
        let mut engine = InputEngine::new();
        engine.configure_deadzone(Component::RightStickX, DeadzoneKind::Radial, 0.25).unwrap();
        let log = record(
            &mut engine,
            &[Component::RightStickX, Component::RightStickY],
            &[EventKind::AxisMoved],
        );

        // Magnitude ~0.141 then ~0.112: the stick rests
        engine.process(axis(RawAxis::Rx, 0.1, 1)).unwrap();
        engine.process(axis(RawAxis::Ry, 0.1, 2)).unwrap();
        engine.process(axis(RawAxis::Ry, 0.05, 3)).unwrap();

        assert!(log.lock().unwrap().is_empty());
        assert_eq!(
            engine.axis_state(Component::RightStickY),
            Some(AxisState { raw: 0.05, suppressed: true })
        );
    }

    #[test]
    fn test_shared_radial_partner_reports_zero_once() {
        let mut engine = InputEngine::new();
        engine.configure_deadzone(Component::LeftStickX, DeadzoneKind::Radial, 0.3).unwrap();
        let y_log = record(&mut engine, &[Component::LeftStickY], &[EventKind::AxisMoved]);

        // Live deflections publish nothing for Y
        assert_eq!(engine.process(axis(RawAxis::Y, 0.9, 1)), Ok(0));
        assert_eq!(engine.process(axis(RawAxis::Y, -0.7, 2)), Ok(0));
        // Entering publishes one zero, staying inside publishes nothing
        assert_eq!(engine.process(axis(RawAxis::Y, 0.1, 3)), Ok(1));
        assert_eq!(engine.process(axis(RawAxis::Y, 0.05, 4)), Ok(0));
        // Leaving and coming back fires again
        engine.process(axis(RawAxis::Y, 0.8, 5)).unwrap();
        engine.process(axis(RawAxis::Y, 0.0, 6)).unwrap();

        assert_eq!(
            *y_log.lock().unwrap(),
            vec![
                (Component::LeftStickY, Event::AxisMoved { timestamp: 3, value: 0.0 }),
                (Component::LeftStickY, Event::AxisMoved { timestamp: 6, value: 0.0 }),
            ]
        );
    }

    #[test]
    fn test_shared_radial_partner_uses_owner_value() {
        let mut engine = InputEngine::new();
        engine.configure_deadzone(Component::LeftStickX, DeadzoneKind::Radial, 0.3).unwrap();
        let y_log = record(&mut engine, &[Component::LeftStickY], &[EventKind::AxisMoved]);

        // Y leaves the deadzone, then X holds the stick outside it
        engine.process(axis(RawAxis::Y, 0.5, 1)).unwrap();
        engine.process(axis(RawAxis::X, 0.6, 2)).unwrap();
        engine.process(axis(RawAxis::Y, 0.0, 3)).unwrap();
        assert!(y_log.lock().unwrap().is_empty());

        // Stick back at center
        engine.process(axis(RawAxis::X, 0.0, 4)).unwrap();
        engine.process(axis(RawAxis::Y, 0.1, 5)).unwrap();
        assert_eq!(
            *y_log.lock().unwrap(),
            vec![(Component::LeftStickY, Event::AxisMoved { timestamp: 5, value: 0.0 })]
        );
    }

    // ==================== Button Tests ====================

    #[test]
    fn test_press_release_click_order() {
        let mut engine = InputEngine::new();
        let log = record(
            &mut engine,
            &[Component::AButton],
            &[EventKind::ButtonPressed, EventKind::ButtonReleased, EventKind::ButtonClicked],
        );

        assert_eq!(engine.process(button(0, 1.0, 1_000)), Ok(1));
        assert_eq!(engine.process(button(0, 0.0, 4_000)), Ok(2));

        let events: Vec<Event> = log.lock().unwrap().iter().map(|(_, e)| *e).collect();
        assert_eq!(
            events,
            vec![
                Event::ButtonPressed { timestamp: 1_000 },
                Event::ButtonReleased { timestamp: 4_000 },
                Event::ButtonClicked { timestamp: 4_000, hold_duration_nanos: 3_000 },
            ]
        );
    }

    #[test]
    fn test_malformed_button_value_dropped() {
        let mut engine = InputEngine::new();
        let log = record(
            &mut engine,
            &[Component::BButton],
            &[EventKind::ButtonPressed, EventKind::ButtonReleased, EventKind::ButtonClicked],
        );

        assert_eq!(
            engine.process(button(1, 0.5, 1)),
            Err(UnmappedInput::MalformedButtonValue { component: Component::BButton, value: 0.5 })
        );
        assert!(log.lock().unwrap().is_empty());
    }

    // ==================== D-Pad Tests ====================

    #[test]
    fn test_dpad_press_and_release() {
        let mut engine = InputEngine::new();
        let log = record(
            &mut engine,
            &[Component::DpadRight, Component::DpadAny],
            &[EventKind::ButtonPressed, EventKind::ButtonReleased],
        );

        engine.process(axis(RawAxis::Pov, 0.5, 10)).unwrap();
        engine.process(axis(RawAxis::Pov, 0.0, 20)).unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                (Component::DpadRight, Event::ButtonPressed { timestamp: 10 }),
                (Component::DpadAny, Event::ButtonReleased { timestamp: 20 }),
            ]
        );
    }

    #[test]
    fn test_dpad_every_direction() {
        let mut engine = InputEngine::new();
        let directions = [
            (0.125, Component::DpadUpLeft),
            (0.25, Component::DpadUp),
            (0.375, Component::DpadUpRight),
            (0.5, Component::DpadRight),
            (0.625, Component::DpadDownRight),
            (0.75, Component::DpadDown),
            (0.875, Component::DpadDownLeft),
            (1.0, Component::DpadLeft),
        ];
        let components: Vec<_> = directions.iter().map(|&(_, c)| c).collect();
        let log = record(&mut engine, &components, &[EventKind::ButtonPressed]);

        for (t, &(code, _)) in directions.iter().enumerate() {
            engine.process(axis(RawAxis::Pov, code, t as u64)).unwrap();
        }

        let pressed: Vec<Component> = log.lock().unwrap().iter().map(|(c, _)| *c).collect();
        assert_eq!(pressed, components);
    }

    #[test]
    fn test_unknown_dpad_code_dropped() {
        let mut engine = InputEngine::new();
        let log = record(&mut engine, &Component::ALL, &[EventKind::ButtonPressed, EventKind::ButtonReleased]);

        assert_eq!(
            engine.process(axis(RawAxis::Pov, 0.3, 1)),
            Err(UnmappedInput::UnknownDpadCode(0.3))
        );
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unmapped_identifier_dropped() {
        let mut engine = InputEngine::new();
        assert_eq!(
            engine.process(button(12, 1.0, 1)),
            Err(UnmappedInput::UnknownIdentifier(RawIdentifier::Button(12)))
        );
        assert_eq!(
            engine.process(axis(RawAxis::Rz, 0.4, 2)),
            Err(UnmappedInput::UnknownIdentifier(RawIdentifier::Axis(RawAxis::Rz)))
        );
    }

    // ==================== Tick Tests ====================

    #[test]
    fn test_tick_refreshes_then_drains() {
        let mut engine = InputEngine::new();
        let log = record(&mut engine, &[Component::AButton], &[EventKind::ButtonPressed]);

        let mut queue = VecDeque::from(vec![
            button(0, 1.0, 1),
            button(42, 1.0, 2), // unmapped, skipped
            button(0, 0.0, 3),
            button(0, 1.0, 4),
        ]);

        let mut source = MockRawInputSource::new();
        source.expect_refresh().times(1).return_const(());
        source
            .expect_next_sample()
            .times(5)
            .returning(move || queue.pop_front());

        assert_eq!(engine.tick(&mut source), 4);
        assert_eq!(log.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_tick_with_empty_queue() {
        let mut engine = InputEngine::new();

        let mut source = MockRawInputSource::new();
        source.expect_refresh().times(1).return_const(());
        source.expect_next_sample().times(1).returning(|| None);

        assert_eq!(engine.tick(&mut source), 0);
    }

    #[test]
    fn test_configure_rejects_invalid_rule() {
        let mut engine = InputEngine::new();
        assert!(engine
            .configure_deadzone(Component::Trigger, DeadzoneKind::Radial, 0.1)
            .is_err());
        assert!(engine.deadzones().rule(Component::Trigger).is_none());
        assert!(engine.axis_state(Component::Trigger).is_none());
    }
}
