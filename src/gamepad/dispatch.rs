//! # Event Dispatch Registry
//!
//! Listener registration keyed by `(Component, EventKind)` with synchronous
//! fan-out in registration order.
//!
//! Listeners run on the publishing thread and must not block. A listener that
//! panics is logged and skipped; the remaining listeners still receive the
//! event.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use tracing::error;

use super::component::Component;
use super::event::{Event, EventKind};

/// Boxed event callback.
pub type Listener = Box<dyn FnMut(&Event) + Send>;

/// Subscription table from `(Component, EventKind)` to ordered listeners.
#[derive(Default)]
pub struct EventRegistry {
    listeners: HashMap<(Component, EventKind), Vec<Listener>>,
}

impl std::fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRegistry")
            .field("subscriptions", &self.len())
            .finish_non_exhaustive()
    }
}

impl EventRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `listener` to the listeners of `(component, kind)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rov_control::gamepad::component::Component;
    /// use rov_control::gamepad::dispatch::EventRegistry;
    /// use rov_control::gamepad::event::{Event, EventKind};
    ///
    /// let mut registry = EventRegistry::new();
    /// registry.subscribe(Component::AButton, EventKind::ButtonPressed, |event| {
    ///     println!("A pressed at {}", event.timestamp());
    /// });
    /// registry.publish(Component::AButton, &Event::ButtonPressed { timestamp: 1 });
    /// ```
    pub fn subscribe<F>(&mut self, component: Component, kind: EventKind, listener: F)
    where
        F: FnMut(&Event) + Send + 'static,
    {
        self.listeners
            .entry((component, kind))
            .or_default()
            .push(Box::new(listener));
    }

    /// Invokes every listener registered for `(component, event.kind())`.
    ///
    /// Returns the number of listeners that completed without panicking.
    pub fn publish(&mut self, component: Component, event: &Event) -> usize {
        let Some(listeners) = self.listeners.get_mut(&(component, event.kind())) else {
            return 0;
        };

        let mut delivered = 0;
        for listener in listeners.iter_mut() {
            match panic::catch_unwind(AssertUnwindSafe(|| listener(event))) {
                Ok(()) => delivered += 1,
                Err(payload) => {
                    let reason = payload
                        .downcast_ref::<&str>()
                        .map(|s| s.to_string())
                        .or_else(|| payload.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "unknown panic".to_string());
                    error!("Listener for {:?} {:?} panicked: {}", component, event.kind(), reason);
                }
            }
        }
        delivered
    }

    /// Total number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
