//! Trait abstraction for the raw input source to enable testing

use super::component::RawIdentifier;

/// One raw sample from the hardware controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    pub identifier: RawIdentifier,
    /// `0.0`/`1.0` for buttons, `-1.0..=1.0` for axes, a d-pad code for POV.
    pub value: f32,
    pub timestamp_nanos: u64,
}

impl RawSample {
    pub fn new(identifier: RawIdentifier, value: f32, timestamp_nanos: u64) -> Self {
        Self {
            identifier,
            value,
            timestamp_nanos,
        }
    }
}

/// Source of raw controller samples polled by the input engine.
///
/// A source never reports errors: if the device misbehaves or disappears,
/// `refresh` simply queues nothing.
#[cfg_attr(test, mockall::automock)]
pub trait RawInputSource: Send {
    /// Pulls pending hardware state into the sample queue.
    fn refresh(&mut self);

    /// Pops the next queued sample, `None` once the queue is empty.
    fn next_sample(&mut self) -> Option<RawSample>;
}

#[cfg(test)]
pub mod mocks {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Scripted source for testing
    ///
    /// Samples pushed through any clone become visible on the next `refresh`.
    #[derive(Clone, Default)]
    pub struct ScriptedSource {
        pub pending: Arc<Mutex<VecDeque<RawSample>>>,
        pub refresh_count: Arc<Mutex<usize>>,
        queue: VecDeque<RawSample>,
    }

    impl ScriptedSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push(&self, sample: RawSample) {
            self.pending.lock().unwrap().push_back(sample);
        }

        pub fn get_refresh_count(&self) -> usize {
            *self.refresh_count.lock().unwrap()
        }
    }

    impl RawInputSource for ScriptedSource {
        fn refresh(&mut self) {
            *self.refresh_count.lock().unwrap() += 1;
            self.queue.extend(self.pending.lock().unwrap().drain(..));
        }

        fn next_sample(&mut self) -> Option<RawSample> {
            self.queue.pop_front()
        }
    }
}
