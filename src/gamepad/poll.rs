//! # Poll Loop
//!
//! Drives an [`InputEngine`] against a [`RawInputSource`] at a fixed period
//! on a dedicated tokio task.
//!
//! ## Lifecycle
//!
//! ```text
//!   STOPPED --start()--> RUNNING --stop()--> STOPPED
//! ```
//!
//! While running, the poll task exclusively owns the engine and the source;
//! `stop()` hands both back so the loop can be reconfigured and restarted.
//! Deadzones and listeners can only be changed while stopped.
//!
//! The stop signal is only observed between ticks: a tick that has started
//! always drains the whole queue and finishes publishing.
//!
//! ## Usage
//!
//! ```no_run
//! use std::time::Duration;
//! use rov_control::controller::evdev_source::EvdevSource;
//! use rov_control::gamepad::component::Component;
//! use rov_control::gamepad::deadzone::DeadzoneKind;
//! use rov_control::gamepad::event::EventKind;
//! use rov_control::gamepad::poll::PollLoop;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let source = EvdevSource::open(None)?;
//!     let mut gamepad = PollLoop::new(source, Duration::from_millis(10));
//!
//!     gamepad.configure_deadzone(Component::Trigger, DeadzoneKind::Linear, 0.1)?;
//!     gamepad.subscribe(Component::Trigger, EventKind::AxisMoved, |event| {
//!         println!("Trigger: {:?}", event);
//!     })?;
//!
//!     gamepad.start()?;
//!     tokio::signal::ctrl_c().await?;
//!     gamepad.stop().await?;
//!     Ok(())
//! }
//! ```

use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use super::component::Component;
use super::deadzone::DeadzoneKind;
use super::engine::InputEngine;
use super::event::{Event, EventKind};
use super::source::RawInputSource;
use crate::error::{Result, RovControlError};

enum LoopState<S> {
    Stopped {
        engine: InputEngine,
        source: S,
    },
    Running {
        shutdown: oneshot::Sender<()>,
        task: JoinHandle<(InputEngine, S)>,
    },
    /// The poll task could not be joined; engine and source are gone.
    Failed,
}

/// Fixed-rate poll loop with a STOPPED/RUNNING lifecycle.
pub struct PollLoop<S> {
    period: Duration,
    state: LoopState<S>,
}

impl<S> std::fmt::Debug for PollLoop<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollLoop")
            .field("period", &self.period)
            .field("running", &matches!(self.state, LoopState::Running { .. }))
            .finish_non_exhaustive()
    }
}

impl<S> PollLoop<S>
where
    S: RawInputSource + 'static,
{
    /// Creates a stopped loop with a fresh [`InputEngine`].
    pub fn new(source: S, period: Duration) -> Self {
        Self::with_engine(InputEngine::new(), source, period)
    }

    /// Creates a stopped loop around an existing engine.
    pub fn with_engine(engine: InputEngine, source: S, period: Duration) -> Self {
        Self {
            period,
            state: LoopState::Stopped { engine, source },
        }
    }

    /// Tick period of the loop.
    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running { .. })
    }

    /// Configures the deadzone owned by `component`.
    ///
    /// # Errors
    ///
    /// - `AlreadyRunning` if the loop is running
    /// - `Configuration` if the rule is invalid
    pub fn configure_deadzone(
        &mut self,
        component: Component,
        kind: DeadzoneKind,
        threshold: f32,
    ) -> Result<()> {
        self.engine_mut()?
            .configure_deadzone(component, kind, threshold)
    }

    /// Appends a listener for `(component, kind)`.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyRunning` if the loop is running.
    pub fn subscribe<F>(&mut self, component: Component, kind: EventKind, listener: F) -> Result<()>
    where
        F: FnMut(&Event) + Send + 'static,
    {
        self.engine_mut()?.subscribe(component, kind, listener);
        Ok(())
    }

    /// Spawns the poll task. Must be called from within a tokio runtime.
    ///
    /// The first tick runs immediately.
    ///
    /// # Errors
    ///
    /// - `AlreadyRunning` if the loop is running
    /// - `Configuration` if the period is zero
    /// - `PollTask` if an earlier poll task was lost
    pub fn start(&mut self) -> Result<()> {
        if self.period.is_zero() {
            return Err(RovControlError::Configuration(
                "poll period must be greater than 0".to_string(),
            ));
        }

        match std::mem::replace(&mut self.state, LoopState::Failed) {
            LoopState::Stopped { engine, source } => {
                let (shutdown, shutdown_rx) = oneshot::channel();
                let task = tokio::spawn(run(engine, source, self.period, shutdown_rx));
                self.state = LoopState::Running { shutdown, task };
                info!("Poll loop started ({:?} period)", self.period);
                Ok(())
            }
            running @ LoopState::Running { .. } => {
                self.state = running;
                Err(RovControlError::AlreadyRunning)
            }
            LoopState::Failed => Err(RovControlError::PollTask(
                "engine was lost by a previous poll task".to_string(),
            )),
        }
    }

    /// Stops the poll task after its current tick and takes back the engine.
    ///
    /// # Errors
    ///
    /// - `NotRunning` if the loop is stopped
    /// - `PollTask` if the task could not be joined
    pub async fn stop(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, LoopState::Failed) {
            LoopState::Running { shutdown, task } => {
                // The task may already be gone; joining reports that
                let _ = shutdown.send(());

                let (engine, source) = task
                    .await
                    .map_err(|e| RovControlError::PollTask(e.to_string()))?;
                self.state = LoopState::Stopped { engine, source };
                info!("Poll loop stopped");
                Ok(())
            }
            stopped @ LoopState::Stopped { .. } => {
                self.state = stopped;
                Err(RovControlError::NotRunning)
            }
            LoopState::Failed => Err(RovControlError::NotRunning),
        }
    }

    fn engine_mut(&mut self) -> Result<&mut InputEngine> {
        match &mut self.state {
            LoopState::Stopped { engine, .. } => Ok(engine),
            LoopState::Running { .. } => Err(RovControlError::AlreadyRunning),
            LoopState::Failed => Err(RovControlError::PollTask(
                "engine was lost by a previous poll task".to_string(),
            )),
        }
    }
}

/// Body of the poll task.
async fn run<S>(
    mut engine: InputEngine,
    mut source: S,
    period: Duration,
    mut shutdown: oneshot::Receiver<()>,
) -> (InputEngine, S)
where
    S: RawInputSource,
{
    let mut ticker = interval(period);
    // A slow listener delays the following ticks instead of bunching them up
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut ticks: u64 = 0;
    loop {
        tokio::select! {
            biased;

            // Sender dropped counts as a stop request
            _ = &mut shutdown => break,

            _ = ticker.tick() => {
                engine.tick(&mut source);
                ticks += 1;
            }
        }
    }

    debug!("Poll task exiting after {} ticks", ticks);
    (engine, source)
}
