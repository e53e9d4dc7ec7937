//! # Evdev Gamepad Source
//!
//! Linux [`RawInputSource`] backed by an evdev gamepad device.
//!
//! ## Controller Detection
//!
//! Without an explicit device path, `/dev/input/event*` devices are scanned in
//! sorted order and the first one exposing both `BTN_SOUTH` and `ABS_X` is
//! used.
//!
//! ## Reading
//!
//! evdev reads block, so a dedicated reader thread owns the device and forwards
//! translated samples over a channel. `refresh()` moves whatever has arrived
//! into the sample queue. If the device fails or disappears the reader ends
//! and the source keeps reporting no samples.

use evdev::{AbsoluteAxisType, Device, Key};
use std::collections::VecDeque;
use std::path::Path;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::translate::{AbsRange, EventTranslator};
use crate::error::{Result, RovControlError};
use crate::gamepad::source::{RawInputSource, RawSample};

/// Axes whose ranges are read from the device.
const RANGED_AXES: [AbsoluteAxisType; 6] = [
    AbsoluteAxisType::ABS_X,
    AbsoluteAxisType::ABS_Y,
    AbsoluteAxisType::ABS_RX,
    AbsoluteAxisType::ABS_RY,
    AbsoluteAxisType::ABS_Z,
    AbsoluteAxisType::ABS_RZ,
];

/// Gamepad handle feeding the input engine.
pub struct EvdevSource {
    device_path: String,
    name: Option<String>,
    receiver: mpsc::UnboundedReceiver<RawSample>,
    queue: VecDeque<RawSample>,
}

impl std::fmt::Debug for EvdevSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvdevSource")
            .field("device_path", &self.device_path)
            .field("name", &self.name)
            .field("queued", &self.queue.len())
            .finish_non_exhaustive()
    }
}

impl EvdevSource {
    /// Opens a gamepad and starts its reader thread.
    ///
    /// # Arguments
    ///
    /// * `device_path` - `/dev/input/eventN` to open, or `None` to auto-detect
    ///
    /// # Errors
    ///
    /// - `ControllerNotFound`: No gamepad found on the system
    /// - `Controller`: The device could not be opened
    /// - `Io`: The reader thread could not be spawned
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rov_control::controller::evdev_source::EvdevSource;
    ///
    /// let source = EvdevSource::open(None)?;
    /// println!("Connected to gamepad at: {}", source.device_path());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open(device_path: Option<&str>) -> Result<Self> {
        let (device, device_path) = match device_path {
            Some(path) => {
                let device = Device::open(path)
                    .map_err(|e| RovControlError::Controller(format!("Failed to open {}: {}", path, e)))?;
                (device, path.to_string())
            }
            None => Self::detect()?,
        };

        let name = device.name().map(str::to_string);
        info!(
            "Using gamepad {} at {}",
            name.as_deref().unwrap_or("<unnamed>"),
            device_path
        );

        let translator = Self::translator_for(&device);
        let (sender, receiver) = mpsc::unbounded_channel();
        std::thread::Builder::new()
            .name("gamepad-reader".to_string())
            .spawn(move || read_events(device, translator, sender))?;

        Ok(Self {
            device_path,
            name,
            receiver,
            queue: VecDeque::new(),
        })
    }

    /// Scans `/dev/input` for the first gamepad.
    fn detect() -> Result<(Device, String)> {
        let input_dir = Path::new("/dev/input");

        if !input_dir.exists() {
            return Err(RovControlError::Controller(
                "/dev/input directory not found".to_string(),
            ));
        }

        let mut entries: Vec<_> = std::fs::read_dir(input_dir)
            .map_err(|e| RovControlError::Controller(format!("Failed to read /dev/input: {}", e)))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| RovControlError::Controller(format!("Failed to read directory entry: {}", e)))?;

        // Sort entries for deterministic device selection when multiple gamepads are connected
        entries.sort_by_key(|entry| entry.path());

        for entry in entries {
            let path = entry.path();

            match path.file_name() {
                Some(filename) if filename.to_string_lossy().starts_with("event") => {}
                _ => continue,
            }

            match Device::open(&path) {
                Ok(device) => {
                    debug!(
                        "Found input device: {} ({})",
                        path.display(),
                        device.name().unwrap_or("<unnamed>")
                    );

                    if is_gamepad(&device) {
                        return Ok((device, path.to_string_lossy().to_string()));
                    }
                }
                Err(e) => {
                    // Permission denied or other errors - skip device
                    debug!("Could not open {}: {}", path.display(), e);
                }
            }
        }

        Err(RovControlError::ControllerNotFound)
    }

    /// Builds a translator using the ranges the device reports.
    fn translator_for(device: &Device) -> EventTranslator {
        let mut translator = EventTranslator::new();

        let supported = match device.supported_absolute_axes() {
            Some(axes) => axes,
            None => return translator,
        };

        match device.get_abs_state() {
            Ok(state) => {
                for axis in RANGED_AXES {
                    if supported.contains(axis) {
                        let info = &state[axis.0 as usize];
                        let range = AbsRange::new(info.minimum, info.maximum);
                        debug!("Axis {:?} range {:?}", axis, range);
                        translator.set_range(axis, range);
                    }
                }
            }
            Err(e) => warn!("Could not read axis ranges, using defaults: {}", e),
        }

        translator
    }

    /// Path of the opened `/dev/input/eventN` device.
    pub fn device_path(&self) -> &str {
        &self.device_path
    }

    /// Human-readable device name, if the driver reports one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl RawInputSource for EvdevSource {
    fn refresh(&mut self) {
        while let Ok(sample) = self.receiver.try_recv() {
            self.queue.push_back(sample);
        }
    }

    fn next_sample(&mut self) -> Option<RawSample> {
        self.queue.pop_front()
    }
}

fn is_gamepad(device: &Device) -> bool {
    let has_buttons = device
        .supported_keys()
        .map_or(false, |keys| keys.contains(Key::BTN_SOUTH));
    let has_stick = device
        .supported_absolute_axes()
        .map_or(false, |axes| axes.contains(AbsoluteAxisType::ABS_X));
    has_buttons && has_stick
}

/// Blocking reader loop; ends on device error or when the source is dropped.
fn read_events(
    mut device: Device,
    mut translator: EventTranslator,
    sender: mpsc::UnboundedSender<RawSample>,
) {
    loop {
        let events = match device.fetch_events() {
            Ok(events) => events,
            Err(e) => {
                warn!("Gamepad read failed, no further samples: {}", e);
                return;
            }
        };

        for event in events {
            if let Some(sample) = translator.translate(&event) {
                if sender.send(sample).is_err() {
                    debug!("Gamepad source dropped, stopping reader");
                    return;
                }
            }
        }
    }
}
