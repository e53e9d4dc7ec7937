//! # Error Types
//!
//! Custom error types for ROV Control using `thiserror`.

use thiserror::Error;

use crate::gamepad::component::{Component, RawIdentifier};

/// Main error type for ROV Control
#[derive(Debug, Error)]
pub enum RovControlError {
    /// Invalid deadzone setup or configuration value
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// `start()` called while the poll loop is running
    #[error("Poll loop is already running")]
    AlreadyRunning,

    /// `stop()` called while the poll loop is stopped
    #[error("Poll loop is not running")]
    NotRunning,

    /// The poll task terminated abnormally
    #[error("Poll task failed: {0}")]
    PollTask(String),

    /// Configuration file parse errors
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No usable gamepad under /dev/input
    #[error("No gamepad found")]
    ControllerNotFound,

    /// Gamepad device errors
    #[error("Controller error: {0}")]
    Controller(String),
}

/// A raw sample the engine could not turn into an event.
///
/// These never stop the poll loop: the sample is logged and dropped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnmappedInput {
    /// Identifier absent from both identity tables
    #[error("Unable to map raw input {0:?}")]
    UnknownIdentifier(RawIdentifier),

    /// Digital sample with a value other than 0 or 1
    #[error("Unable to process button value {value} for {component:?}")]
    MalformedButtonValue { component: Component, value: f32 },

    /// POV sample that is not one of the nine d-pad codes
    #[error("Unable to process dpad value {0}")]
    UnknownDpadCode(f32),
}

/// Result type alias for ROV Control
pub type Result<T> = std::result::Result<T, RovControlError>;
