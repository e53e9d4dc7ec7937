//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, RovControlError};
use crate::gamepad::component::Component;
use crate::gamepad::deadzone::{DeadzoneKind, DeadzoneRule};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub controller: ControllerConfig,

    #[serde(default = "default_deadzones")]
    pub deadzones: Vec<DeadzoneConfig>,
}

/// Controller configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ControllerConfig {
    /// Empty to auto-detect
    #[serde(default)]
    pub device_path: String,

    #[serde(default = "default_poll_rate_hz")]
    pub poll_rate_hz: u32,
}

/// One deadzone rule
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct DeadzoneConfig {
    pub component: Component,
    pub kind: DeadzoneKind,
    pub threshold: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            device_path: String::new(),
            poll_rate_hz: default_poll_rate_hz(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            controller: ControllerConfig::default(),
            deadzones: default_deadzones(),
        }
    }
}

// Default value functions
fn default_poll_rate_hz() -> u32 { 100 }

fn default_stick_deadzone() -> f32 { 0.25 }
fn default_trigger_deadzone() -> f32 { 0.10 }

fn default_deadzones() -> Vec<DeadzoneConfig> {
    let stick = |component| DeadzoneConfig {
        component,
        kind: DeadzoneKind::Radial,
        threshold: default_stick_deadzone(),
    };

    vec![
        stick(Component::LeftStickX),
        stick(Component::LeftStickY),
        stick(Component::RightStickX),
        stick(Component::RightStickY),
        DeadzoneConfig {
            component: Component::Trigger,
            kind: DeadzoneKind::Linear,
            threshold: default_trigger_deadzone(),
        },
    ]
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rov_control::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Poll loop period derived from `poll_rate_hz`.
    #[must_use]
    pub fn poll_period(&self) -> Duration {
        Duration::from_secs(1) / self.controller.poll_rate_hz.max(1)
    }

    /// Device to open, `None` to auto-detect.
    #[must_use]
    pub fn device_path(&self) -> Option<&str> {
        Some(self.controller.device_path.as_str()).filter(|path| !path.is_empty())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        if self.controller.poll_rate_hz == 0 || self.controller.poll_rate_hz > 1000 {
            return Err(RovControlError::Configuration(
                "poll_rate_hz must be between 1 and 1000".to_string(),
            ));
        }

        // Same checks the engine applies when the rule is configured
        for deadzone in &self.deadzones {
            DeadzoneRule::new(deadzone.component, deadzone.kind, deadzone.threshold)?;
        }

        Ok(())
    }
}
