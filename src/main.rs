//! # ROV Control
//!
//! Gamepad input console for the ROV.
//!
//! Reads a gamepad through evdev, filters and classifies its input, and logs
//! every resulting event.
//!
//! # Usage
//!
//! ```bash
//! rov-control [config.toml]
//! ```
//!
//! Without an argument `config/default.toml` is used. Set `RUST_LOG=debug` to
//! also see axis movement.

use anyhow::{Context, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use rov_control::config::Config;
use rov_control::controller::evdev_source::EvdevSource;
use rov_control::gamepad::component::Component;
use rov_control::gamepad::event::{Event, EventKind};
use rov_control::gamepad::poll::PollLoop;

/// Configuration file used when none is given on the command line
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

const AXIS_KINDS: &[EventKind] = &[EventKind::AxisMoved];
const BUTTON_KINDS: &[EventKind] = &[
    EventKind::ButtonPressed,
    EventKind::ButtonReleased,
    EventKind::ButtonClicked,
];

/// Filter from `RUST_LOG` directives, INFO when they are unset or invalid.
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::default().add_directive(tracing::Level::INFO.into()))
}

/// Event kinds a component can produce.
fn listener_kinds(component: Component) -> &'static [EventKind] {
    if component.is_axis() {
        AXIS_KINDS
    } else {
        BUTTON_KINDS
    }
}

fn log_event(component: Component, event: &Event) {
    match event {
        Event::AxisMoved { value, .. } => debug!("{:?} moved to {:.3}", component, value),
        Event::ButtonPressed { .. } => info!("{:?} pressed", component),
        Event::ButtonReleased { .. } => info!("{:?} released", component),
        Event::ButtonClicked { hold_duration_nanos, .. } => info!(
            "{:?} clicked (held {:.1} ms)",
            component,
            *hold_duration_nanos as f64 / 1_000_000.0
        ),
    }
}

/// Main entry point for the ROV control console
///
/// # Control Flow
///
/// 1. Set up logging and load the configuration
/// 2. Open the gamepad and apply the configured deadzones
/// 3. Subscribe logging listeners and start the poll loop
/// 4. Stop the poll loop on Ctrl+C
///
/// # Errors
///
/// Returns error if:
/// - The configuration cannot be loaded
/// - No gamepad can be opened
/// - The poll loop fails to start or stop
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .init();

    info!("ROV Control v{} starting...", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;
    info!("Loaded configuration from {}", config_path);

    let source = EvdevSource::open(config.device_path()).context("Failed to open gamepad")?;
    let mut poll_loop = PollLoop::new(source, config.poll_period());

    for deadzone in &config.deadzones {
        poll_loop.configure_deadzone(deadzone.component, deadzone.kind, deadzone.threshold)?;
    }

    for component in Component::ALL {
        for &kind in listener_kinds(component) {
            poll_loop.subscribe(component, kind, move |event| log_event(component, event))?;
        }
    }

    poll_loop.start()?;
    info!(
        "Polling gamepad at {}Hz, press Ctrl+C to exit",
        config.controller.poll_rate_hz
    );

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;
    info!("Received Ctrl+C, shutting down...");

    poll_loop.stop().await?;

    Ok(())
}
