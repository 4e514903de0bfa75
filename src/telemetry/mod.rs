//! Process-wide tracing setup.

/// Telemetry configuration.
pub mod config;

/// Global subscriber initialisation and shutdown.
pub mod subscriber;

pub use config::TelemetryConfig;
pub use subscriber::{init_telemetry, shutdown_telemetry, TelemetryGuard};
