use super::config::TelemetryConfig;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Keeps the telemetry subsystem alive for the lifetime of the process.
pub struct TelemetryGuard {
    service_name: String,
}

impl TelemetryGuard {
    /// Name the subscriber was initialised for.
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        shutdown_telemetry();
    }
}

static TELEMETRY_INIT: OnceLock<()> = OnceLock::new();

/// Installs the global tracing subscriber once.
///
/// `RUST_LOG` wins over `config.log_filter`. Later calls only hand out a new guard.
pub fn init_telemetry(config: TelemetryConfig) -> TelemetryGuard {
    TELEMETRY_INIT.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

        let fmt_layer = fmt::layer()
            .with_target(config.show_target)
            .with_thread_ids(config.show_thread_ids)
            .with_ansi(config.enable_console_colors);

        // Another subscriber may already be installed by an embedding application.
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init();

        tracing::debug!(service = %config.service_name, "telemetry initialised");
    });

    TelemetryGuard {
        service_name: config.service_name,
    }
}

/// Flushes buffered output before exit.
pub fn shutdown_telemetry() {
    tracing::trace!("telemetry shutdown");
}
