/// Configuration for the telemetry subsystem.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to the startup span.
    pub service_name: String,
    /// Log filter used when `RUST_LOG` is unset (e.g. "info", "metaplex_meta_indexer=debug,warn").
    pub log_filter: String,
    /// Whether to enable ANSI-colored console output.
    pub enable_console_colors: bool,
    /// Whether to include target module in output.
    pub show_target: bool,
    /// Whether to include thread IDs.
    pub show_thread_ids: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "meta-indexer".into(),
            log_filter: "info,sqlx=warn".into(),
            enable_console_colors: true,
            show_target: true,
            show_thread_ids: false,
        }
    }
}
