//! Logging helpers layered over `tracing`.
//!
//! Set `META_INDEXER_SILENT` to mute the console-oriented helpers (tests and
//! embedding applications use it); plain `tracing` macros are unaffected.

const SILENT_ENV: &str = "META_INDEXER_SILENT";

/// Log levels for console-oriented messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
    Debug,
}

fn silenced() -> bool {
    std::env::var(SILENT_ENV).is_ok()
}

/// Logs a message
pub fn log(level: LogLevel, message: &str) {
    if silenced() {
        return;
    }

    match level {
        LogLevel::Info | LogLevel::Success => tracing::info!("{}", message),
        LogLevel::Warning => tracing::warn!("{}", message),
        LogLevel::Error => tracing::error!("{}", message),
        LogLevel::Debug => tracing::debug!("{}", message),
    }
}

/// Strips the value of an `api-key=` query parameter from an endpoint url.
#[must_use]
pub fn redact_endpoint(url: &str) -> String {
    const MARKER: &str = "api-key=";
    match url.find(MARKER) {
        Some(pos) => {
            let value_start = pos + MARKER.len();
            let rest = &url[value_start..];
            let value_end = rest.find('&').unwrap_or(rest.len());
            format!("{}[REDACTED]{}", &url[..value_start], &rest[value_end..])
        }
        None => url.to_string(),
    }
}

/// Logs connection startup for one endpoint.
pub fn log_startup(name: &str, endpoint: &str, include_all: bool) {
    if silenced() {
        return;
    }

    tracing::info!(
        connection = name,
        endpoint = redact_endpoint(endpoint),
        include_all,
        "Meta connection startup"
    );
}

/// Logs a section header
pub fn log_section(title: &str) {
    tracing::info!("=== {} ===", title);
}

/// Logs pipeline progress.
pub fn log_progress(label: &str, completed: usize) {
    if silenced() {
        return;
    }
    tracing::info!(pipeline = label, completed, "{label}: {completed} tasks were processed");
}

/// Logs an error with context
pub fn log_error(context: &str, error: &str) {
    tracing::error!(context = context, error = error, "Meta indexer error");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_endpoint_with_key() {
        assert_eq!(
            redact_endpoint("https://rpc.example.com/?api-key=secret&x=1"),
            "https://rpc.example.com/?api-key=[REDACTED]&x=1"
        );
        assert_eq!(
            redact_endpoint("https://rpc.example.com/?api-key=secret"),
            "https://rpc.example.com/?api-key=[REDACTED]"
        );
    }

    #[test]
    fn test_redact_endpoint_without_key() {
        let url = "https://api.mainnet-beta.solana.com";
        assert_eq!(redact_endpoint(url), url);
    }
}
