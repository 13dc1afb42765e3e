//! Logging setup utilities for the Kinnren relay binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Logs from the calling crate and the binary are emitted at `default_log_level`.
/// The filter can be overridden entirely through the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `crate_name` - The library crate whose logs should be shown (e.g., "kinnren_server")
/// * `binary_name` - The name of the binary (e.g., "kinnren-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use kinnren_shared::logger::setup_logger;
///
/// setup_logger("kinnren_server", "kinnren-server", "debug");
/// ```
pub fn setup_logger(crate_name: &str, binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(crate_name, binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::debug!(
        "Logger initialized for '{}' (default level: {})",
        binary_name,
        default_log_level
    );
}

/// Build the filter directive used when `RUST_LOG` is not set.
fn default_filter(crate_name: &str, binary_name: &str, default_log_level: &str) -> String {
    format!(
        "{}={},{}={},tower_http={}",
        crate_name.replace('-', "_"),
        default_log_level,
        binary_name.replace('-', "_"),
        default_log_level,
        default_log_level
    )
}
