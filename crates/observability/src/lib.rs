//! Tracing and logging setup shared by binaries and test harnesses.

/// Initialize process-wide tracing from the environment.
///
/// Safe to call multiple times; subsequent calls become no-ops. An invalid
/// `LOG_FORMAT` falls back to the default format (the `RUST_LOG` filter is
/// kept) and is reported as a warning once the subscriber is installed.
pub fn init() {
    let (config, format_error) =
        self::tracing::TracingConfig::from_lookup_lenient(|key| std::env::var(key).ok());
    self::tracing::init_with(&config);

    if let Some(err) = format_error {
        ::tracing::warn!(error = %err, "ignoring LOG_FORMAT, using default format");
    }
}

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::{LogFormat, TracingConfig};
