//! Tracing/logging initialization.

use std::str::FromStr;

use anyhow::bail;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Output format of the fmt subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" | "text" => Ok(Self::Pretty),
            other => bail!("unsupported LOG_FORMAT '{other}' (expected 'json' or 'pretty')"),
        }
    }
}

/// Tracing settings, read from `RUST_LOG` and `LOG_FORMAT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    pub filter: String,
    pub format: LogFormat,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::default(),
        }
    }
}

impl TracingConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    ///
    /// An unknown `LOG_FORMAT` is an error.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            filter: filter_from(&lookup),
            format: format_from(&lookup)?,
        })
    }

    /// Like `from_lookup`, but an unknown `LOG_FORMAT` falls back to the
    /// default format alone. The filter is kept; the format error is returned
    /// so the caller can report it.
    pub fn from_lookup_lenient<F>(lookup: F) -> (Self, Option<anyhow::Error>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let filter = filter_from(&lookup);
        match format_from(&lookup) {
            Ok(format) => (Self { filter, format }, None),
            Err(err) => (
                Self {
                    filter,
                    format: LogFormat::default(),
                },
                Some(err),
            ),
        }
    }
}

fn filter_from<F>(lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("RUST_LOG")
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

fn format_from<F>(lookup: &F) -> anyhow::Result<LogFormat>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup("LOG_FORMAT") {
        Some(raw) => raw.parse(),
        None => Ok(LogFormat::default()),
    }
}

/// Install the global subscriber for `config`.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init_with(config: &TracingConfig) {
    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let _ = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
}
