//! Tracing subscriber setup.
//!
//! Logs always go to stderr: stdout carries the MCP protocol.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LogLevel};

fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
    }
}

/// Build the filter: `level` is the default directive, `RUST_LOG` refines it.
fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level_filter(level).into())
        .from_env_lossy()
}

/// Install the global subscriber.
///
/// Records emitted through the `log` crate by the core and app crates are
/// forwarded by the subscriber's `tracing-log` bridge.
pub fn init(level: LogLevel, format: LogFormat) {
    let (json, text) = match format {
        LogFormat::Json => (
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            ),
            None,
        ),
        LogFormat::Text => (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(json)
        .with(text)
        .with(env_filter(level))
        .init();
}
