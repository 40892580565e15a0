//! Logging setup
//!
//! `RUST_LOG` wins when set; otherwise `LOG_LEVEL` picks the minimum level.

use eyre::{eyre, Result, WrapErr};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// Parse a log level name, accepting the common aliases
/// (`WARNING`, `CRITICAL`, `FATAL`) case-insensitively.
pub fn parse_level(name: &str) -> Result<LevelFilter> {
    match name.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" | "warning" => Ok(LevelFilter::WARN),
        "error" | "critical" | "fatal" => Ok(LevelFilter::ERROR),
        "off" => Ok(LevelFilter::OFF),
        other => Err(eyre!("Unknown log level: {}", other)),
    }
}

/// Build the filter for the given default level
pub fn env_filter(level: LevelFilter) -> Result<EnvFilter> {
    // Lower levels for dependencies to reduce noise
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
        .add_directive("hyper=warn".parse().wrap_err("hyper directive")?)
        .add_directive("reqwest=warn".parse().wrap_err("reqwest directive")?);
    Ok(filter)
}

/// Install the global tracing subscriber
pub fn init(log_level: &str) -> Result<()> {
    let filter = env_filter(parse_level(log_level)?)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| eyre!("Failed to install tracing subscriber: {}", e))
}
