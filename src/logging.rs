//! Tracing subscriber setup for hosts and demos

use anyhow::{Context, Result};
use tracing::Level as TraceLevel;
use tracing_subscriber::FmtSubscriber;

/// Exact level lookup; `None` for unknown names
pub fn lookup_level(value: &str) -> Option<TraceLevel> {
    match value.trim().to_lowercase().as_str() {
        "trace" => Some(TraceLevel::TRACE),
        "debug" => Some(TraceLevel::DEBUG),
        "info" => Some(TraceLevel::INFO),
        "warn" => Some(TraceLevel::WARN),
        "error" => Some(TraceLevel::ERROR),
        _ => None,
    }
}

/// Map a level name to a tracing level; anything unrecognized is info
pub fn parse_level(value: &str) -> TraceLevel {
    lookup_level(value).unwrap_or(TraceLevel::INFO)
}

/// `LOG_LEVEL` when set, otherwise `fallback`
pub fn resolve_level(env: Option<&str>, fallback: &str) -> TraceLevel {
    parse_level(env.unwrap_or(fallback))
}

/// Level named by `LOG_LEVEL`, falling back to the configured level
pub fn level_from_env_or(fallback: &str) -> TraceLevel {
    resolve_level(std::env::var("LOG_LEVEL").ok().as_deref(), fallback)
}

/// Install the global fmt subscriber. Fails if one is already installed.
pub fn init(level: TraceLevel) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to install tracing subscriber")?;
    Ok(())
}
