//! Environment variable loading for configuration

use std::env;
use std::time::Duration;

use url::Url;

use super::builder::ConfigBuilder;
use crate::Result;

/// Serializes tests that mutate the process environment
#[cfg(test)]
pub(super) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Environment variable names
mod vars {
    pub const DUNE_API_KEY: &str = "DUNE_API_KEY";
    pub const DUNE_API_URL: &str = "DUNE_API_URL";
    pub const DUNE_REQUEST_TIMEOUT_SECS: &str = "DUNE_REQUEST_TIMEOUT_SECS";
    pub const DUNE_POLL_INTERVAL_SECS: &str = "DUNE_POLL_INTERVAL_SECS";
    pub const DUNE_MAX_WAIT_SECS: &str = "DUNE_MAX_WAIT_SECS";
    pub const RUST_LOG: &str = "RUST_LOG";
    pub const DUNE_JSON_LOGS: &str = "DUNE_JSON_LOGS";
}

/// Load configuration from environment variables
pub fn load_from_env(mut builder: ConfigBuilder) -> Result<ConfigBuilder> {
    if let Ok(key) = env::var(vars::DUNE_API_KEY) {
        builder = builder.api_key(key);
    }

    if let Ok(url_str) = env::var(vars::DUNE_API_URL) {
        let url = Url::parse(&url_str)
            .map_err(|e| crate::Error::Config(format!("Invalid {}: {}", vars::DUNE_API_URL, e)))?;
        builder = builder.base_url(url);
    }

    if let Some(timeout) = parse_secs(vars::DUNE_REQUEST_TIMEOUT_SECS) {
        builder = builder.request_timeout(timeout);
    }

    if let Some(interval) = parse_secs(vars::DUNE_POLL_INTERVAL_SECS) {
        builder = builder.poll_interval(interval);
    }

    if let Some(max_wait) = parse_secs(vars::DUNE_MAX_WAIT_SECS) {
        builder = builder.max_wait(max_wait);
    }

    if let Ok(level) = env::var(vars::RUST_LOG) {
        builder = builder.log_level(level);
    }

    if let Ok(val) = env::var(vars::DUNE_JSON_LOGS) {
        builder = builder.json_logs(parse_bool(&val));
    }

    Ok(builder)
}

/// Whole seconds from `name`; unparseable values are ignored
fn parse_secs(name: &str) -> Option<Duration> {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

fn parse_bool(s: &str) -> bool {
    matches!(s.to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}
