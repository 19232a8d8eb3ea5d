//! TOML configuration file loading

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use super::builder::ConfigBuilder;
use crate::Result;

/// Configuration file locations checked in order
const CONFIG_PATHS: &[&str] = &[
    "./dune-client.toml",
    "~/.config/dune-client/config.toml",
    "/etc/dune-client/config.toml",
];

/// Find the first existing configuration file
pub fn find_config_file() -> Option<PathBuf> {
    for path_str in CONFIG_PATHS {
        let path = if path_str.starts_with('~') {
            if let Ok(home) = std::env::var("HOME") {
                PathBuf::from(path_str.replacen('~', &home, 1))
            } else {
                continue;
            }
        } else {
            PathBuf::from(path_str)
        };

        if path.exists() {
            return Some(path);
        }
    }
    None
}

/// Load configuration from a TOML file
pub fn load_from_file(path: &Path, builder: ConfigBuilder) -> Result<ConfigBuilder> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::Error::Config(format!(
            "Failed to read config file {}: {}",
            path.display(),
            e
        ))
    })?;

    let file_config: FileConfig = toml::from_str(&content).map_err(|e| {
        crate::Error::Config(format!(
            "Failed to parse config file {}: {}",
            path.display(),
            e
        ))
    })?;

    apply_file_config(builder, file_config)
}

fn apply_file_config(mut builder: ConfigBuilder, config: FileConfig) -> Result<ConfigBuilder> {
    if let Some(api) = config.api {
        if let Some(key) = api.key {
            builder = builder.api_key(key);
        }

        if let Some(url_str) = api.base_url {
            let url = Url::parse(&url_str)
                .map_err(|e| crate::Error::Config(format!("Invalid base URL: {e}")))?;
            builder = builder.base_url(url);
        }

        if let Some(timeout) = api.request_timeout_secs {
            builder = builder.request_timeout(Duration::from_secs(timeout));
        }
    }

    if let Some(polling) = config.polling {
        if let Some(interval) = polling.interval_secs {
            builder = builder.poll_interval(Duration::from_secs(interval));
        }

        if let Some(max_wait) = polling.max_wait_secs {
            builder = builder.max_wait(Duration::from_secs(max_wait));
        }
    }

    if let Some(obs) = config.observability {
        if let Some(level) = obs.log_level {
            builder = builder.log_level(level);
        }

        if let Some(json) = obs.json_logs {
            builder = builder.json_logs(json);
        }
    }

    Ok(builder)
}

/// Root configuration file structure
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    api: Option<ApiConfig>,
    polling: Option<PollingConfig>,
    observability: Option<ObservabilityConfig>,
}

#[derive(Debug, Deserialize)]
struct ApiConfig {
    key: Option<String>,
    base_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct PollingConfig {
    interval_secs: Option<u64>,
    max_wait_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ObservabilityConfig {
    log_level: Option<String>,
    json_logs: Option<bool>,
}
