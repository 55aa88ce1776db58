//! Layered runtime configuration for the dashboard binaries.
//!
//! Precedence, lowest to highest: built-in defaults, JSON config file,
//! environment variables / CLI arguments (handled by clap).

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised when a config file cannot be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path of the offending file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file content was not valid JSON for [`Config`].
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Path of the offending file.
        path: PathBuf,
        /// The underlying serde error.
        source: serde_json::Error,
    },
}

/// Runtime configuration for the dashboard poller and binaries.
#[derive(Parser, Deserialize, Serialize, Debug, Clone, Default)]
#[clap(about = "FinansMakro market pulse poller", version)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[clap(long, env = "FINANSMAKRO_API_BASE_URL", help = "Base URL of the dashboard feed API.")]
    /// Base URL of the dashboard feed API.
    pub api_base_url: Option<String>,

    #[clap(long, env = "FINANSMAKRO_MARKET_POLL_SECONDS", help = "Seconds between market data polls.")]
    /// Seconds between market data polls.
    pub market_poll_seconds: Option<u64>,

    #[clap(long, env = "FINANSMAKRO_FEARGREED_POLL_SECONDS", help = "Seconds between fear/greed refreshes.")]
    /// Seconds between fear/greed refreshes.
    pub feargreed_poll_seconds: Option<u64>,

    #[clap(long, env = "FINANSMAKRO_CONFIG_PATH", help = "Path to the JSON configuration file.")]
    /// Path to the JSON configuration file.
    pub config_path: Option<PathBuf>,

    #[clap(long, env = "FINANSMAKRO_LOG_DIR", help = "Directory for log files.")]
    /// Directory for log files.
    pub log_dir: Option<PathBuf>,

    #[clap(long, env = "FINANSMAKRO_LOG_LEVEL", help = "Logging level (debug, info, warn, error).")]
    /// Logging level.
    pub log_level: Option<String>,
}

impl Config {
    /// Built-in defaults used when no other source provides a value.
    pub fn defaults() -> Self {
        Self {
            api_base_url: Some("https://finansmakro.no/api/".to_string()),
            market_poll_seconds: Some(30),
            feargreed_poll_seconds: Some(300),
            log_dir: Some(PathBuf::from("./logs")),
            log_level: Some("info".to_string()),
            ..Default::default()
        }
    }

    /// Reads a config file, failing loudly on read or parse errors.
    pub fn from_file(path: &PathBuf) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })
    }

    /// Merge two configs, where 'other' overrides 'self' for Some values.
    pub fn merge(self, other: Config) -> Config {
        Config {
            api_base_url: other.api_base_url.or(self.api_base_url),
            market_poll_seconds: other.market_poll_seconds.or(self.market_poll_seconds),
            feargreed_poll_seconds: other.feargreed_poll_seconds.or(self.feargreed_poll_seconds),
            config_path: other.config_path.or(self.config_path),
            log_dir: other.log_dir.or(self.log_dir),
            log_level: other.log_level.or(self.log_level),
        }
    }

    /// Applies the file layer (when present) and the env/CLI layer on top
    /// of the defaults. Pure, so the precedence rules are unit-testable.
    pub fn layered(file_config: Option<Config>, cli: Config) -> Config {
        let mut current = Config::defaults();
        if let Some(file_config) = file_config {
            current = current.merge(file_config);
        }
        current.merge(cli)
    }
}

/// Loads the effective configuration for a binary: defaults, then an
/// optional JSON file (default `finansmakro.conf`, overridable via CLI),
/// then environment variables and CLI arguments.
pub fn load_config() -> Config {
    let cli = Config::parse();

    let file_path = cli
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from("finansmakro.conf"));

    let file_config = if file_path.exists() {
        match Config::from_file(&file_path) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                log::warn!("{}. Falling back to other sources.", e);
                None
            }
        }
    } else {
        log::info!(
            "Config file not found at {}. Using defaults and environment/CLI variables.",
            file_path.display()
        );
        None
    };

    Config::layered(file_config, cli)
}
