//! Adapter configuration.
//!
//! Everything is optional; `Config::default()` is a fully working setup
//! with unbounded queues and pretty `info`-level logging.

use std::path::Path;

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub queues: QueueConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Correlation-sink queue sizing.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct QueueConfig {
    /// Upper bound applied to each event queue. Absent means unbounded;
    /// when a bounded queue is full, its oldest entry is shed and counted.
    #[serde(default)]
    pub capacity: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

impl LoggingConfig {
    /// Initialize the global tracing subscriber with this configuration.
    /// `RUST_LOG` overrides the configured level.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if let Some(capacity) = self.queues.capacity {
            if capacity == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "queues.capacity",
                    reason: "must be at least 1".into(),
                }
                .into());
            }
        }
        Ok(())
    }
}
