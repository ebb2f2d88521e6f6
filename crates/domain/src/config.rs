//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DB_PATH, DEFAULT_DB_POOL_SIZE, DEFAULT_EXCLUDED_WEEKDAYS, DEFAULT_LOG_LEVEL,
};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Scheduling defaults.
    #[serde(default)]
    pub scheduling: SchedulingConfig,
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file path.
    pub path: String,
    /// Maximum pooled connections.
    pub pool_size: u32,
}

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

crate::impl_domain_status_conversions!(LogFormat {
    Pretty => "pretty",
    Json => "json",
});

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: DEFAULT_LOG_LEVEL.to_string(), format: LogFormat::Pretty }
    }
}

/// Scheduling defaults applied when course data leaves them unspecified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingConfig {
    /// Weekdays (0 = Sunday .. 6 = Saturday) used for courses stored without
    /// any exclusions.
    pub default_excluded_weekdays: Vec<u8>,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self { default_excluded_weekdays: DEFAULT_EXCLUDED_WEEKDAYS.to_vec() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                path: DEFAULT_DB_PATH.to_string(),
                pool_size: DEFAULT_DB_POOL_SIZE,
            },
            logging: LoggingConfig::default(),
            scheduling: SchedulingConfig::default(),
        }
    }
}
