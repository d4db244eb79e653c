//! Configuration management for bookstore-queries
//!
//! Configuration comes from:
//! - A TOML configuration file (optional)
//! - Command-line arguments
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Connection configuration
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// Display configuration
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Connection-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// MongoDB connection URI
    #[serde(default = "default_uri")]
    pub uri: String,

    /// Database holding the books collection
    #[serde(default = "default_database")]
    pub database: String,

    /// Collection the operations run against
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Connect and server selection timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Display and output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Enable colored headings
    #[serde(default = "default_color_output")]
    pub color_output: bool,

    /// Show execution time after each table
    #[serde(default = "default_show_timing")]
    pub show_timing: bool,

    /// Table border style
    #[serde(default = "default_table_style")]
    pub table_style: TableStyleName,

    /// Maximum column width before values wrap
    #[serde(default = "default_max_column_width")]
    pub max_column_width: usize,
}

/// Table style names accepted in the config file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TableStyleName {
    Modern,
    Ascii,
    Rounded,
    Markdown,
    Psql,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

// Default value functions
fn default_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database() -> String {
    "plp_bookstore".to_string()
}

fn default_collection() -> String {
    "books".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_color_output() -> bool {
    true
}

fn default_show_timing() -> bool {
    false
}

fn default_table_style() -> TableStyleName {
    TableStyleName::Modern
}

fn default_max_column_width() -> usize {
    40
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    true
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            database: default_database(),
            collection: default_collection(),
            timeout: default_timeout(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color_output: default_color_output(),
            show_timing: default_show_timing(),
            table_style: default_table_style(),
            max_column_width: default_max_column_width(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: default_log_timestamps(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ConfigError::InvalidFormat(e.to_string()).into())
    }

    /// Load configuration from a file
    ///
    /// An explicit path must exist. Without one, the default path is used
    /// when present and built-in defaults otherwise.
    ///
    /// # Arguments
    /// * `path` - Optional path to a TOML configuration file
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn load_from_file(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::FileNotFound(p.display().to_string()).into());
                }
                p.to_path_buf()
            }
            None => {
                let default = Self::default_path();
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&text)
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".bookstore-queries")
            .join("config.toml")
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.connection.validate_uri()?;

        if self.connection.database.trim().is_empty() {
            return Err(invalid("connection.database", &self.connection.database));
        }
        if self.connection.collection.trim().is_empty() {
            return Err(invalid("connection.collection", &self.connection.collection));
        }
        if self.connection.timeout == 0 {
            return Err(invalid("connection.timeout", "0"));
        }
        if self.display.max_column_width == 0 {
            return Err(invalid("display.max_column_width", "0"));
        }

        Ok(())
    }
}

impl ConnectionConfig {
    /// Connect and server selection timeout
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Check the URI scheme
    pub fn validate_uri(&self) -> Result<()> {
        if self.uri.starts_with("mongodb://") || self.uri.starts_with("mongodb+srv://") {
            Ok(())
        } else {
            Err(invalid("connection.uri", &self.uri))
        }
    }
}

fn invalid(field: &str, value: &str) -> crate::error::BookstoreError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
    .into()
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}
