//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::data::{ColumnMapping, PriceLoader};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input file configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,

    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    #[serde(default)]
    pub columns: ColumnMapping,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("predicted_stock_prices.csv")
}

fn default_delimiter() -> char {
    ','
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            delimiter: default_delimiter(),
            columns: ColumnMapping::default(),
        }
    }
}

impl DataConfig {
    /// Build a loader for this layout
    pub fn loader(&self) -> Result<PriceLoader, ConfigError> {
        if !self.delimiter.is_ascii() {
            return Err(ConfigError::Invalid(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )));
        }

        Ok(PriceLoader::new()
            .with_columns(self.columns.clone())
            .with_delimiter(self.delimiter as u8))
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Page heading and document title
    #[serde(default = "default_title")]
    pub title: String,

    /// Allowed CORS origins for the JSON API; empty disables CORS headers
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

fn default_title() -> String {
    "Stock Price Prediction Dashboard".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            title: default_title(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<ConfigLoad, ConfigError> {
        let mut config = Self::load(path)?;
        let warnings = config.apply_env_overrides();
        Ok(ConfigLoad {
            config,
            source: Some(path.to_path_buf()),
            warnings,
        })
    }

    /// Load from default locations or environment
    ///
    /// A file that exists but fails to parse is skipped and reported in
    /// [`ConfigLoad::warnings`]; callers log them once tracing is installed.
    pub fn load_default() -> ConfigLoad {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("stockcast").join("config.toml")),
            Some(PathBuf::from("./stockcast.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths, &|key| std::env::var(key).ok())
    }

    /// Load the first candidate file that parses, then apply overrides
    fn load_first(paths: &[PathBuf], lookup: &dyn Fn(&str) -> Option<String>) -> ConfigLoad {
        let mut warnings = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load(path) {
                Ok(mut config) => {
                    warnings.extend(config.apply_overrides(lookup));
                    return ConfigLoad {
                        config,
                        source: Some(path.clone()),
                        warnings,
                    };
                }
                Err(e) => warnings.push(format!("Failed to load config from {:?}: {}", path, e)),
            }
        }

        let mut config = Config::default();
        warnings.extend(config.apply_overrides(lookup));
        ConfigLoad {
            config,
            source: None,
            warnings,
        }
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> ConfigLoad {
        Self::load_first(&[], &|key| std::env::var(key).ok())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) -> Vec<String> {
        self.apply_overrides(&|key| std::env::var(key).ok())
    }

    /// Returns a warning for every override that was ignored
    fn apply_overrides(&mut self, lookup: &dyn Fn(&str) -> Option<String>) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(path) = lookup("STOCKCAST_DATA_PATH") {
            self.data.path = PathBuf::from(path);
        }

        if let Some(host) = lookup("STOCKCAST_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("STOCKCAST_PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => warnings.push(format!("Ignoring invalid STOCKCAST_PORT: {}", port)),
            }
        }

        if let Some(level) = lookup("STOCKCAST_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("STOCKCAST_LOG_FORMAT") {
            self.logging.format = format;
        }

        warnings
    }
}

/// Outcome of configuration loading
///
/// Loading runs before the tracing subscriber exists, so problems are
/// collected here instead of being logged on the spot.
#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    /// File the config came from; `None` for defaults
    pub source: Option<PathBuf>,
    /// Skipped files and ignored overrides
    pub warnings: Vec<String>,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Stockcast Configuration
#
# Environment variables override these settings:
# - STOCKCAST_DATA_PATH
# - STOCKCAST_HOST
# - STOCKCAST_PORT
# - STOCKCAST_LOG_LEVEL
# - STOCKCAST_LOG_FORMAT

[data]
# Prediction export to serve
path = "predicted_stock_prices.csv"

# Field delimiter
delimiter = ","

[data.columns]
symbol = "symbol"
date = "Date"
actual = "Next_Close"
predicted = "prediction"

[server]
# Dashboard host
host = "127.0.0.1"

# Dashboard port
port = 8050

# Page heading
title = "Stock Price Prediction Dashboard"

# Allowed CORS origins for /api/v1 (empty: same-origin only)
cors_origins = []

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
