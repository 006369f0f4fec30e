//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::{ClientConfig, DEFAULT_BASE_URL};
use crate::chart::ReadingOrder;
use crate::dashboard::DashboardOptions;
use crate::model::DisplayZone;
use crate::refresh::DEFAULT_INTERVAL_MS;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub refresh: RefreshConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote sensor API settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Order the server returns readings in
    #[serde(default)]
    pub order: ReadingOrder,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            order: ReadingOrder::default(),
        }
    }
}

/// Refresh timer settings
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_interval")]
    pub interval_ms: u64,
}

fn default_interval() -> u64 {
    DEFAULT_INTERVAL_MS
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval(),
        }
    }
}

impl RefreshConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}

/// Presentation settings
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub timezone: DisplayZone,

    #[serde(default = "default_led_channels")]
    pub led_channels: Vec<String>,

    /// Sparkline width in the terminal
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,
}

fn default_led_channels() -> Vec<String> {
    vec!["led1".to_string(), "led2".to_string()]
}

fn default_chart_width() -> usize {
    60
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timezone: DisplayZone::default(),
            led_channels: default_led_channels(),
            chart_width: default_chart_width(),
        }
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

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Resolve the configuration without logging
    ///
    /// An explicit `path` must load. Otherwise the default locations are
    /// searched and unreadable files are recorded in the report and skipped.
    /// Callers log the report once their subscriber is installed.
    pub fn discover(path: Option<&Path>) -> Result<(Self, LoadReport), ConfigError> {
        let env = |key: &str| std::env::var(key).ok();

        match path {
            Some(path) => {
                let mut config = Self::load(path)?;
                let report = LoadReport {
                    source: Some(path.to_path_buf()),
                    skipped: Vec::new(),
                    ignored_overrides: config.apply_overrides(env),
                };
                Ok((config, report))
            }
            None => Ok(Self::discover_in(&default_paths(), env)),
        }
    }

    fn discover_in(
        paths: &[PathBuf],
        lookup: impl Fn(&str) -> Option<String>,
    ) -> (Self, LoadReport) {
        let mut report = LoadReport::default();
        let mut config = Config::default();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load(path) {
                Ok(loaded) => {
                    config = loaded;
                    report.source = Some(path.clone());
                    break;
                }
                Err(e) => report.skipped.push(e),
            }
        }

        report.ignored_overrides = config.apply_overrides(lookup);
        (config, report)
    }

    /// Apply environment variable overrides
    ///
    /// Returns a warning for every override that could not be used.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Vec<String> {
        let mut ignored = Vec::new();

        if let Some(url) = lookup("AIOT_API_URL") {
            self.api.base_url = url;
        }

        if let Some(ms) = lookup("AIOT_REFRESH_MS") {
            match ms.parse() {
                Ok(ms) => self.refresh.interval_ms = ms,
                Err(_) => ignored.push(format!("Ignoring invalid AIOT_REFRESH_MS: {}", ms)),
            }
        }

        if let Some(zone) = lookup("AIOT_TIMEZONE") {
            match zone.parse() {
                Ok(zone) => self.display.timezone = zone,
                Err(e) => ignored.push(format!("Ignoring AIOT_TIMEZONE: {}", e)),
            }
        }

        if let Some(level) = lookup("AIOT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("AIOT_LOG_FORMAT") {
            self.logging.format = format;
        }

        ignored
    }

    /// Settings for the HTTP client
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api.base_url.clone(),
            request_timeout_ms: self.api.request_timeout_secs.saturating_mul(1000),
            zone: self.display.timezone,
        }
    }

    /// Settings for the dashboard context
    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            order: self.api.order,
            zone: self.display.timezone,
        }
    }
}

fn default_paths() -> Vec<PathBuf> {
    [
        dirs::config_dir().map(|p| p.join("aiot-dashboard").join("config.toml")),
        Some(PathBuf::from("/etc/aiot-dashboard/config.toml")),
        Some(PathBuf::from("./config.toml")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// What happened while resolving the configuration
#[derive(Debug, Default)]
pub struct LoadReport {
    /// File the settings came from; `None` means built-in defaults
    pub source: Option<PathBuf>,
    /// Files that exist but could not be read or parsed
    pub skipped: Vec<ConfigError>,
    /// Environment overrides that were rejected
    pub ignored_overrides: Vec<String>,
}

impl LoadReport {
    pub fn log(&self) {
        for error in &self.skipped {
            tracing::warn!("Skipped config file: {}", error);
        }
        for warning in &self.ignored_overrides {
            tracing::warn!("{}", warning);
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# AIoT Dashboard Configuration
#
# Environment variables override these settings:
# - AIOT_API_URL
# - AIOT_REFRESH_MS
# - AIOT_TIMEZONE
# - AIOT_LOG_LEVEL
# - AIOT_LOG_FORMAT

[api]
# Sensor backend base URL
base_url = "https://aiot-backend-9r32.onrender.com"

# Request timeout in seconds
request_timeout_secs = 10

# Order of GET /api/data: newest-first, oldest-first or by-timestamp
order = "newest-first"

[refresh]
# How often to refetch readings (ms)
interval_ms = 30000

[display]
# Clock for chart labels and naive timestamps: local or utc
timezone = "local"

# LED channels offered as commands
led_channels = ["led1", "led2"]

# Sparkline width in the terminal (characters)
chart_width = 60

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
