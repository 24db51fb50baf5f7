//! Configuration System
//!
//! Loads the client configuration from a TOML file with `SERVICEBAY_*`
//! environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::ClientConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub notifications: NotificationsConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_request_timeout() -> u64 {
    15
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl From<&ApiConfig> for ClientConfig {
    fn from(api: &ApiConfig) -> Self {
        ClientConfig {
            base_url: api.base_url.clone(),
            request_timeout_secs: api.request_timeout_secs,
        }
    }
}

/// Notification polling settings
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

fn default_poll_interval() -> u64 {
    30
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
        }
    }
}

impl NotificationsConfig {
    /// Poll interval, never shorter than one second
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

/// Where the CLI keeps the stored session
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_dir")]
    pub dir: String,
}

fn default_session_dir() -> String {
    dirs::config_dir()
        .map(|p| p.join("servicebay").to_string_lossy().to_string())
        .unwrap_or_else(|| "./.servicebay".to_string())
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dir: default_session_dir(),
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
    "warn".to_string()
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

        Self::parse(path, &content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("servicebay").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("SERVICEBAY_API_URL") {
            self.api.base_url = url;
        }

        if let Some(dir) = var("SERVICEBAY_SESSION_DIR") {
            self.session.dir = dir;
        }

        if let Some(secs) = var("SERVICEBAY_POLL_SECS") {
            match secs.parse() {
                Ok(s) => self.notifications.poll_interval_secs = s,
                Err(_) => tracing::warn!("Ignoring invalid SERVICEBAY_POLL_SECS: {}", secs),
            }
        }

        if let Some(level) = var("SERVICEBAY_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("SERVICEBAY_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::from(&self.api)
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
    r#"# ServiceBay Configuration
#
# Environment variables override these settings:
# - SERVICEBAY_API_URL
# - SERVICEBAY_SESSION_DIR
# - SERVICEBAY_POLL_SECS
# - SERVICEBAY_LOG_LEVEL
# - SERVICEBAY_LOG_FORMAT

[api]
# Backend base URL
base_url = "http://localhost:8080"

# Request timeout in seconds
request_timeout_secs = 15

[notifications]
# How often `notifications watch` polls the unread list (seconds)
poll_interval_secs = 30

[session]
# Directory holding session.json
# dir = "~/.config/servicebay"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty or json
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_parses() {
        let config = Config::parse(Path::new("default.toml"), &generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.request_timeout_secs, 15);
        assert_eq!(config.notifications.poll_interval_secs, 30);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = Config::parse(
            Path::new("partial.toml"),
            "[api]\nbase_url = \"https://bay.example\"\n",
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://bay.example");
        assert_eq!(config.api.request_timeout_secs, 15);
        assert_eq!(config.notifications.poll_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = Config::parse(Path::new("broken.toml"), "[api\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SERVICEBAY_API_URL", "http://10.0.0.5:9000"),
            ("SERVICEBAY_POLL_SECS", "5"),
            ("SERVICEBAY_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.notifications.poll_interval_secs, 5);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_invalid_poll_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|k| (k == "SERVICEBAY_POLL_SECS").then(|| "soon".to_string()));
        assert_eq!(config.notifications.poll_interval_secs, 30);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[notifications]\npoll_interval_secs = 0\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.notifications.poll_interval(), Duration::from_secs(1));
    }
}
