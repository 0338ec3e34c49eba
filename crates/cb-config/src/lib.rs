//! CareBridge Configuration System
//!
//! TOML-based configuration with environment variable override support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod loader;

pub use loader::ConfigLoader;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Root application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub session: SessionConfig,
    pub auth: AuthConfig,

    /// Data directory for local storage
    pub data_dir: String,

    /// Enable development mode (in-memory session storage, seeded directory)
    pub dev_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            session: SessionConfig::default(),
            auth: AuthConfig::default(),
            data_dir: "./data".to_string(),
            dev_mode: false,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
            cors_origins: vec!["http://localhost:4200".to_string()],
        }
    }
}

/// Session persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// File name of the persisted session entry, relative to `data_dir`
    pub file_name: String,

    /// Session cookie name surfaced by the portal shell
    pub cookie_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file_name: "session.json".to_string(),
            cookie_name: "CB_SESSION".to_string(),
        }
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// URL notified (best-effort) when a session is logged out.
    /// Empty disables the notification.
    pub logout_notify_url: String,

    /// Timeout for the logout notification, in milliseconds
    pub logout_notify_timeout_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            logout_notify_url: String::new(),
            logout_notify_timeout_ms: 2000,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable override
    pub fn load() -> Result<Self, ConfigError> {
        let loader = ConfigLoader::new();
        loader.load()
    }

    /// Sanity checks that do not fit serde defaults
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.file_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "session.file_name must not be empty".to_string(),
            ));
        }
        if self.session.cookie_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "session.cookie_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Generate an example TOML configuration
    pub fn example_toml() -> String {
        r#"# CareBridge Configuration
# Environment variables override these settings

[http]
port = 8080
host = "0.0.0.0"
cors_origins = ["http://localhost:4200"]

[session]
file_name = "session.json"
cookie_name = "CB_SESSION"

[auth]
logout_notify_url = ""
logout_notify_timeout_ms = 2000

data_dir = "./data"
dev_mode = false
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        config.validate().unwrap();
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.session.cookie_name, "CB_SESSION");
        assert!(!config.dev_mode);
    }

    #[test]
    fn example_toml_parses() {
        let config: AppConfig = toml::from_str(&AppConfig::example_toml()).unwrap();
        config.validate().unwrap();
        assert_eq!(config.session.file_name, "session.json");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "dev_mode = true\n\n[http]\nport = 9090").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert!(config.dev_mode);
        assert_eq!(config.http.port, 9090);
        // Untouched sections keep their defaults
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.session.file_name, "session.json");
    }

    #[test]
    fn empty_cookie_name_is_rejected() {
        let mut config = AppConfig::default();
        config.session.cookie_name.clear();
        assert!(config.validate().is_err());
    }
}
