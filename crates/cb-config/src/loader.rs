//! Configuration loader with file and environment variable support

use crate::{AppConfig, ConfigError};
use std::env;
use std::path::PathBuf;
use tracing::info;

/// Standard config file search paths
const CONFIG_PATHS: &[&str] = &[
    "config.toml",
    "carebridge.toml",
    "./config/config.toml",
    "./config/carebridge.toml",
    "/etc/carebridge/config.toml",
];

/// Configuration loader
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Create a loader with a specific config file path
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }

    /// Load configuration from file (if found) with environment variable overrides
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let mut config = AppConfig::default();

        if let Some(path) = self.find_config_file() {
            info!(?path, "Loading configuration from file");
            config = AppConfig::from_file(&path)?;
        }

        self.apply_env_overrides(&mut config);
        config.validate()?;

        Ok(config)
    }

    /// Find the configuration file to use
    fn find_config_file(&self) -> Option<PathBuf> {
        // Explicit path wins
        if let Some(path) = &self.config_path {
            if path.exists() {
                return Some(path.clone());
            }
        }

        if let Ok(path) = env::var("CAREBRIDGE_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        for path in CONFIG_PATHS {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        None
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&self, config: &mut AppConfig) {
        // HTTP
        if let Ok(val) = env::var("CAREBRIDGE_HTTP_PORT") {
            if let Ok(port) = val.parse() {
                config.http.port = port;
            }
        }
        if let Ok(val) = env::var("CAREBRIDGE_HTTP_HOST") {
            config.http.host = val;
        }
        if let Ok(val) = env::var("CAREBRIDGE_CORS_ORIGINS") {
            config.http.cors_origins = val.split(',').map(|s| s.trim().to_string()).collect();
        }

        // Session
        if let Ok(val) = env::var("CAREBRIDGE_SESSION_FILE") {
            config.session.file_name = val;
        }
        if let Ok(val) = env::var("CAREBRIDGE_SESSION_COOKIE") {
            config.session.cookie_name = val;
        }

        // Auth
        if let Ok(val) = env::var("CAREBRIDGE_LOGOUT_NOTIFY_URL") {
            config.auth.logout_notify_url = val;
        }
        if let Ok(val) = env::var("CAREBRIDGE_LOGOUT_NOTIFY_TIMEOUT_MS") {
            if let Ok(timeout) = val.parse() {
                config.auth.logout_notify_timeout_ms = timeout;
            }
        }

        // General
        if let Ok(val) = env::var("CAREBRIDGE_DATA_DIR") {
            config.data_dir = val;
        }
        if let Ok(val) = env::var("CAREBRIDGE_DEV_MODE") {
            config.dev_mode = val.parse().unwrap_or(false);
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
