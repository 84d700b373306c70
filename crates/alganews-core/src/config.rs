//! Configuration management for the AlgaNews admin.
//!
//! Loads configuration from ${ALGANEWS_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod paths {
    //! Path resolution for configuration and data directories.
    //!
    //! ALGANEWS_HOME resolution order:
    //! 1. ALGANEWS_HOME environment variable (if set)
    //! 2. ~/.config/alganews (default)

    use std::path::PathBuf;

    /// Returns the AlgaNews home directory.
    ///
    /// Checks ALGANEWS_HOME env var first, falls back to ~/.config/alganews.
    /// Falls back to a relative `.alganews` when no home directory exists.
    pub fn alganews_home() -> PathBuf {
        if let Ok(home) = std::env::var("ALGANEWS_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".alganews"),
            |h| h.join(".config").join("alganews"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        alganews_home().join("config.toml")
    }

    /// Returns the path to the persisted session (tokens + PKCE verifier).
    pub fn session_path() -> PathBuf {
        alganews_home().join("session.json")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        alganews_home().join("logs")
    }
}

/// Remote API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the AlgaNews REST API.
    pub base_url: String,
    /// Request timeout in seconds (0 disables).
    pub timeout_secs: u32,
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.timeout_secs)))
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 30,
        }
    }
}

/// OAuth2 authorization server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Base URL of the authorization server.
    pub server_url: String,
    /// Public client id.
    pub client_id: String,
    /// Redirect URI registered for the admin (the `/authorize` route).
    pub redirect_uri: String,
    /// Optional scope requested at login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8081".to_string(),
            client_id: "alganews-admin".to_string(),
            redirect_uri: "http://localhost:3000/authorize".to_string(),
            scope: None,
        }
    }
}

/// UI behavior configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Delay before a payment preview is requested after the form changes.
    pub preview_debounce_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            preview_debounce_ms: 1000,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub filter: String,
    /// Optional log file name, written under `ALGANEWS_HOME/logs`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub ui: UiConfig,
    pub log: LogConfig,
}

impl Config {
    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Returns the API request timeout, or `None` when disabled.
    pub fn api_timeout(&self) -> Option<Duration> {
        self.api.timeout()
    }

    /// Returns the payment preview debounce delay.
    pub fn preview_debounce(&self) -> Duration {
        Duration::from_millis(self.ui.preview_debounce_ms)
    }

    /// Creates a default config file at `path`.
    ///
    /// # Errors
    /// Fails if the file already exists (no silent overwrite) or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let contents = format!(
            "# AlgaNews admin configuration\n\
             # Every key is optional; missing keys use the defaults below.\n\n{}\
             \n# [auth] scope = \"...\"\n# [log] file = \"alganews.log\"\n",
            Self::generate()?
        );
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Renders the default configuration as TOML.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn generate() -> Result<String> {
        toml::to_string_pretty(&Config::default()).context("Failed to serialize default config")
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.auth.redirect_uri, "http://localhost:3000/authorize");
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(
            &config_path,
            "[api]\nbase_url = \"https://api.alganews.test\"\n",
        )
        .unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.api.base_url, "https://api.alganews.test");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.auth.client_id, "alganews-admin");
        assert_eq!(config.ui.preview_debounce_ms, 1000);
    }

    #[test]
    fn test_load_invalid_toml_fails_with_path() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[api\nbase_url = 1").unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"));
    }

    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("base_url = \"http://localhost:8080\""));
        assert!(contents.contains("# [log] file ="));

        let reloaded = Config::load_from(&config_path).unwrap();
        assert_eq!(reloaded, Config::default());
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "").unwrap();

        assert!(Config::init(&config_path).is_err());
    }

    #[test]
    fn test_api_timeout_zero_disables() {
        let mut config = Config::default();
        assert_eq!(config.api_timeout(), Some(Duration::from_secs(30)));

        config.api.timeout_secs = 0;
        assert_eq!(config.api_timeout(), None);
    }
}
