//! Application configuration: the TOML file holding the catalog API
//! endpoint and search defaults, and where that file lives.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default number of movies per page.
const DEFAULT_PAGE_SIZE: u32 = 20;

/// Default query debounce in milliseconds.
const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Config file name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Directory created under the user's config home.
const APP_DIR: &str = "screensuggest";

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Catalog API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Search defaults.
    #[serde(default)]
    pub search: SearchConfig,
}

/// Catalog API configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    /// API base URL; the built-in endpoint when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// User-Agent override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl ApiConfig {
    /// Request timeout; zero falls back to the default.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        let secs = if self.timeout_secs == 0 {
            DEFAULT_TIMEOUT_SECS
        } else {
            self.timeout_secs
        };
        Duration::from_secs(secs)
    }
}

/// Search defaults.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    /// Movies per page.
    pub page_size: u32,
    /// Delay between the last query edit and the search, in milliseconds.
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl SearchConfig {
    /// Debounce delay.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl AppConfig {
    /// Location of the config file.
    ///
    /// `dir` (the `--dir` flag) holds `config.toml` directly. Without it the
    /// file lives in `$XDG_CONFIG_HOME/screensuggest/`, or
    /// `~/.config/screensuggest/` when `XDG_CONFIG_HOME` is unset.
    ///
    /// # Errors
    ///
    /// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set.
    pub fn path(dir: Option<&Path>) -> Result<PathBuf> {
        let config_dir = match dir {
            Some(d) => d.to_path_buf(),
            None => config_home(
                std::env::var_os("XDG_CONFIG_HOME"),
                std::env::var_os("HOME"),
            )
            .context("neither XDG_CONFIG_HOME nor HOME is set")?
            .join(APP_DIR),
        };
        Ok(config_dir.join(CONFIG_FILE))
    }

    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}

/// Base config directory; empty variables count as unset.
fn config_home(xdg_config_home: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    let set = |v: &OsString| !v.is_empty();
    xdg_config_home
        .filter(set)
        .map(PathBuf::from)
        .or_else(|| home.filter(set).map(|h| PathBuf::from(h).join(".config")))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert_eq!(config.api.base_url, None);
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.search.page_size, 20);
        assert_eq!(config.search.debounce(), Duration::from_millis(300));
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            api: ApiConfig {
                base_url: Some(String::from("http://localhost:8080/api/")),
                timeout_secs: 3,
                user_agent: None,
            },
            search: SearchConfig {
                page_size: 12,
                debounce_ms: 150,
            },
        };

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[search]\npage_size = 5\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.search.page_size, 5);
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn test_load_invalid_toml_is_error() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[search\n").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_timeout_uses_default() {
        // Arrange
        let api = ApiConfig {
            timeout_secs: 0,
            ..ApiConfig::default()
        };

        // Act & Assert
        assert_eq!(api.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_path_with_dir() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();

        // Act
        let path = AppConfig::path(Some(dir.path())).unwrap();

        // Assert
        assert_eq!(path, dir.path().join("config.toml"));
    }

    #[test]
    fn test_config_home_prefers_xdg() {
        // Arrange & Act
        let home = config_home(Some(OsString::from("/xdg")), Some(OsString::from("/home/u")));

        // Assert
        assert_eq!(home, Some(PathBuf::from("/xdg")));
    }

    #[test]
    fn test_config_home_falls_back_to_home() {
        // Arrange & Act & Assert
        assert_eq!(
            config_home(None, Some(OsString::from("/home/u"))),
            Some(PathBuf::from("/home/u/.config"))
        );
        assert_eq!(
            config_home(Some(OsString::new()), Some(OsString::from("/home/u"))),
            Some(PathBuf::from("/home/u/.config"))
        );
        assert_eq!(config_home(None, Some(OsString::new())), None);
    }

    #[test]
    fn test_saved_config_lands_in_app_dir() {
        // Arrange
        let base = tempfile::tempdir().unwrap();
        let path = config_home(Some(base.path().as_os_str().to_owned()), None)
            .unwrap()
            .join(APP_DIR)
            .join(CONFIG_FILE);

        // Act
        AppConfig::default().save(&path).unwrap();

        // Assert
        assert!(base.path().join("screensuggest").join("config.toml").exists());
        assert_eq!(AppConfig::load(&path).unwrap(), AppConfig::default());
    }
}
