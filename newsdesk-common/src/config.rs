//! Bootstrap configuration
//!
//! Settings are resolved once at startup, in priority order:
//! 1. Command-line arguments and environment variables (collected by the
//!    binary into [`ConfigOverrides`])
//! 2. TOML configuration file
//! 3. Compiled defaults
//!
//! Nothing here changes while the server runs; restart to pick up edits.

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2/";
pub const DEFAULT_ASSETS_DIR: &str = "assets";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Upstream API key
///
/// Never printed: `Debug` is redacted so the key cannot leak through
/// `tracing` fields or error messages.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Raw key, for building the outbound request only
    pub fn expose(&self) -> &str {
        &self.0
    }

    fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Configuration loaded from TOML file
///
/// Every key is optional; missing keys fall through to compiled defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub api_key: Option<ApiKey>,

    /// Articles requested per upstream call (clamped to 1..=100 by the client)
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Upstream base URL, e.g. `https://newsapi.org/v2/`
    #[serde(default)]
    pub base_url: Option<String>,

    /// Directory served under `/assets`
    #[serde(default)]
    pub assets_dir: Option<PathBuf>,

    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` wins over this
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Locate and load the config file
    ///
    /// An explicitly named file must exist and parse. Without one, the
    /// platform default location is tried and silently skipped if absent.
    pub fn discover(explicit: Option<&Path>) -> Result<Option<Self>> {
        if let Some(path) = explicit {
            return Self::load(path).map(Some);
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                info!("Using config file {}", path.display());
                Self::load(&path).map(Some)
            }
            _ => Ok(None),
        }
    }
}

/// Default config file location: `<config_dir>/newsdesk/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("newsdesk").join("config.toml"))
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub api_key: Option<ApiKey>,
    pub page_size: Option<u32>,
    pub base_url: Option<String>,
    pub assets_dir: Option<PathBuf>,
}

/// Fully resolved startup settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub api_key: ApiKey,
    pub page_size: u32,
    pub base_url: String,
    pub assets_dir: PathBuf,
    pub request_timeout: Duration,
    pub log_level: String,
}

impl Settings {
    /// Merge overrides, file config and defaults
    ///
    /// Fails with [`Error::Config`] when no non-blank API key is available
    /// from any source.
    pub fn resolve(overrides: ConfigOverrides, file: Option<TomlConfig>) -> Result<Self> {
        let file = file.unwrap_or_default();

        let api_key = overrides
            .api_key
            .or(file.api_key)
            .filter(|key| !key.is_blank())
            .ok_or_else(|| {
                Error::Config(
                    "API key must be set. Either set it via the NEWS_API_KEY env var, \
                     the .env file, or api_key in the config file"
                        .to_string(),
                )
            })?;

        Ok(Self {
            host: overrides
                .host
                .or(file.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(file.port).unwrap_or(DEFAULT_PORT),
            api_key,
            page_size: overrides
                .page_size
                .or(file.page_size)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            base_url: overrides
                .base_url
                .or(file.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            assets_dir: overrides
                .assets_dir
                .or(file.assets_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR)),
            request_timeout: Duration::from_secs(
                file.request_timeout_secs
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
            log_level: file.logging.level,
        })
    }

    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_debug_is_redacted() {
        let key = ApiKey::new("super-secret");
        assert_eq!(format!("{:?}", key), "ApiKey(***)");
        assert_eq!(key.expose(), "super-secret");
    }

    #[test]
    fn test_settings_debug_hides_api_key() {
        let overrides = ConfigOverrides {
            api_key: Some(ApiKey::new("super-secret")),
            ..Default::default()
        };
        let settings = Settings::resolve(overrides, None).unwrap();
        assert!(!format!("{:?}", settings).contains("super-secret"));
    }

    #[test]
    fn test_defaults_applied() {
        let overrides = ConfigOverrides {
            api_key: Some(ApiKey::new("k")),
            ..Default::default()
        };
        let settings = Settings::resolve(overrides, None).unwrap();

        assert_eq!(settings.host, DEFAULT_HOST);
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.page_size, 10);
        assert_eq!(settings.base_url, "https://newsapi.org/v2/");
        assert_eq!(settings.assets_dir, PathBuf::from("assets"));
        assert_eq!(settings.request_timeout, Duration::from_secs(10));
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let result = Settings::resolve(ConfigOverrides::default(), None);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_blank_api_key_rejected() {
        let overrides = ConfigOverrides {
            api_key: Some(ApiKey::new("   ")),
            ..Default::default()
        };
        assert!(matches!(
            Settings::resolve(overrides, None),
            Err(Error::Config(_))
        ));
    }
}
