//! Configuration management for Fitpulse
//!
//! Configuration lives in a TOML file resolved from `FITPULSE_CONFIG` or the
//! XDG config directory. A missing file is not an error: the client starts
//! from [`Config::default_config`].
//!
//! ```toml
//! [api]
//! catalog_base_url = "https://dummyjson.com"
//! fitness_base_url = "https://api.api-ninjas.com/v1"
//! api_key = "..."
//! catalog_limit = 15
//!
//! [storage]
//! path = "~/.local/share/fitpulse"
//! key = "persist:root"
//!
//! [persist]
//! whitelist = ["auth", "favourites", "theme", "water", "wellness"]
//! debounce = "0ms"
//!
//! [auth]
//! latency = "700ms"
//!
//! [exercises]
//! default_muscle = "biceps"
//! use_fallback = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

pub const DEFAULT_CATALOG_BASE_URL: &str = "https://dummyjson.com";
pub const DEFAULT_FITNESS_BASE_URL: &str = "https://api.api-ninjas.com/v1";
pub const DEFAULT_STORAGE_KEY: &str = "persist:root";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub persist: PersistConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub exercises: ExercisesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub catalog_base_url: String,
    pub fitness_base_url: String,
    /// API key sent as `X-Api-Key`; `FITPULSE_API_KEY` takes precedence
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_catalog_limit")]
    pub catalog_limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding snapshot files
    pub path: String,
    #[serde(default = "default_storage_key")]
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistConfig {
    pub whitelist: Vec<String>,
    /// Minimum interval between snapshot writes (humantime, e.g. "250ms")
    #[serde(default = "default_debounce")]
    pub debounce: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Simulated round-trip of the in-memory authenticator
    pub latency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExercisesConfig {
    pub default_muscle: String,
    /// Substitute the built-in list when the service is down or the base
    /// listing is empty
    pub use_fallback: bool,
}

fn default_catalog_limit() -> u32 {
    15
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_debounce() -> String {
    "0ms".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            catalog_base_url: DEFAULT_CATALOG_BASE_URL.to_string(),
            fitness_base_url: DEFAULT_FITNESS_BASE_URL.to_string(),
            api_key: None,
            catalog_limit: default_catalog_limit(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "~/.local/share/fitpulse".to_string(),
            key: default_storage_key(),
        }
    }
}

impl Default for PersistConfig {
    fn default() -> Self {
        Self {
            whitelist: ["auth", "favourites", "theme", "water", "wellness"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            debounce: default_debounce(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            latency: "700ms".to_string(),
        }
    }
}

impl Default for ExercisesConfig {
    fn default() -> Self {
        Self {
            default_muscle: "biceps".to_string(),
            use_fallback: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration, falling back to defaults when no file exists
    ///
    /// Parse errors in an existing file are still reported.
    pub fn load_or_default() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default_config().with_env_overrides());
        }
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Ok(config.with_env_overrides())
    }

    /// Create a default configuration
    pub fn default_config() -> Self {
        Self {
            api: ApiConfig::default(),
            storage: StorageConfig::default(),
            persist: PersistConfig::default(),
            auth: AuthConfig::default(),
            exercises: ExercisesConfig::default(),
        }
    }

    /// Apply `FITPULSE_API_KEY` and `FITPULSE_DATA_DIR` overrides
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var("FITPULSE_API_KEY") {
            if !key.is_empty() {
                self.api.api_key = Some(key);
            }
        }
        if let Ok(dir) = std::env::var("FITPULSE_DATA_DIR") {
            if !dir.is_empty() {
                self.storage.path = dir;
            }
        }
        self
    }

    /// Snapshot directory with `~` expanded
    pub fn storage_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.storage.path).to_string())
    }

    pub fn debounce(&self) -> Result<Duration> {
        parse_duration("persist.debounce", &self.persist.debounce)
    }

    pub fn auth_latency(&self) -> Result<Duration> {
        parse_duration("auth.latency", &self.auth.latency)
    }
}

fn parse_duration(field: &str, value: &str) -> Result<Duration> {
    humantime::parse_duration(value.trim()).map_err(|e| {
        ConfigError::InvalidDuration {
            field: field.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("FITPULSE_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("fitpulse").join("config.toml"))
}
