//! Voxa Configuration Module
//!
//! Demo tuning and display defaults.
//! Config is stored in `~/.config/voxa/config.toml`.
//!
//! ## Priority Order (highest to lowest)
//!
//! 1. Environment variables (`VOXA_SEED`, `VOXA_LOCALE`, `VOXA_TIME_SCALE`, `VOXA_EMAIL`)
//! 2. Config file (`~/.config/voxa/config.toml`)
//! 3. Defaults

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VoxaError};
use crate::notification::Locale;
use crate::scheduler::{default_catalog, TriggerSpec, DEFAULT_WELCOME_DELAY_MS};
use crate::share::DEFAULT_BASE_URL;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VoxaConfig {
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub share: ShareConfig,

    #[serde(default)]
    pub identity: IdentityConfig,
}

/// Demo trigger timings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchedulerConfig {
    /// Delay before the welcome toast (ms)
    pub welcome_delay_ms: Option<u64>,

    /// Multiplier applied to every trigger offset (0.1 = ten times faster)
    pub time_scale: Option<f64>,

    /// Replaces the built-in seven-trigger catalog
    pub triggers: Option<Vec<TriggerSpec>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeneratorConfig {
    /// Fixed RNG seed for reproducible content
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    pub locale: Option<Locale>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ShareConfig {
    /// Origin used for profile links
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IdentityConfig {
    /// Signed-in user for the welcome toast
    pub email: Option<String>,
}

impl VoxaConfig {
    /// Get the config directory path
    ///
    /// Returns `~/.config/voxa/` on Unix, `%APPDATA%/voxa/` on Windows
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("voxa")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from the default path
    ///
    /// Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`
    ///
    /// Returns default config if file doesn't exist.
    /// Returns error if file exists but is malformed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| VoxaError::ConfigError {
            reason: format!("Failed to read config file: {}", e),
        })?;

        toml::from_str(&content).map_err(|e| VoxaError::ConfigError {
            reason: format!("Failed to parse config file: {}", e),
        })
    }

    /// Merge with environment variables
    ///
    /// Environment variables take precedence over config file values.
    /// Empty variables are ignored; malformed ones are errors.
    pub fn with_env(mut self) -> Result<Self> {
        if let Some(seed) = env_var("VOXA_SEED") {
            let seed = seed.parse::<u64>().map_err(|e| VoxaError::ConfigError {
                reason: format!("VOXA_SEED must be an unsigned integer: {}", e),
            })?;
            self.generator.seed = Some(seed);
        }

        if let Some(locale) = env_var("VOXA_LOCALE") {
            self.display.locale = Some(locale.parse()?);
        }

        if let Some(scale) = env_var("VOXA_TIME_SCALE") {
            let scale = scale.parse::<f64>().map_err(|e| VoxaError::ConfigError {
                reason: format!("VOXA_TIME_SCALE must be a number: {}", e),
            })?;
            self.scheduler.time_scale = Some(scale);
        }

        if let Some(email) = env_var("VOXA_EMAIL") {
            self.identity.email = Some(email);
        }

        Ok(self)
    }

    pub fn seed(&self) -> Option<u64> {
        self.generator.seed
    }

    pub fn locale(&self) -> Locale {
        self.display.locale.unwrap_or_default()
    }

    pub fn base_url(&self) -> &str {
        self.share.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn email(&self) -> Option<&str> {
        self.identity.email.as_deref()
    }

    /// Validated time scale, `1.0` when unset
    pub fn time_scale(&self) -> Result<f64> {
        let value = self.scheduler.time_scale.unwrap_or(1.0);
        if !value.is_finite() || value <= 0.0 {
            return Err(VoxaError::InvalidTimeScale { value });
        }
        Ok(value)
    }

    /// Welcome delay after time scaling
    pub fn welcome_delay(&self) -> Result<Duration> {
        let ms = self
            .scheduler
            .welcome_delay_ms
            .unwrap_or(DEFAULT_WELCOME_DELAY_MS);
        let scaled = (ms as f64 * self.time_scale()?).round() as u64;
        Ok(Duration::from_millis(scaled))
    }

    /// Trigger catalog with the time scale applied
    pub fn catalog(&self) -> Result<Vec<TriggerSpec>> {
        let scale = self.time_scale()?;
        let base = self
            .scheduler
            .triggers
            .clone()
            .unwrap_or_else(default_catalog);
        Ok(base.iter().map(|spec| spec.scaled(scale)).collect())
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
