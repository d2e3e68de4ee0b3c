//! Configuration types.
//!
//! Configuration lives in `config.toml` under the cinelist config directory.
//! Every section and key is optional; missing values fall back to defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Runtime configuration loaded from config.toml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// List paging settings
    #[serde(default)]
    pub list: ListConfig,

    /// Text input settings
    #[serde(default)]
    pub input: InputConfig,

    /// Chunked visibility painting settings
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

impl AppConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml(&text)
    }

    /// Load from the default location, or defaults if no file exists.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = config_path().ok_or(ConfigError::NoConfigDir)?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }
}

/// List paging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Records per page.
    pub page_size: usize,

    /// Page links shown on each side of the current page.
    pub page_link_siblings: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: 100,
            page_link_siblings: 2,
        }
    }
}

/// Text input configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Quiet period before a text filter is applied.
    pub debounce_ms: u64,
}

impl InputConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { debounce_ms: 150 }
    }
}

/// Chunked scheduler configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Wall-clock budget of a single slice.
    pub budget_ms: u64,

    /// Pause between slices.
    pub yield_ms: u64,
}

impl SchedulerConfig {
    pub fn budget(&self) -> Duration {
        Duration::from_millis(self.budget_ms)
    }

    pub fn yield_delay(&self) -> Duration {
        Duration::from_millis(self.yield_ms)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            budget_ms: 50,
            yield_ms: 25,
        }
    }
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("cinelist"))
}

/// Get the path to config.toml.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}
