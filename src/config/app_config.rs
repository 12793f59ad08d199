//! Application configuration management
//!
//! Defaults for the esptool location and flash parameters, read from
//! `<config_dir>/espfront/config.toml` when present. The file is optional
//! and never written by the app; CLI flags override everything in it.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::errors::{ESPFrontError, Result};
use crate::models::FlashMode;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Explicit path to the esptool executable; when unset the tool is
    /// looked up next to the espfront binary and then on PATH
    #[serde(default)]
    pub tool_path: Option<PathBuf>,
    /// Default flash parameters
    #[serde(default)]
    pub flash: FlashDefaults,
}

/// Default values for the flash options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashDefaults {
    #[serde(default)]
    pub mode: FlashMode,
    #[serde(default = "default_flash_size")]
    pub size: String,
    #[serde(default = "default_flash_freq")]
    pub freq: String,
    #[serde(default = "default_compression")]
    pub compression: bool,
}

fn default_flash_size() -> String {
    "detect".to_string()
}

fn default_flash_freq() -> String {
    "40m".to_string()
}

fn default_compression() -> bool {
    true
}

impl Default for FlashDefaults {
    fn default() -> Self {
        Self {
            mode: FlashMode::default(),
            size: default_flash_size(),
            freq: default_flash_freq(),
            compression: default_compression(),
        }
    }
}

impl AppConfig {
    /// Location of the optional config file
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(crate::APP_NAME).join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it does not
    /// exist. A malformed file is an error, not a silent fallback.
    pub fn load() -> Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw)
            .map_err(|e| ESPFrontError::Config(format!("{}: {}", path.display(), e)))
    }
}
