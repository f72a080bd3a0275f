//! Configuration for quicklog
//!
//! Read from `~/.quicklog/config.toml` when present. Every field is optional.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::quicklog::{MemoryQuicklog, NoopQuicklog, Quicklog};
use crate::store::{clamp_capacity, DEFAULT_CAPACITY};

/// Quicklog settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Entries kept per group (default: 40, clamped to 1..=500)
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// When false, [`Config::build`] returns a quicklog that discards everything
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Timezone used for rendering snapshots (e.g. "UTC", "America/New_York")
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Render absolute timestamps instead of "Ns ago"
    #[serde(default)]
    pub exact_time: bool,
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_enabled() -> bool {
    true
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            enabled: default_enabled(),
            timezone: default_timezone(),
            exact_time: false,
        }
    }
}

impl Config {
    /// Load configuration from the default location, or defaults if absent
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `path`, or defaults if the file doesn't exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Capacity after clamping into the supported range
    pub fn effective_capacity(&self) -> usize {
        clamp_capacity(self.capacity)
    }

    /// Create the quicklog described by this configuration
    pub fn build(&self) -> Arc<dyn Quicklog> {
        if self.enabled {
            Arc::new(MemoryQuicklog::with_capacity(self.capacity))
        } else {
            tracing::debug!("Quicklog disabled, recording nothing");
            Arc::new(NoopQuicklog)
        }
    }
}

/// Get the base configuration directory (~/.quicklog)
/// Falls back to ./.quicklog if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    try_config_dir().unwrap_or_else(|| {
        tracing::warn!("Could not determine home directory, using current directory for config");
        PathBuf::from(".quicklog")
    })
}

/// Try to get the base configuration directory, returning None if home dir is unavailable
pub fn try_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".quicklog"))
}

/// Get the path to the config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}
