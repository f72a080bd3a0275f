//! Error types for quicklog
//!
//! Recording and reading never fail; these only cover parsing and
//! configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// An unrecognized severity name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown log level: {0}")]
pub struct ParseLevelError(pub String);

/// Failure to load a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists but couldn't be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file contents aren't valid TOML for [`crate::config::Config`]
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
