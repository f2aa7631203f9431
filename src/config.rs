//! Configuration for FlatDB
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Default field delimiter used in the on-disk format
pub const DEFAULT_DELIMITER: char = ';';

/// Main configuration for a FlatDB table
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Path of the database file (header line + one line per record)
    pub path: PathBuf,

    // -------------------------------------------------------------------------
    // Format Configuration
    // -------------------------------------------------------------------------
    /// Field delimiter separating columns in the header and in data rows
    pub delimiter: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./flatdb.txt"),
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl Config {
    /// Create a config for the given database file with default settings
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the database file path
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = path.into();
        self
    }

    /// Set the field delimiter (default `;`)
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
