//! Configuration file loading
//!
//! Handles loading the SLO catalog from TOML files.

use crate::config::Config;
use crate::error::ConfigError;

use std::path::{Path, PathBuf};

/// Configuration file handler
pub struct ConfigFile;

impl ConfigFile {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;

        let config: Config = toml::from_str(&content)?;
        log::debug!(
            "Parsed {} SLO definitions from {}",
            config.slos.len(),
            path.display()
        );
        Ok(config)
    }

    /// Load configuration from the first default location that exists
    ///
    /// A file that exists but fails to parse is an error, not a fallthrough.
    pub fn load_default() -> Result<Option<Config>, ConfigError> {
        for path in Self::default_paths() {
            if path.exists() {
                let config = Self::load(&path)?;
                log::info!("Loaded config from {}", path.display());
                return Ok(Some(config));
            }
        }
        Ok(None)
    }

    /// Get default configuration file paths, in lookup order
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("slos.toml"), PathBuf::from(".slodash.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("slodash").join("slos.toml"));
        }

        paths
    }
}
