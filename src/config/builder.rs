//! Configuration builder
//!
//! Merges the catalog file with CLI arguments.

use crate::config::{Config, ConfigFile};
use crate::error::ConfigError;

/// Builder for merging configuration sources
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Load configuration from a file, or from the default locations
    ///
    /// An explicit path must exist; the default locations may all be absent.
    pub fn with_file(mut self, path: Option<&str>) -> Result<Self, ConfigError> {
        let file_config = match path {
            Some(path) => Some(ConfigFile::load(path)?),
            None => ConfigFile::load_default()?,
        };

        match file_config {
            Some(cfg) => self.config = cfg,
            None => log::debug!("No config file found, using defaults"),
        }

        Ok(self)
    }

    /// Override with CLI dry-run flag
    pub fn with_dry_run(mut self, dry_run: Option<bool>) -> Self {
        if let Some(d) = dry_run {
            self.config.general.dry_run = d;
        }
        self
    }

    /// Override with CLI output directory
    pub fn with_output_dir(mut self, output_dir: Option<String>) -> Self {
        if let Some(dir) = output_dir {
            self.config.general.output_dir = dir;
        }
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
