//! Unified error types for slodash
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from dashboard assembly or serialization
    #[error("Dashboard build error: {0}")]
    Build(#[from] BuildError),

    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from SLO parameter validation
    #[error("SLO validation error: {0}")]
    Domain(#[from] DomainError),

    /// Error from writing generated dashboards
    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    /// SLO not found in the catalog
    #[error("SLO not found: {0}")]
    SloNotFound(String),

    /// Catalog has no SLO definitions
    #[error("No SLO definitions configured")]
    NoSlosConfigured,

    /// IO error (stdout and other file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while turning a composed dashboard into its document
#[derive(Error, Debug)]
pub enum BuildError {
    /// JSON serialization failed
    #[error("Failed to serialize dashboard: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Two panels share grid cells
    #[error("Panels '{first}' and '{second}' overlap on the grid")]
    PanelOverlap { first: String, second: String },

    /// A panel extends past the right edge of the grid
    #[error("Panel '{title}' ends at column {end} (grid has {columns} columns)")]
    RowOverflow {
        title: String,
        end: u32,
        columns: u32,
    },

    /// Dashboard has no panels
    #[error("Dashboard '{0}' has no panels")]
    EmptyDashboard(String),
}

/// Errors from SLO parameter validation
///
/// The query and composition layers never raise these; they are checked at
/// the catalog boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Target ratio must lie strictly between 0 and 1
    #[error("Invalid target: {0} (must be between 0 and 1, exclusive)")]
    InvalidTarget(f64),

    /// Time window is not a Prometheus-style duration
    #[error("Invalid time window: '{0}' (expected e.g. 28d, 7d, 12h)")]
    InvalidTimeWindow(String),

    /// A required text field is blank
    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),

    /// Two catalog entries share a uid
    #[error("Duplicate SLO uid: {0}")]
    DuplicateUid(String),
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Errors from the output layer
#[derive(Error, Debug)]
pub enum OutputError {
    /// Output directory could not be created
    #[error("Failed to create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Dashboard file could not be written
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
