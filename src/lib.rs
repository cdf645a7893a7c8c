//! slodash - SLO dashboards as code
//!
//! This library turns latency and availability SLO definitions into
//! Grafana dashboard documents: PromQL query templates, panel builders,
//! a five-row dashboard layout and JSON serialization.
//!
//! # Modules
//!
//! - [`cli`]: Command-line interface definitions
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system and SLO catalog
//! - [`dashboard`]: Dashboard document and grid layout
//! - [`domain`]: SLO parameters with boundary validation
//! - [`error`]: Error types
//! - [`panel`]: Stat, time-series and text panel builders
//! - [`queries`]: PromQL templates per SLO kind
//! - [`services`]: Generation and file output services
//! - [`slo`]: Dashboard composition per SLO kind

pub mod cli;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod panel;
pub mod queries;
pub mod services;
pub mod slo;

pub use error::{AppError, Result};
