//! Configuration system
//!
//! The SLO catalog and dashboard defaults live in a TOML file; CLI flags are
//! merged on top through [`ConfigBuilder`].

pub mod builder;
pub mod file;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use crate::dashboard::DashboardSettings;
use crate::domain::{SloKind, SloParameters};
use crate::error::{ConfigError, DomainError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Settings shared by every generated dashboard
    pub dashboard: DashboardSettings,
    /// SLO catalog, one `[[slo]]` table per dashboard
    #[serde(rename = "slo")]
    pub slos: Vec<SloDefinition>,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory generated dashboards are written to
    pub output_dir: String,
    /// Report what would be written without touching the filesystem
    pub dry_run: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output_dir: "output".to_string(),
            dry_run: false,
        }
    }
}

fn default_time_window() -> String {
    "28d".to_string()
}

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SloDefinition {
    pub kind: SloKind,
    pub uid: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_time_window")]
    pub time_window: String,
    pub target: f64,
    pub success_query: String,
    pub total_query: String,
    /// Output file name; `<uid>.json` when unset
    #[serde(default)]
    pub file_name: Option<String>,
    /// Creation time in unix seconds; availability dashboards only
    #[serde(default)]
    pub created_at: Option<u64>,
}

impl SloDefinition {
    /// Parameters the dashboard is built from
    pub fn to_parameters(&self) -> SloParameters {
        SloParameters::new(
            &self.uid,
            &self.name,
            &self.description,
            &self.time_window,
            self.target,
            &self.success_query,
            &self.total_query,
        )
    }

    pub fn file_name(&self) -> String {
        self.file_name
            .clone()
            .unwrap_or_else(|| format!("{}.json", self.uid))
    }
}

impl Config {
    /// Look up a catalog entry by uid
    pub fn find(&self, uid: &str) -> Option<&SloDefinition> {
        self.slos.iter().find(|slo| slo.uid == uid)
    }

    /// Check settings and every catalog entry
    ///
    /// Returns one `(uid, error)` pair per invalid entry, empty if the
    /// catalog is clean.
    pub fn validate_slos(&self) -> Vec<(String, DomainError)> {
        let mut problems = Vec::new();
        let mut seen = HashSet::new();

        for slo in &self.slos {
            if let Err(e) = slo.to_parameters().validate() {
                problems.push((slo.uid.clone(), e));
            }
            if !seen.insert(slo.uid.as_str()) {
                problems.push((slo.uid.clone(), DomainError::DuplicateUid(slo.uid.clone())));
            }
        }

        problems
    }

    /// Check the settings that are not tied to a single SLO
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.output_dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "general.output_dir".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.dashboard.datasource_uid.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "dashboard.datasource_uid".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        let mut file_names = HashSet::new();
        for slo in &self.slos {
            let name = slo.file_name();
            if !file_names.insert(name.clone()) {
                return Err(ConfigError::InvalidValue {
                    key: format!("slo.{}.file_name", slo.uid),
                    message: format!("'{name}' is used by more than one SLO"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
[general]
output_dir = "dashboards"

[dashboard]
datasource_uid = "local-prom"

[[slo]]
kind = "latency"
uid = "checkout-latency"
name = "Checkout latency"
target = 0.95
success_query = 'http_duration_bucket{le="0.25"}'
total_query = 'http_duration_count'

[[slo]]
kind = "availability"
uid = "checkout-availability"
name = "Checkout availability"
time_window = "7d"
target = 0.999
success_query = 'http_requests_total{code=~"5.."}'
total_query = 'http_requests_total'
file_name = "availability.json"
created_at = 1700000000
"#;

    fn catalog() -> Config {
        toml::from_str(CATALOG).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.output_dir, "output");
        assert_eq!(config.dashboard.datasource_uid, "grafanacloud-prom");
        assert!(config.slos.is_empty());
    }

    #[test]
    fn test_parse_catalog() {
        let config = catalog();
        assert_eq!(config.general.output_dir, "dashboards");
        assert_eq!(config.dashboard.datasource_uid, "local-prom");
        assert_eq!(config.dashboard.time_from, "now-6h");
        assert_eq!(config.slos.len(), 2);

        let latency = &config.slos[0];
        assert_eq!(latency.kind, SloKind::Latency);
        assert_eq!(latency.time_window, "28d");
        assert_eq!(latency.file_name(), "checkout-latency.json");
        assert!(latency.created_at.is_none());

        let availability = config.find("checkout-availability").unwrap();
        assert_eq!(availability.file_name(), "availability.json");
        assert_eq!(availability.created_at, Some(1_700_000_000));
    }

    #[test]
    fn test_to_parameters() {
        let config = catalog();
        let params = config.slos[1].to_parameters();
        assert_eq!(params.time_window, "7d");
        assert_eq!(params.target, 0.999);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_bad_entries() {
        let mut config = catalog();
        config.slos[0].target = 1.5;
        config.slos.push(config.slos[1].clone());

        let problems = config.validate_slos();
        assert_eq!(problems.len(), 2);
        assert_eq!(problems[0].1, DomainError::InvalidTarget(1.5));
        assert!(matches!(problems[1].1, DomainError::DuplicateUid(_)));
    }

    #[test]
    fn test_validate_settings() {
        let mut config = catalog();
        assert!(config.validate().is_ok());

        config.general.output_dir = " ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_duplicate_file_names_rejected() {
        let mut config = catalog();
        config.slos[1].file_name = Some("checkout-latency.json".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_required_field() {
        let result: Result<Config, _> = toml::from_str(
            r#"
[[slo]]
kind = "latency"
uid = "x"
"#,
        );
        assert!(result.is_err());
    }
}
