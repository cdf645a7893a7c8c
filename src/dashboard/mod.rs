//! Dashboard document
//!
//! Collects finalized panels in order and serializes them together with the
//! dashboard metadata. Serialization is all-or-nothing: the layout is
//! validated first and any problem is returned instead of a partial document.

pub mod layout;

pub use layout::{validate_layout, GridLayout, Row, GRID_COLUMNS};

use crate::error::BuildError;
use crate::panel::{DatasourceConfig, Panel, PanelDocument};
use serde::{Deserialize, Serialize};

/// Tag every generated dashboard carries
pub const SLO_TAG: &str = "slo";

/// Default time range shown when the dashboard opens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: String,
    pub to: String,
}

/// Settings shared by every dashboard in a catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Datasource plugin type
    pub datasource_type: String,
    /// Datasource uid every panel queries
    pub datasource_uid: String,
    /// Start of the default time range
    pub time_from: String,
    /// End of the default time range
    pub time_to: String,
    /// Extra tags; `slo` is always added
    pub tags: Vec<String>,
    /// Whether the dashboard can be edited in the UI
    pub editable: bool,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            datasource_type: "prometheus".to_string(),
            datasource_uid: "grafanacloud-prom".to_string(),
            time_from: "now-6h".to_string(),
            time_to: "now".to_string(),
            tags: vec![SLO_TAG.to_string()],
            editable: true,
        }
    }
}

impl DashboardSettings {
    /// Datasource config with no unit or bounds
    pub fn datasource(&self) -> DatasourceConfig {
        DatasourceConfig::new(&self.datasource_type, &self.datasource_uid)
    }

    /// Configured tags with `slo` first and duplicates removed
    fn tags(&self) -> Vec<String> {
        let mut tags = vec![SLO_TAG.to_string()];
        for tag in &self.tags {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
        tags
    }
}

/// The dashboard as serialized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardDocument {
    pub uid: String,
    pub title: String,
    pub description: String,
    pub editable: bool,
    pub time: TimeRange,
    pub tags: Vec<String>,
    pub panels: Vec<PanelDocument>,
}

/// A dashboard under composition
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    document: DashboardDocument,
}

impl Dashboard {
    /// Create an empty dashboard with the default settings
    pub fn new(
        uid: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::with_settings(uid, title, description, &DashboardSettings::default())
    }

    /// Create an empty dashboard
    pub fn with_settings(
        uid: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        settings: &DashboardSettings,
    ) -> Self {
        Self {
            document: DashboardDocument {
                uid: uid.into(),
                title: title.into(),
                description: description.into(),
                editable: settings.editable,
                time: TimeRange {
                    from: settings.time_from.clone(),
                    to: settings.time_to.clone(),
                },
                tags: settings.tags(),
                panels: Vec::new(),
            },
        }
    }

    /// Finalize a panel and append it
    pub fn with_panel(&mut self, panel: impl Into<Panel>) -> &mut Self {
        let panel = panel.into().build();
        log::debug!(
            "{}: added {:?} panel '{}' at {:?}",
            self.document.uid,
            panel.panel_type,
            panel.title,
            panel.grid_pos
        );
        self.document.panels.push(panel);
        self
    }

    pub fn uid(&self) -> &str {
        &self.document.uid
    }

    pub fn document(&self) -> &DashboardDocument {
        &self.document
    }

    pub fn panels(&self) -> &[PanelDocument] {
        &self.document.panels
    }

    /// First panel with the given title
    pub fn panel(&self, title: &str) -> Option<&PanelDocument> {
        self.document.panels.iter().find(|p| p.title == title)
    }

    /// Check the dashboard is complete and its layout consistent
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.document.panels.is_empty() {
            return Err(BuildError::EmptyDashboard(self.document.uid.clone()));
        }
        validate_layout(&self.document.panels)
    }

    /// Serialize to pretty-printed JSON
    ///
    /// # Errors
    /// Returns a `BuildError` if validation or serialization fails; no
    /// partial output is produced.
    pub fn to_json(&self) -> Result<String, BuildError> {
        self.validate()?;
        Ok(serde_json::to_string_pretty(&self.document)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::{GridPos, StatPanel, TextPanel};

    #[test]
    fn test_default_metadata() {
        let dashboard = Dashboard::new("uid-1", "Title", "Desc");
        let doc = dashboard.document();
        assert!(doc.editable);
        assert_eq!(doc.time.from, "now-6h");
        assert_eq!(doc.time.to, "now");
        assert_eq!(doc.tags, vec!["slo".to_string()]);
    }

    #[test]
    fn test_slo_tag_always_present() {
        let settings = DashboardSettings {
            tags: vec!["team-a".to_string(), "slo".to_string()],
            ..DashboardSettings::default()
        };
        let dashboard = Dashboard::with_settings("u", "t", "d", &settings);
        assert_eq!(dashboard.document().tags, vec!["slo", "team-a"]);

        let settings = DashboardSettings {
            tags: Vec::new(),
            ..DashboardSettings::default()
        };
        let dashboard = Dashboard::with_settings("u", "t", "d", &settings);
        assert_eq!(dashboard.document().tags, vec!["slo"]);
    }

    #[test]
    fn test_empty_dashboard_fails() {
        let dashboard = Dashboard::new("empty", "t", "d");
        assert!(matches!(
            dashboard.to_json(),
            Err(BuildError::EmptyDashboard(uid)) if uid == "empty"
        ));
    }

    #[test]
    fn test_overlap_fails_serialization() {
        let mut dashboard = Dashboard::new("u", "t", "d");
        dashboard
            .with_panel(TextPanel::new("a", "", GridPos::new(4, 12, 0, 0)))
            .with_panel(StatPanel::new("b", "", GridPos::new(4, 12, 6, 0)));
        assert!(matches!(
            dashboard.to_json(),
            Err(BuildError::PanelOverlap { .. })
        ));
    }

    #[test]
    fn test_top_level_shape() {
        let mut dashboard = Dashboard::new("u", "t", "d");
        dashboard.with_panel(TextPanel::new("", "# t", GridPos::new(4, 24, 0, 0)));
        let value: serde_json::Value = serde_json::from_str(&dashboard.to_json().unwrap()).unwrap();

        for key in ["uid", "title", "description", "editable", "time", "tags", "panels"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["panels"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_to_json_idempotent() {
        let mut dashboard = Dashboard::new("u", "t", "d");
        dashboard.with_panel(TextPanel::new("", "# t", GridPos::new(4, 24, 0, 0)));
        assert_eq!(dashboard.to_json().unwrap(), dashboard.to_json().unwrap());
    }

    #[test]
    fn test_settings_datasource() {
        let ds = DashboardSettings::default().datasource();
        assert_eq!(ds.kind, "prometheus");
        assert_eq!(ds.uid, "grafanacloud-prom");
        assert!(ds.unit.is_none());
    }
}
