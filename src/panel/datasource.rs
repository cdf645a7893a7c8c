//! Datasource references and per-panel value formatting

use serde::{Deserialize, Serialize};

/// Reference to a datasource as it appears in the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasourceRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub uid: String,
}

/// Datasource plus the value formatting applied to the panel's fields
#[derive(Debug, Clone, PartialEq)]
pub struct DatasourceConfig {
    pub kind: String,
    pub uid: String,
    pub unit: Option<String>,
    pub decimals: Option<u32>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl DatasourceConfig {
    /// Create a config with no unit or bounds
    pub fn new(kind: impl Into<String>, uid: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            uid: uid.into(),
            unit: None,
            decimals: None,
            min: None,
            max: None,
        }
    }

    /// Set the display unit (`percentunit`, `reqps`, ...)
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Set the number of decimals shown
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = Some(decimals);
        self
    }

    /// Set the axis/gauge minimum
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the axis/gauge maximum
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Bound values to [0, 1]
    pub fn unit_interval(self) -> Self {
        self.with_min(0.0).with_max(1.0)
    }

    pub fn reference(&self) -> DatasourceRef {
        DatasourceRef {
            kind: self.kind.clone(),
            uid: self.uid.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_wire_shape() {
        let ds = DatasourceConfig::new("prometheus", "grafanacloud-prom").with_unit("short");
        let value = serde_json::to_value(ds.reference()).unwrap();
        assert_eq!(value["type"], "prometheus");
        assert_eq!(value["uid"], "grafanacloud-prom");
        assert!(value.get("unit").is_none());
    }

    #[test]
    fn test_setters_overwrite() {
        let ds = DatasourceConfig::new("prometheus", "p")
            .with_unit("short")
            .with_unit("none")
            .unit_interval();
        assert_eq!(ds.unit.as_deref(), Some("none"));
        assert_eq!((ds.min, ds.max), (Some(0.0), Some(1.0)));
    }
}
