//! Field configuration: units, thresholds, value mappings and color modes

use super::datasource::DatasourceConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How threshold values are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdsMode {
    /// Values are absolute
    #[default]
    Absolute,
    /// Values are percentages of the min/max range
    Percentage,
}

/// One threshold step: values at or above `value` take `color`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub color: String,
    pub value: Option<f64>,
}

impl Threshold {
    /// Create a step starting at `value`
    pub fn new(color: impl Into<String>, value: f64) -> Self {
        Self {
            color: color.into(),
            value: Some(value),
        }
    }
}

/// Threshold steps, kept in the order given
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdsConfig {
    pub mode: ThresholdsMode,
    pub steps: Vec<Threshold>,
}

/// Field color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldColorMode {
    /// Color driven by the threshold steps
    Thresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldColor {
    pub mode: FieldColorMode,
}

/// Text and color shown in place of a matched value
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValueMappingResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

/// Value-to-display override table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ValueMapping {
    /// Exact value matches
    Value {
        options: BTreeMap<String, ValueMappingResult>,
    },
}

impl ValueMapping {
    /// Map raw values to text/color pairs
    pub fn values<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, ValueMappingResult)>,
        K: Into<String>,
    {
        Self::Value {
            options: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
        }
    }

    /// Boolean alert readout: `0` shows OK in green, `1` shows `firing_text` in red
    pub fn alert_state(firing_text: &str) -> Self {
        Self::values([
            (
                "0",
                ValueMappingResult {
                    text: Some("OK".to_string()),
                    color: Some("green".to_string()),
                    index: Some(0),
                },
            ),
            (
                "1",
                ValueMappingResult {
                    text: Some(firing_text.to_string()),
                    color: Some("red".to_string()),
                    index: Some(1),
                },
            ),
        ])
    }

    /// Look up the result for a raw value
    pub fn result_for(&self, value: &str) -> Option<&ValueMappingResult> {
        match self {
            Self::Value { options } => options.get(value),
        }
    }
}

/// Panel-type specific field settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldCustom {
    pub gradient_mode: String,
}

/// Defaults applied to every field of a panel
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldDefaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<ThresholdsConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mappings: Vec<ValueMapping>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<FieldColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<FieldCustom>,
}

impl FieldDefaults {
    /// Seed unit/decimals/min/max from a datasource configuration
    pub fn from_datasource(datasource: Option<&DatasourceConfig>) -> Self {
        match datasource {
            Some(ds) => Self {
                unit: ds.unit.clone(),
                decimals: ds.decimals,
                min: ds.min,
                max: ds.max,
                ..Self::default()
            },
            None => Self::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldConfig {
    pub defaults: FieldDefaults,
    #[serde(default)]
    pub overrides: Vec<serde_json::Value>,
}
