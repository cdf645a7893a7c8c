//! Prometheus query targets

use serde::{Deserialize, Serialize};

/// One query target of a panel
///
/// Range mode by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrometheusQuery {
    pub ref_id: String,
    pub expr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    pub range: bool,
    pub instant: bool,
}

impl PrometheusQuery {
    /// Create a range query
    pub fn new(ref_id: impl Into<String>, expr: impl Into<String>) -> Self {
        Self {
            ref_id: ref_id.into(),
            expr: expr.into(),
            legend_format: None,
            interval: None,
            range: true,
            instant: false,
        }
    }

    /// Set the series legend
    pub fn with_legend(mut self, legend: impl Into<String>) -> Self {
        self.legend_format = Some(legend.into());
        self
    }

    /// Override the minimum step interval
    pub fn with_interval(mut self, interval: impl Into<String>) -> Self {
        self.interval = Some(interval.into());
        self
    }

    /// Evaluate over the dashboard range
    pub fn as_range(mut self) -> Self {
        self.range = true;
        self.instant = false;
        self
    }

    /// Evaluate at a single instant
    pub fn as_instant(mut self) -> Self {
        self.range = false;
        self.instant = true;
        self
    }
}
