//! Panel assembly
//!
//! Fluent builders for the three panel shapes a SLO dashboard uses, and the
//! closed [`Panel`] type the dashboard accepts. Every builder finalizes into
//! the same wire shape, [`PanelDocument`].
//!
//! - [`StatPanel`]: single value readouts
//! - [`TimeSeriesPanel`]: plots over time
//! - [`TextPanel`]: markdown

pub mod datasource;
pub mod field;
pub mod query;
pub mod stat;
pub mod text;
pub mod timeseries;
pub mod transform;

pub use datasource::{DatasourceConfig, DatasourceRef};
pub use field::{
    FieldColor, FieldColorMode, FieldConfig, FieldCustom, FieldDefaults, Threshold,
    ThresholdsConfig, ThresholdsMode, ValueMapping, ValueMappingResult,
};
pub use query::PrometheusQuery;
pub use stat::{ReduceOptions, StatOptions, StatPanel};
pub use text::{TextMode, TextOptions, TextPanel};
pub use timeseries::TimeSeriesPanel;
pub use transform::{BinaryOperator, Operand, Transformation};

use serde::{Deserialize, Serialize};

/// Position and size of a panel in grid units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub h: u32,
    pub w: u32,
    pub x: u32,
    pub y: u32,
}

impl GridPos {
    /// Create a position from height, width, x and y
    pub const fn new(h: u32, w: u32, x: u32, y: u32) -> Self {
        Self { h, w, x, y }
    }

    /// First column to the right of the panel
    pub const fn right(&self) -> u32 {
        self.x + self.w
    }

    /// First row below the panel
    pub const fn bottom(&self) -> u32 {
        self.y + self.h
    }

    /// Check whether two panels share any cell
    pub fn overlaps(&self, other: &GridPos) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// A fully configured panel, ready to be appended to a dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Stat(StatPanel),
    TimeSeries(TimeSeriesPanel),
    Text(TextPanel),
}

impl Panel {
    /// Finalize into the document shape
    pub fn build(&self) -> PanelDocument {
        match self {
            Self::Stat(panel) => panel.build(),
            Self::TimeSeries(panel) => panel.build(),
            Self::Text(panel) => panel.build(),
        }
    }
}

impl From<StatPanel> for Panel {
    fn from(panel: StatPanel) -> Self {
        Self::Stat(panel)
    }
}

impl From<TimeSeriesPanel> for Panel {
    fn from(panel: TimeSeriesPanel) -> Self {
        Self::TimeSeries(panel)
    }
}

impl From<TextPanel> for Panel {
    fn from(panel: TextPanel) -> Self {
        Self::Text(panel)
    }
}

/// Panel type discriminator in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelType {
    Stat,
    Timeseries,
    Text,
}

/// A panel as it appears in the dashboard document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelDocument {
    #[serde(rename = "type")]
    pub panel_type: PanelType,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub grid_pos: GridPos,
    pub transparent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasource: Option<DatasourceRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_config: Option<FieldConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<PrometheusQuery>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transformations: Vec<Transformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<PanelOptions>,
}

/// Panel-type specific display options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PanelOptions {
    Stat(StatOptions),
    Text(TextOptions),
}
