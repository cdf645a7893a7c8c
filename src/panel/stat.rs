//! Single-value stat panel

use super::{
    DatasourceConfig, FieldColor, FieldColorMode, FieldConfig, FieldDefaults, GridPos,
    PanelDocument, PanelOptions, PanelType, PrometheusQuery, Threshold, ThresholdsConfig,
    ThresholdsMode, Transformation, ValueMapping,
};
use serde::{Deserialize, Serialize};

/// How a series is reduced to the single displayed value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReduceOptions {
    /// Reducers such as `lastNotNull`; empty means the platform default
    pub calcs: Vec<String>,
    /// Field selector, a name or a `/regex/`
    pub fields: String,
    /// Show every value rather than a reduction
    pub values: bool,
}

impl ReduceOptions {
    /// Reduce the fields matching `fields` with the default calculation
    pub fn fields(fields: impl Into<String>) -> Self {
        Self {
            calcs: Vec::new(),
            fields: fields.into(),
            values: false,
        }
    }
}

/// Stat panel display options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatOptions {
    pub reduce_options: ReduceOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justify_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wide_layout: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_percent_change: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_change_color_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
}

impl StatOptions {
    /// Options that only set the reduction
    pub fn reduce(reduce_options: ReduceOptions) -> Self {
        Self {
            reduce_options,
            graph_mode: None,
            color_mode: None,
            justify_mode: None,
            text_mode: None,
            wide_layout: None,
            show_percent_change: None,
            percent_change_color_mode: None,
            orientation: None,
        }
    }

    /// Area sparkline, value coloring, automatic layout
    pub fn standard(reduce_options: ReduceOptions) -> Self {
        Self {
            graph_mode: Some("area".to_string()),
            color_mode: Some("value".to_string()),
            justify_mode: Some("auto".to_string()),
            text_mode: Some("auto".to_string()),
            wide_layout: Some(true),
            show_percent_change: Some(false),
            percent_change_color_mode: Some("standard".to_string()),
            orientation: Some("auto".to_string()),
            ..Self::reduce(reduce_options)
        }
    }
}

/// Builder for a single-value panel
#[derive(Debug, Clone, PartialEq)]
pub struct StatPanel {
    title: String,
    description: String,
    grid_pos: GridPos,
    transparent: bool,
    datasource: Option<DatasourceConfig>,
    targets: Vec<PrometheusQuery>,
    mappings: Vec<ValueMapping>,
    transformations: Vec<Transformation>,
    options: Option<StatOptions>,
    thresholds: Option<ThresholdsConfig>,
    color_mode: Option<FieldColorMode>,
}

impl StatPanel {
    /// Create a transparent panel with no targets
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        grid_pos: GridPos,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            grid_pos,
            transparent: true,
            datasource: None,
            targets: Vec::new(),
            mappings: Vec::new(),
            transformations: Vec::new(),
            options: None,
            thresholds: None,
            color_mode: None,
        }
    }

    pub fn with_datasource(mut self, datasource: DatasourceConfig) -> Self {
        self.datasource = Some(datasource);
        self
    }

    /// Append a query target
    pub fn with_target(mut self, target: PrometheusQuery) -> Self {
        self.targets.push(target);
        self
    }

    /// Append value mappings
    pub fn with_mappings(mut self, mappings: impl IntoIterator<Item = ValueMapping>) -> Self {
        self.mappings.extend(mappings);
        self
    }

    /// Replace the transformation pipeline
    pub fn with_transformations(mut self, transformations: Vec<Transformation>) -> Self {
        self.transformations = transformations;
        self
    }

    pub fn with_options(mut self, options: StatOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Set threshold steps and switch the color mode to follow them
    pub fn with_thresholds(mut self, mode: ThresholdsMode, steps: Vec<Threshold>) -> Self {
        self.thresholds = Some(ThresholdsConfig { mode, steps });
        self.color_mode = Some(FieldColorMode::Thresholds);
        self
    }

    /// Finalize into the document shape
    pub fn build(&self) -> PanelDocument {
        let mut defaults = FieldDefaults::from_datasource(self.datasource.as_ref());
        defaults.thresholds = self.thresholds.clone();
        defaults.mappings = self.mappings.clone();
        defaults.color = self.color_mode.map(|mode| FieldColor { mode });

        PanelDocument {
            panel_type: PanelType::Stat,
            title: self.title.clone(),
            description: Some(self.description.clone()),
            grid_pos: self.grid_pos,
            transparent: self.transparent,
            datasource: self.datasource.as_ref().map(DatasourceConfig::reference),
            field_config: Some(FieldConfig {
                defaults,
                overrides: Vec::new(),
            }),
            targets: self.targets.clone(),
            transformations: self.transformations.clone(),
            options: self.options.clone().map(PanelOptions::Stat),
        }
    }
}
