//! Time-series panel

use super::{
    DatasourceConfig, FieldColor, FieldColorMode, FieldConfig, FieldCustom, FieldDefaults,
    GridPos, PanelDocument, PanelType, PrometheusQuery, Threshold, ThresholdsConfig,
    ThresholdsMode, Transformation,
};

/// Gradient mode that shades lines by threshold color
const SCHEME_GRADIENT: &str = "scheme";

/// Builder for a panel plotting one or more series over time
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesPanel {
    title: String,
    description: String,
    grid_pos: GridPos,
    transparent: bool,
    datasource: Option<DatasourceConfig>,
    targets: Vec<PrometheusQuery>,
    transformations: Vec<Transformation>,
    thresholds: Option<ThresholdsConfig>,
    color_mode: Option<FieldColorMode>,
    gradient_mode: Option<String>,
}

impl TimeSeriesPanel {
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
            transformations: Vec::new(),
            thresholds: None,
            color_mode: None,
            gradient_mode: None,
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

    /// Replace the transformation pipeline
    pub fn with_transformations(mut self, transformations: Vec<Transformation>) -> Self {
        self.transformations = transformations;
        self
    }

    /// Set threshold steps; lines are then colored by threshold
    pub fn with_thresholds(mut self, mode: ThresholdsMode, steps: Vec<Threshold>) -> Self {
        self.thresholds = Some(ThresholdsConfig { mode, steps });
        self.color_mode = Some(FieldColorMode::Thresholds);
        self.gradient_mode = Some(SCHEME_GRADIENT.to_string());
        self
    }

    /// Finalize into the document shape
    pub fn build(&self) -> PanelDocument {
        let mut defaults = FieldDefaults::from_datasource(self.datasource.as_ref());
        defaults.thresholds = self.thresholds.clone();
        defaults.color = self.color_mode.map(|mode| FieldColor { mode });
        defaults.custom = self.gradient_mode.as_ref().map(|gradient| FieldCustom {
            gradient_mode: gradient.clone(),
        });

        PanelDocument {
            panel_type: PanelType::Timeseries,
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
            options: None,
        }
    }
}
