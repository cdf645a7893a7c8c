//! Markdown text panel

use super::{GridPos, PanelDocument, PanelOptions, PanelType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextMode {
    Markdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextOptions {
    pub mode: TextMode,
    pub content: String,
}

/// Builder for a static markdown panel
#[derive(Debug, Clone, PartialEq)]
pub struct TextPanel {
    title: String,
    content: String,
    grid_pos: GridPos,
    transparent: bool,
}

impl TextPanel {
    /// Create a transparent markdown panel
    pub fn new(title: impl Into<String>, content: impl Into<String>, grid_pos: GridPos) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            grid_pos,
            transparent: true,
        }
    }

    /// Finalize into the document shape
    pub fn build(&self) -> PanelDocument {
        PanelDocument {
            panel_type: PanelType::Text,
            title: self.title.clone(),
            description: None,
            grid_pos: self.grid_pos,
            transparent: self.transparent,
            datasource: None,
            field_config: None,
            targets: Vec::new(),
            transformations: Vec::new(),
            options: Some(PanelOptions::Text(TextOptions {
                mode: TextMode::Markdown,
                content: self.content.clone(),
            })),
        }
    }
}
