//! Grid layout bookkeeping
//!
//! Rows stack top to bottom and panels fill a row left to right. The
//! accumulator hands out coordinates so that no two panels can overlap as
//! long as each row's widths stay within the grid.

use crate::error::BuildError;
use crate::panel::{GridPos, PanelDocument};

/// Number of columns in the dashboard grid
pub const GRID_COLUMNS: u32 = 24;

/// Running vertical offset for a dashboard
#[derive(Debug, Clone, Default)]
pub struct GridLayout {
    y: u32,
}

impl GridLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new row of the given height below the previous one
    pub fn row(&mut self, height: u32) -> Row {
        let row = Row {
            y: self.y,
            height,
            x: 0,
        };
        self.y += height;
        row
    }

    /// Total height used so far
    pub fn height(&self) -> u32 {
        self.y
    }
}

/// One row being filled left to right
#[derive(Debug, Clone)]
pub struct Row {
    y: u32,
    height: u32,
    x: u32,
}

impl Row {
    /// Place the next panel with the given width
    pub fn place(&mut self, width: u32) -> GridPos {
        let pos = GridPos::new(self.height, width, self.x, self.y);
        self.x += width;
        pos
    }

    /// Place a panel over the rest of the row
    pub fn fill(&mut self) -> GridPos {
        let width = GRID_COLUMNS.saturating_sub(self.x);
        self.place(width)
    }
}

/// Check that panels stay inside the grid and never share a cell
///
/// # Errors
/// `RowOverflow` for a panel past the last column, `PanelOverlap` for the
/// first overlapping pair found.
pub fn validate_layout(panels: &[PanelDocument]) -> Result<(), BuildError> {
    for panel in panels {
        if panel.grid_pos.right() > GRID_COLUMNS {
            return Err(BuildError::RowOverflow {
                title: panel.title.clone(),
                end: panel.grid_pos.right(),
                columns: GRID_COLUMNS,
            });
        }
    }

    for (i, first) in panels.iter().enumerate() {
        for second in &panels[i + 1..] {
            if first.grid_pos.overlaps(&second.grid_pos) {
                return Err(BuildError::PanelOverlap {
                    first: first.title.clone(),
                    second: second.title.clone(),
                });
            }
        }
    }

    Ok(())
}
