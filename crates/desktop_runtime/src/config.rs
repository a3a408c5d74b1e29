//! Desktop layout configuration.

use serde::{Deserialize, Serialize};

use crate::{
    error::DesktopError,
    model::{
        DockPosition, WindowGeometry, DEFAULT_MIN_WINDOW_HEIGHT, DEFAULT_MIN_WINDOW_WIDTH,
        DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconGrid {
    pub cell_width: i32,
    pub cell_height: i32,
    pub margin: i32,
}

impl Default for IconGrid {
    fn default() -> Self {
        Self {
            cell_width: 90,
            cell_height: 100,
            margin: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    pub viewport: Viewport,
    /// Band reserved for the dock/taskbar; excluded from centering and maximize bounds.
    pub chrome_height: i32,
    pub title_bar_height: i32,
    pub default_window_width: i32,
    pub default_window_height: i32,
    pub min_window_width: i32,
    pub min_window_height: i32,
    pub icon_grid: IconGrid,
    pub dock_position: DockPosition,
    pub default_theme: String,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            chrome_height: 48,
            title_bar_height: 32,
            default_window_width: DEFAULT_WINDOW_WIDTH,
            default_window_height: DEFAULT_WINDOW_HEIGHT,
            min_window_width: DEFAULT_MIN_WINDOW_WIDTH,
            min_window_height: DEFAULT_MIN_WINDOW_HEIGHT,
            icon_grid: IconGrid::default(),
            dock_position: DockPosition::default(),
            default_theme: "classic".to_string(),
        }
    }
}

impl DesktopConfig {
    /// Parses a JSON override document. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DesktopError::Config`] when the document is not valid JSON for this shape.
    pub fn from_json(raw: &str) -> Result<Self, DesktopError> {
        serde_json::from_str(raw).map_err(|err| DesktopError::Config(err.to_string()))
    }

    pub fn set_viewport(&mut self, width: i32, height: i32) {
        self.viewport = Viewport { width, height };
    }

    /// Bounds a maximized window occupies: the full viewport minus the reserved chrome band.
    pub fn maximized_geometry(&self) -> WindowGeometry {
        WindowGeometry {
            x: 0,
            y: 0,
            width: self.viewport.width.max(0),
            height: (self.viewport.height - self.chrome_height).max(0),
        }
    }

    /// Top-left corner that centers a `width`×`height` window, clamped to the viewport origin.
    pub fn centered_origin(&self, width: i32, height: i32) -> (i32, i32) {
        let x = (self.viewport.width - width) / 2;
        let y = (self.viewport.height - height - self.chrome_height) / 2;
        (x.max(0), y.max(0))
    }

    /// Number of icon rows that fit in the desktop area above the chrome band.
    pub fn icon_rows(&self) -> i32 {
        let grid = self.icon_grid;
        let usable = self.viewport.height - self.chrome_height - grid.margin;
        (usable / grid.cell_height.max(1)).max(1)
    }
}
