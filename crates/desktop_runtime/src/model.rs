use std::{collections::BTreeSet, fmt, rc::Rc};

use serde::{Deserialize, Serialize};

pub const DEFAULT_WINDOW_WIDTH: i32 = 600;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 400;
pub const DEFAULT_MIN_WINDOW_WIDTH: i32 = 300;
pub const DEFAULT_MIN_WINDOW_HEIGHT: i32 = 200;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a timestamp-based id (`window-<ms>`), unique within the process.
    pub fn generate() -> Self {
        Self(platform_host::next_window_token("window"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for WindowId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl WindowGeometry {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub title: String,
    pub icon: String,
    pub geometry: WindowGeometry,
    /// Pre-maximize bounds. Also kept while a maximized window is minimized so restore can
    /// return it to the maximized layout.
    pub saved_geometry: Option<WindowGeometry>,
    pub z_index: u32,
    pub state: WindowState,
    pub is_focused: bool,
    pub min_width: i32,
    pub min_height: i32,
    pub resizable: bool,
    pub draggable: bool,
}

impl WindowRecord {
    pub fn is_minimized(&self) -> bool {
        self.state == WindowState::Minimized
    }

    pub fn is_maximized(&self) -> bool {
        self.state == WindowState::Maximized
    }

    pub fn is_visible(&self) -> bool {
        !self.is_minimized()
    }
}

/// Window body material. Templates are resolved before the window is mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowContent {
    Html(String),
    Template(String),
}

impl Default for WindowContent {
    fn default() -> Self {
        Self::Html(String::new())
    }
}

/// Callback run once a created window is fully interactive.
#[derive(Clone)]
pub struct WindowCallback(Rc<dyn Fn(&WindowId)>);

impl WindowCallback {
    pub fn new(f: impl Fn(&WindowId) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, window_id: &WindowId) {
        (self.0)(window_id)
    }
}

impl fmt::Debug for WindowCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WindowCallback(..)")
    }
}

#[derive(Debug, Clone)]
pub struct CreateWindowRequest {
    pub id: WindowId,
    pub title: String,
    pub icon: String,
    pub content: WindowContent,
    /// Requested size; `None` takes the desktop's configured default.
    pub width: Option<i32>,
    pub height: Option<i32>,
    /// Minimum size; `None` takes the desktop's configured minimum.
    pub min_width: Option<i32>,
    pub min_height: Option<i32>,
    pub resizable: bool,
    pub draggable: bool,
    pub centered: bool,
    /// Explicit position, used when `centered` is false.
    pub x: i32,
    pub y: i32,
    pub on_window_created: Option<WindowCallback>,
}

impl CreateWindowRequest {
    pub fn new(id: impl Into<WindowId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            icon: String::new(),
            content: WindowContent::default(),
            width: None,
            height: None,
            min_width: None,
            min_height: None,
            resizable: true,
            draggable: true,
            centered: true,
            x: 0,
            y: 0,
            on_window_created: None,
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn content(mut self, content: WindowContent) -> Self {
        self.content = content;
        self
    }

    pub fn size(mut self, width: i32, height: i32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn min_size(mut self, min_width: i32, min_height: i32) -> Self {
        self.min_width = Some(min_width);
        self.min_height = Some(min_height);
        self
    }

    /// Places the window at `(x, y)` instead of centering it.
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.centered = false;
        self.x = x;
        self.y = y;
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    pub fn on_created(mut self, f: impl Fn(&WindowId) + 'static) -> Self {
        self.on_window_created = Some(WindowCallback::new(f));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockEntry {
    pub window_id: WindowId,
    pub title: String,
    pub icon: String,
    pub minimized: bool,
    pub focused: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DockPosition {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl DockPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplaySurface {
    Desktop,
    StartMenu,
}

/// Zero-argument launch action stored with a registered app.
#[derive(Clone)]
pub struct AppHandler(Rc<dyn Fn()>);

impl AppHandler {
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn invoke(&self) {
        (self.0)()
    }
}

impl fmt::Debug for AppHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AppHandler(..)")
    }
}

#[derive(Debug, Clone)]
pub struct RegisteredApp {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub handler: AppHandler,
    pub display_surfaces: BTreeSet<DisplaySurface>,
}

impl RegisteredApp {
    /// Creates a launcher descriptor shown on both the desktop and the start menu.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        icon: impl Into<String>,
        handler: impl Fn() + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            handler: AppHandler::new(handler),
            display_surfaces: [DisplaySurface::Desktop, DisplaySurface::StartMenu]
                .into_iter()
                .collect(),
        }
    }

    pub fn on_surfaces(mut self, surfaces: impl IntoIterator<Item = DisplaySurface>) -> Self {
        self.display_surfaces = surfaces.into_iter().collect();
        self
    }

    pub fn shows_on(&self, surface: DisplaySurface) -> bool {
        self.display_surfaces.contains(&surface)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

impl PointerPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconPosition {
    pub x: i32,
    pub y: i32,
}

/// Start-menu row derived from a registered app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherItem {
    pub app_id: String,
    pub name: String,
    pub icon: String,
}

/// Desktop icon derived from a registered app plus its grid or saved position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopIcon {
    pub app_id: String,
    pub name: String,
    pub icon: String,
    pub position: IconPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub geometry_start: WindowGeometry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub edge: ResizeEdge,
    pub pointer_start: PointerPosition,
    pub geometry_start: WindowGeometry,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
    pub resizing: Option<ResizeSession>,
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        self.dragging.is_none() && self.resizing.is_none()
    }
}
