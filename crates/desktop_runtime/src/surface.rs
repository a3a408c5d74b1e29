//! Rendering seams between desktop state and whatever draws it.
//!
//! State owners call these traits after they have changed their own state; a surface never feeds
//! decisions back. [`HeadlessSurface`] records calls for native builds and tests; the browser
//! shell renders through [`crate::components::DesktopView`].

use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use crate::model::{DesktopIcon, DockEntry, DockPosition, LauncherItem, WindowId, WindowRecord};

/// Window chrome and content presentation.
pub trait WindowSurface {
    /// Creates the window's visual representation with fully resolved `content`.
    fn mount_window(&self, record: &WindowRecord, content: &str);
    /// Syncs geometry, stacking, visibility, title, and active state from `record`.
    fn render_window(&self, record: &WindowRecord);
    fn unmount_window(&self, id: &WindowId);
}

/// Dock/taskbar presentation.
pub trait DockSurface {
    /// Redraws every entry in order for the given orientation.
    fn render_dock(&self, position: DockPosition, entries: &[DockEntry]);
}

/// Start menu and desktop icon presentation.
pub trait LauncherSurface {
    fn render_start_menu(&self, open: bool, items: &[LauncherItem]);
    fn render_desktop_icons(&self, icons: &[DesktopIcon]);
}

/// The three rendering seams injected into a runtime.
#[derive(Clone)]
pub struct SurfaceSet {
    pub windows: Rc<dyn WindowSurface>,
    pub dock: Rc<dyn DockSurface>,
    pub launcher: Rc<dyn LauncherSurface>,
}

impl SurfaceSet {
    /// Uses one object for every seam.
    pub fn shared<S>(surface: Rc<S>) -> Self
    where
        S: WindowSurface + DockSurface + LauncherSurface + 'static,
    {
        Self {
            windows: surface.clone(),
            dock: surface.clone(),
            launcher: surface,
        }
    }

    pub fn headless() -> (Self, Rc<HeadlessSurface>) {
        let surface = Rc::new(HeadlessSurface::default());
        (Self::shared(surface.clone()), surface)
    }
}

/// One recorded view call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    MountWindow { id: WindowId, content: String },
    RenderWindow(WindowRecord),
    UnmountWindow(WindowId),
    RenderDock {
        position: DockPosition,
        entries: Vec<DockEntry>,
    },
    RenderStartMenu {
        open: bool,
        items: Vec<LauncherItem>,
    },
    RenderDesktopIcons(Vec<DesktopIcon>),
}

/// In-memory surface that records every call and keeps the last rendered view of each seam.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    calls: RefCell<Vec<SurfaceCall>>,
    windows: RefCell<BTreeMap<WindowId, WindowRecord>>,
    contents: RefCell<BTreeMap<WindowId, String>>,
}

impl HeadlessSurface {
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.borrow().clone()
    }

    /// Drains the call log.
    pub fn take_calls(&self) -> Vec<SurfaceCall> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    pub fn mounted_window_ids(&self) -> Vec<WindowId> {
        self.windows.borrow().keys().cloned().collect()
    }

    /// Last rendered state of a mounted window.
    pub fn window(&self, id: &WindowId) -> Option<WindowRecord> {
        self.windows.borrow().get(id).cloned()
    }

    pub fn content(&self, id: &WindowId) -> Option<String> {
        self.contents.borrow().get(id).cloned()
    }

    pub fn is_window_shown(&self, id: &WindowId) -> bool {
        self.windows.borrow().get(id).is_some_and(|w| w.is_visible())
    }

    pub fn last_dock(&self) -> Option<(DockPosition, Vec<DockEntry>)> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            SurfaceCall::RenderDock { position, entries } => Some((*position, entries.clone())),
            _ => None,
        })
    }

    pub fn last_start_menu(&self) -> Option<(bool, Vec<LauncherItem>)> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            SurfaceCall::RenderStartMenu { open, items } => Some((*open, items.clone())),
            _ => None,
        })
    }

    pub fn last_desktop_icons(&self) -> Option<Vec<DesktopIcon>> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            SurfaceCall::RenderDesktopIcons(icons) => Some(icons.clone()),
            _ => None,
        })
    }

    fn record(&self, call: SurfaceCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl WindowSurface for HeadlessSurface {
    fn mount_window(&self, record: &WindowRecord, content: &str) {
        self.windows
            .borrow_mut()
            .insert(record.id.clone(), record.clone());
        self.contents
            .borrow_mut()
            .insert(record.id.clone(), content.to_string());
        self.record(SurfaceCall::MountWindow {
            id: record.id.clone(),
            content: content.to_string(),
        });
    }

    fn render_window(&self, record: &WindowRecord) {
        if let Some(slot) = self.windows.borrow_mut().get_mut(&record.id) {
            *slot = record.clone();
        }
        self.record(SurfaceCall::RenderWindow(record.clone()));
    }

    fn unmount_window(&self, id: &WindowId) {
        self.windows.borrow_mut().remove(id);
        self.contents.borrow_mut().remove(id);
        self.record(SurfaceCall::UnmountWindow(id.clone()));
    }
}

impl DockSurface for HeadlessSurface {
    fn render_dock(&self, position: DockPosition, entries: &[DockEntry]) {
        self.record(SurfaceCall::RenderDock {
            position,
            entries: entries.to_vec(),
        });
    }
}

impl LauncherSurface for HeadlessSurface {
    fn render_start_menu(&self, open: bool, items: &[LauncherItem]) {
        self.record(SurfaceCall::RenderStartMenu {
            open,
            items: items.to_vec(),
        });
    }

    fn render_desktop_icons(&self, icons: &[DesktopIcon]) {
        self.record(SurfaceCall::RenderDesktopIcons(icons.to_vec()));
    }
}
