//! Typed event catalogue carried by the [`crate::event_bus::EventBus`].
//!
//! Lifecycle notifications (`window*` past tense) are published by the window manager after it
//! has changed state. Requests (`createWindow`, `focusWindow`, ...) ask the window manager to act
//! and are published by launchers and the dock.

use crate::model::{CreateWindowRequest, RegisteredApp, WindowId};

/// Channel name of a [`DesktopEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    WindowCreated,
    WindowClosed,
    WindowMinimized,
    WindowRestored,
    WindowFocused,
    WindowRenamed,
    WindowsUnfocused,
    CreateWindow,
    CloseWindow,
    FocusWindow,
    MinimizeWindow,
    RestoreWindow,
    MaximizeWindow,
    RegisterApp,
    ThemeApplied,
}

impl EventKind {
    pub const ALL: [EventKind; 15] = [
        Self::WindowCreated,
        Self::WindowClosed,
        Self::WindowMinimized,
        Self::WindowRestored,
        Self::WindowFocused,
        Self::WindowRenamed,
        Self::WindowsUnfocused,
        Self::CreateWindow,
        Self::CloseWindow,
        Self::FocusWindow,
        Self::MinimizeWindow,
        Self::RestoreWindow,
        Self::MaximizeWindow,
        Self::RegisterApp,
        Self::ThemeApplied,
    ];

    /// Wire name of the channel.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WindowCreated => "windowCreated",
            Self::WindowClosed => "windowClosed",
            Self::WindowMinimized => "windowMinimized",
            Self::WindowRestored => "windowRestored",
            Self::WindowFocused => "windowFocused",
            Self::WindowRenamed => "windowRenamed",
            Self::WindowsUnfocused => "windowsUnfocused",
            Self::CreateWindow => "createWindow",
            Self::CloseWindow => "closeWindow",
            Self::FocusWindow => "focusWindow",
            Self::MinimizeWindow => "minimizeWindow",
            Self::RestoreWindow => "restoreWindow",
            Self::MaximizeWindow => "maximizeWindow",
            Self::RegisterApp => "registerApp",
            Self::ThemeApplied => "themeApplied",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event payloads, one variant per channel.
#[derive(Debug, Clone)]
pub enum DesktopEvent {
    WindowCreated {
        id: WindowId,
        title: String,
        icon: String,
    },
    WindowClosed {
        id: WindowId,
    },
    WindowMinimized {
        id: WindowId,
    },
    WindowRestored {
        id: WindowId,
    },
    WindowFocused {
        id: WindowId,
    },
    WindowRenamed {
        id: WindowId,
        title: String,
    },
    /// Focus was cleared from every window at once (Escape, desktop click).
    WindowsUnfocused,
    CreateWindow(CreateWindowRequest),
    CloseWindow {
        id: WindowId,
    },
    FocusWindow {
        id: WindowId,
    },
    MinimizeWindow {
        id: WindowId,
    },
    RestoreWindow {
        id: WindowId,
    },
    MaximizeWindow {
        id: WindowId,
    },
    RegisterApp(RegisteredApp),
    ThemeApplied {
        theme_id: String,
        applied: bool,
    },
}

impl DesktopEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::WindowCreated { .. } => EventKind::WindowCreated,
            Self::WindowClosed { .. } => EventKind::WindowClosed,
            Self::WindowMinimized { .. } => EventKind::WindowMinimized,
            Self::WindowRestored { .. } => EventKind::WindowRestored,
            Self::WindowFocused { .. } => EventKind::WindowFocused,
            Self::WindowRenamed { .. } => EventKind::WindowRenamed,
            Self::WindowsUnfocused => EventKind::WindowsUnfocused,
            Self::CreateWindow(_) => EventKind::CreateWindow,
            Self::CloseWindow { .. } => EventKind::CloseWindow,
            Self::FocusWindow { .. } => EventKind::FocusWindow,
            Self::MinimizeWindow { .. } => EventKind::MinimizeWindow,
            Self::RestoreWindow { .. } => EventKind::RestoreWindow,
            Self::MaximizeWindow { .. } => EventKind::MaximizeWindow,
            Self::RegisterApp(_) => EventKind::RegisterApp,
            Self::ThemeApplied { .. } => EventKind::ThemeApplied,
        }
    }

    /// Window targeted or described by the event, if any.
    pub fn window_id(&self) -> Option<&WindowId> {
        match self {
            Self::WindowCreated { id, .. }
            | Self::WindowClosed { id }
            | Self::WindowMinimized { id }
            | Self::WindowRestored { id }
            | Self::WindowFocused { id }
            | Self::WindowRenamed { id, .. }
            | Self::CloseWindow { id }
            | Self::FocusWindow { id }
            | Self::MinimizeWindow { id }
            | Self::RestoreWindow { id }
            | Self::MaximizeWindow { id } => Some(id),
            Self::CreateWindow(req) => Some(&req.id),
            Self::WindowsUnfocused | Self::RegisterApp(_) | Self::ThemeApplied { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_unique() {
        let names: std::collections::BTreeSet<_> =
            EventKind::ALL.iter().map(|kind| kind.as_str()).collect();
        assert_eq!(names.len(), EventKind::ALL.len());
        assert_eq!(EventKind::WindowsUnfocused.to_string(), "windowsUnfocused");
    }

    #[test]
    fn event_reports_kind_and_target() {
        let event = DesktopEvent::WindowMinimized { id: "w1".into() };
        assert_eq!(event.kind(), EventKind::WindowMinimized);
        assert_eq!(event.window_id().map(WindowId::as_str), Some("w1"));
        assert_eq!(DesktopEvent::WindowsUnfocused.window_id(), None);
    }
}
