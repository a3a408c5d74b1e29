//! Dock/taskbar projection of open windows.
//!
//! The dock never reads the window registry. Its entries are rebuilt from lifecycle event
//! payloads alone, and clicks go back out as request events.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use leptos::logging;
use platform_host::PrefsStore;

use crate::{
    event_bus::{EventBus, Subscription},
    events::{DesktopEvent, EventKind},
    model::{DockEntry, DockPosition, WindowId},
    persistence::persist_dock_position,
    surface::DockSurface,
};

const DOCK_CHANNELS: [EventKind; 7] = [
    EventKind::WindowCreated,
    EventKind::WindowClosed,
    EventKind::WindowMinimized,
    EventKind::WindowRestored,
    EventKind::WindowFocused,
    EventKind::WindowRenamed,
    EventKind::WindowsUnfocused,
];

struct DockState {
    entries: Vec<DockEntry>,
    position: DockPosition,
}

struct Inner {
    bus: Rc<EventBus>,
    surface: Rc<dyn DockSurface>,
    prefs: Rc<dyn PrefsStore>,
    state: RefCell<DockState>,
}

#[derive(Clone)]
pub struct DockPresenter {
    inner: Rc<Inner>,
}

impl DockPresenter {
    pub fn new(
        bus: Rc<EventBus>,
        surface: Rc<dyn DockSurface>,
        prefs: Rc<dyn PrefsStore>,
        position: DockPosition,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                bus,
                surface,
                prefs,
                state: RefCell::new(DockState {
                    entries: Vec::new(),
                    position,
                }),
            }),
        }
    }

    /// Subscribes to window lifecycle notifications.
    pub fn install(&self) -> Vec<Subscription> {
        DOCK_CHANNELS
            .into_iter()
            .map(|kind| {
                let weak = Rc::downgrade(&self.inner);
                let id = self.inner.bus.subscribe(kind, move |event| {
                    if let Some(dock) = Self::upgrade(&weak) {
                        dock.apply_event(event);
                    }
                    Ok(())
                });
                Subscription { kind, id }
            })
            .collect()
    }

    /// Folds one lifecycle event into the projection and redraws when it changed anything.
    pub fn apply_event(&self, event: &DesktopEvent) {
        let changed = {
            let mut state = self.inner.state.borrow_mut();
            let entries = &mut state.entries;
            match event {
                DesktopEvent::WindowCreated { id, title, icon } => {
                    if entries.iter().any(|e| e.window_id == *id) {
                        false
                    } else {
                        // A new window is focused before it is announced.
                        for entry in entries.iter_mut() {
                            entry.focused = false;
                        }
                        entries.push(DockEntry {
                            window_id: id.clone(),
                            title: title.clone(),
                            icon: icon.clone(),
                            minimized: false,
                            focused: true,
                        });
                        true
                    }
                }
                DesktopEvent::WindowClosed { id } => {
                    let before = entries.len();
                    entries.retain(|e| e.window_id != *id);
                    entries.len() != before
                }
                DesktopEvent::WindowMinimized { id } => {
                    update_entry(entries, id, |entry| {
                        entry.minimized = true;
                        entry.focused = false;
                    })
                }
                DesktopEvent::WindowRestored { id } => {
                    update_entry(entries, id, |entry| entry.minimized = false)
                }
                DesktopEvent::WindowFocused { id } => {
                    for entry in entries.iter_mut() {
                        entry.focused = entry.window_id == *id;
                    }
                    true
                }
                DesktopEvent::WindowRenamed { id, title } => {
                    update_entry(entries, id, |entry| entry.title = title.clone())
                }
                DesktopEvent::WindowsUnfocused => {
                    let mut changed = false;
                    for entry in entries.iter_mut().filter(|e| e.focused) {
                        entry.focused = false;
                        changed = true;
                    }
                    changed
                }
                _ => false,
            }
        };
        if changed {
            self.render();
        }
    }

    /// Publishes `restoreWindow` for a minimized entry, `focusWindow` otherwise. Returns `false`
    /// for an unknown id.
    pub fn handle_dock_item_click(&self, id: &WindowId) -> bool {
        let Some(entry) = self.entry(id) else {
            logging::warn!("dock: click on unknown window `{id}` ignored");
            return false;
        };
        let request = if entry.minimized {
            DesktopEvent::RestoreWindow { id: id.clone() }
        } else {
            DesktopEvent::FocusWindow { id: id.clone() }
        };
        self.inner.bus.publish(request);
        true
    }

    /// Moves the dock to another screen edge and saves the preference.
    pub fn set_position(&self, position: DockPosition) {
        {
            let mut state = self.inner.state.borrow_mut();
            if state.position == position {
                return;
            }
            state.position = position;
        }
        logging::log!("dock: moved to {}", position.as_str());
        self.render();
        persist_dock_position(self.inner.prefs.clone(), position);
    }

    pub fn position(&self) -> DockPosition {
        self.inner.state.borrow().position
    }

    pub fn entries(&self) -> Vec<DockEntry> {
        self.inner.state.borrow().entries.clone()
    }

    pub fn entry(&self, id: &WindowId) -> Option<DockEntry> {
        self.inner
            .state
            .borrow()
            .entries
            .iter()
            .find(|e| e.window_id == *id)
            .cloned()
    }

    pub fn render(&self) {
        let (position, entries) = {
            let state = self.inner.state.borrow();
            (state.position, state.entries.clone())
        };
        self.inner.surface.render_dock(position, &entries);
    }

    fn upgrade(weak: &Weak<Inner>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }
}

fn update_entry(entries: &mut [DockEntry], id: &WindowId, f: impl FnOnce(&mut DockEntry)) -> bool {
    match entries.iter_mut().find(|e| e.window_id == *id) {
        Some(entry) => {
            f(entry);
            true
        }
        None => false,
    }
}
