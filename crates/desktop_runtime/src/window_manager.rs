//! Window lifecycle orchestration.
//!
//! [`WindowManager`] is the only writer of [`WindowRegistry`]. Every public operation runs a
//! registry transition, releases the registry borrow, then applies the returned effects: surface
//! updates first, bus notifications after. Handlers reacting to those notifications may call back
//! into the manager.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use leptos::logging;
use platform_host::TemplateLoader;

use crate::{
    config::DesktopConfig,
    error::{DesktopError, RegistryError},
    event_bus::{EventBus, Subscription},
    events::{DesktopEvent, EventKind},
    model::{
        CreateWindowRequest, InteractionState, PointerPosition, ResizeEdge, WindowContent,
        WindowGeometry, WindowId, WindowRecord, WindowState,
    },
    registry::{RegistryEffect, Transition, WindowRegistry},
    shortcuts::{resolve_shortcut, KeyChord, ShortcutAction},
    surface::WindowSurface,
    task::spawn_detached,
};

struct Inner {
    bus: Rc<EventBus>,
    surface: Rc<dyn WindowSurface>,
    templates: Rc<dyn TemplateLoader>,
    config: RefCell<DesktopConfig>,
    registry: RefCell<WindowRegistry>,
}

/// Shared handle to the desktop's window state.
#[derive(Clone)]
pub struct WindowManager {
    inner: Rc<Inner>,
}

impl WindowManager {
    pub fn new(
        bus: Rc<EventBus>,
        surface: Rc<dyn WindowSurface>,
        templates: Rc<dyn TemplateLoader>,
        config: DesktopConfig,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                bus,
                surface,
                templates,
                config: RefCell::new(config),
                registry: RefCell::new(WindowRegistry::new()),
            }),
        }
    }

    pub fn bus(&self) -> Rc<EventBus> {
        self.inner.bus.clone()
    }

    pub fn config(&self) -> DesktopConfig {
        self.inner.config.borrow().clone()
    }

    /// Opens a window once its content is ready.
    ///
    /// Template content is loaded first; a failed load substitutes an inline error message and
    /// the window still opens. Nothing is registered, mounted, or published before the content
    /// resolves. The new window takes focus, then `windowCreated` is published, then the
    /// request's creation callback runs.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateWindow`] when the id is already open. Callers generate
    /// ids, so a collision is a caller bug; it is logged and the request is dropped.
    pub async fn create_window(
        &self,
        request: CreateWindowRequest,
    ) -> Result<WindowId, DesktopError> {
        self.reject_duplicate(&request.id)?;

        let content = self.resolve_content(&request.content).await;
        let record = self.build_record(&request);
        let id = record.id.clone();

        // Another create may have claimed the id while content was loading.
        self.reject_duplicate(&id)?;
        self.inner.registry.borrow_mut().insert(record.clone())?;
        self.inner.surface.mount_window(&record, &content);

        let focus = self.inner.registry.borrow_mut().focus(&id);
        self.apply_transition("create", focus);

        self.inner.bus.publish(DesktopEvent::WindowCreated {
            id: id.clone(),
            title: request.title.clone(),
            icon: request.icon.clone(),
        });
        if let Some(callback) = &request.on_window_created {
            callback.call(&id);
        }
        Ok(id)
    }

    pub fn focus_window(&self, id: &WindowId) -> bool {
        self.transition("focus", |registry| registry.focus(id))
    }

    /// Clears focus everywhere. Publishes one `windowsUnfocused` when a window was focused.
    pub fn unfocus_all_windows(&self) {
        let effects = self.inner.registry.borrow_mut().unfocus_all();
        self.apply(effects);
    }

    pub fn minimize_window(&self, id: &WindowId) -> bool {
        self.transition("minimize", |registry| registry.minimize(id))
    }

    pub fn restore_window(&self, id: &WindowId) -> bool {
        self.transition("restore", |registry| registry.restore(id))
    }

    /// Maximize toggle against the current viewport.
    pub fn maximize_window(&self, id: &WindowId) -> bool {
        let bounds = self.inner.config.borrow().maximized_geometry();
        self.transition("maximize", |registry| registry.toggle_maximize(id, bounds))
    }

    /// Removes the window. Focus is not moved to another window.
    pub fn close_window(&self, id: &WindowId) -> bool {
        self.transition("close", |registry| registry.remove(id))
    }

    pub fn rename_window(&self, id: &WindowId, title: impl Into<String>) -> bool {
        let title = title.into();
        self.transition("rename", |registry| registry.rename(id, title))
    }

    pub fn begin_drag(&self, id: &WindowId, pointer: PointerPosition) -> bool {
        self.transition("drag", |registry| registry.begin_drag(id, pointer))
    }

    pub fn drag_to(&self, pointer: PointerPosition) {
        let effect = self.inner.registry.borrow_mut().drag_to(pointer);
        self.apply(effect.into_iter().collect());
    }

    pub fn end_drag(&self) -> Option<WindowId> {
        self.inner.registry.borrow_mut().end_drag()
    }

    pub fn begin_resize(&self, id: &WindowId, edge: ResizeEdge, pointer: PointerPosition) -> bool {
        self.transition("resize", |registry| registry.begin_resize(id, edge, pointer))
    }

    pub fn resize_to(&self, pointer: PointerPosition) {
        let effect = self.inner.registry.borrow_mut().resize_to(pointer);
        self.apply(effect.into_iter().collect());
    }

    pub fn end_resize(&self) -> Option<WindowId> {
        self.inner.registry.borrow_mut().end_resize()
    }

    /// Runs a desktop keyboard shortcut. Returns `true` when the chord was consumed.
    pub fn handle_key(&self, chord: &KeyChord) -> bool {
        match resolve_shortcut(chord) {
            Some(ShortcutAction::CycleWindows) => {
                let target = self.inner.registry.borrow().next_cycle_target();
                match target {
                    Some(id) => self.focus_window(&id),
                    None => false,
                }
            }
            Some(ShortcutAction::UnfocusAll) => {
                self.unfocus_all_windows();
                true
            }
            None => false,
        }
    }

    /// Tracks a browser resize: later centering uses the new size and maximized windows refit.
    pub fn set_viewport(&self, width: i32, height: i32) {
        let bounds = {
            let mut config = self.inner.config.borrow_mut();
            config.set_viewport(width, height);
            config.maximized_geometry()
        };
        let effects = self.inner.registry.borrow_mut().refit_maximized(bounds);
        self.apply(effects);
    }

    /// Subscribes the manager to the window request channels.
    ///
    /// Handlers hold a weak handle, so the subscriptions do not keep the manager alive.
    pub fn install_request_handlers(&self) -> Vec<Subscription> {
        let bus = &self.inner.bus;
        let mut subs = Vec::new();

        let weak = self.downgrade();
        subs.push(Subscription {
            kind: EventKind::CreateWindow,
            id: bus.subscribe(EventKind::CreateWindow, move |event| {
                let (Some(manager), DesktopEvent::CreateWindow(request)) =
                    (WindowManager::upgrade(&weak), event)
                else {
                    return Ok(());
                };
                let request = request.clone();
                spawn_detached(async move {
                    // Duplicate ids are already logged inside `create_window`.
                    let _ = manager.create_window(request).await;
                });
                Ok(())
            }),
        });

        let forwards: [(EventKind, fn(&WindowManager, &WindowId) -> bool); 5] = [
            (EventKind::CloseWindow, WindowManager::close_window),
            (EventKind::FocusWindow, WindowManager::focus_window),
            (EventKind::MinimizeWindow, WindowManager::minimize_window),
            (EventKind::RestoreWindow, WindowManager::restore_window),
            (EventKind::MaximizeWindow, WindowManager::maximize_window),
        ];
        for (kind, op) in forwards {
            let weak = self.downgrade();
            let id = bus.subscribe(kind, move |event| {
                if let (Some(manager), Some(id)) = (WindowManager::upgrade(&weak), event.window_id())
                {
                    op(&manager, id);
                }
                Ok(())
            });
            subs.push(Subscription { kind, id });
        }
        subs
    }

    pub fn snapshot(&self, id: &WindowId) -> Option<WindowRecord> {
        self.inner.registry.borrow().get(id).cloned()
    }

    /// All windows in insertion order.
    pub fn windows(&self) -> Vec<WindowRecord> {
        self.inner.registry.borrow().windows().to_vec()
    }

    pub fn window_ids(&self) -> Vec<WindowId> {
        self.inner
            .registry
            .borrow()
            .windows()
            .iter()
            .map(|w| w.id.clone())
            .collect()
    }

    pub fn focused_window_id(&self) -> Option<WindowId> {
        self.inner.registry.borrow().focused_window_id().cloned()
    }

    pub fn window_count(&self) -> usize {
        self.inner.registry.borrow().len()
    }

    pub fn interaction(&self) -> InteractionState {
        self.inner.registry.borrow().interaction().clone()
    }

    fn downgrade(&self) -> Weak<Inner> {
        Rc::downgrade(&self.inner)
    }

    fn upgrade(weak: &Weak<Inner>) -> Option<WindowManager> {
        weak.upgrade().map(|inner| WindowManager { inner })
    }

    fn reject_duplicate(&self, id: &WindowId) -> Result<(), RegistryError> {
        if self.inner.registry.borrow().contains(id) {
            logging::error!("window manager: duplicate window id `{id}`; create ignored");
            return Err(RegistryError::DuplicateWindow(id.clone()));
        }
        Ok(())
    }

    async fn resolve_content(&self, content: &WindowContent) -> String {
        match content {
            WindowContent::Html(markup) => markup.clone(),
            WindowContent::Template(path) => {
                let templates = self.inner.templates.clone();
                match templates.load_template(path).await {
                    Ok(markup) => markup,
                    Err(err) => {
                        logging::warn!("window manager: template `{path}` failed to load: {err}");
                        error_placeholder(&err)
                    }
                }
            }
        }
    }

    fn build_record(&self, request: &CreateWindowRequest) -> WindowRecord {
        let config = self.inner.config.borrow();
        let min_width = request.min_width.unwrap_or(config.min_window_width);
        let min_height = request.min_height.unwrap_or(config.min_window_height);
        let width = request
            .width
            .unwrap_or(config.default_window_width)
            .max(min_width);
        let height = request
            .height
            .unwrap_or(config.default_window_height)
            .max(min_height);
        let (x, y) = if request.centered {
            config.centered_origin(width, height)
        } else {
            (request.x, request.y)
        };
        WindowRecord {
            id: request.id.clone(),
            title: request.title.clone(),
            icon: request.icon.clone(),
            geometry: WindowGeometry {
                x,
                y,
                width,
                height,
            },
            saved_geometry: None,
            z_index: 0,
            state: WindowState::Normal,
            is_focused: false,
            min_width,
            min_height,
            resizable: request.resizable,
            draggable: request.draggable,
        }
    }

    fn transition(&self, op: &str, f: impl FnOnce(&mut WindowRegistry) -> Transition) -> bool {
        let result = f(&mut self.inner.registry.borrow_mut());
        self.apply_transition(op, result)
    }

    fn apply_transition(&self, op: &str, result: Transition) -> bool {
        match result {
            Ok(effects) => {
                self.apply(effects);
                true
            }
            Err(err) => {
                logging::warn!("window manager: {op} ignored: {err}");
                false
            }
        }
    }

    fn apply(&self, effects: Vec<RegistryEffect>) {
        for effect in effects {
            match effect {
                RegistryEffect::Render(id) => {
                    if let Some(record) = self.snapshot(&id) {
                        self.inner.surface.render_window(&record);
                    }
                }
                RegistryEffect::Unmount(id) => self.inner.surface.unmount_window(&id),
                RegistryEffect::Focused(id) => {
                    self.inner.bus.publish(DesktopEvent::WindowFocused { id })
                }
                RegistryEffect::Minimized(id) => {
                    self.inner.bus.publish(DesktopEvent::WindowMinimized { id })
                }
                RegistryEffect::Restored(id) => {
                    self.inner.bus.publish(DesktopEvent::WindowRestored { id })
                }
                RegistryEffect::Closed(id) => {
                    self.inner.bus.publish(DesktopEvent::WindowClosed { id })
                }
                RegistryEffect::Renamed { id, title } => self
                    .inner
                    .bus
                    .publish(DesktopEvent::WindowRenamed { id, title }),
                RegistryEffect::Unfocused => self.inner.bus.publish(DesktopEvent::WindowsUnfocused),
            }
        }
    }
}

/// Inline body shown when a window's content could not be loaded. `message` is escaped.
pub fn error_placeholder(message: &str) -> String {
    format!("<div class=\"window-error\">Error: {}</div>", escape_html(message))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
