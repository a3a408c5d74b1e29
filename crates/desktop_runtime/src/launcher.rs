//! App launchers: start menu and desktop icons.
//!
//! Both views learn about apps only through `registerApp` events. Each keeps its own registered
//! id set, so repeated registrations of the same id are ignored per view, and each skips apps
//! not registered for its surface.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use leptos::logging;
use platform_host::PrefsStore;

use crate::{
    config::DesktopConfig,
    event_bus::{EventBus, Subscription},
    events::{DesktopEvent, EventKind},
    model::{
        DesktopIcon, DisplaySurface, IconPosition, LauncherItem, PointerPosition, RegisteredApp,
    },
    persistence::{persist_icon_positions, IconPositions},
    surface::LauncherSurface,
};

/// Announces an app to every launcher view.
pub fn register_app(bus: &EventBus, app: RegisteredApp) {
    bus.publish(DesktopEvent::RegisterApp(app));
}

fn find_app<'a>(apps: &'a [RegisteredApp], app_id: &str) -> Option<&'a RegisteredApp> {
    apps.iter().find(|app| app.id == app_id)
}

#[derive(Default)]
struct StartMenuState {
    open: bool,
    apps: Vec<RegisteredApp>,
}

struct StartMenuInner {
    surface: Rc<dyn LauncherSurface>,
    state: RefCell<StartMenuState>,
}

#[derive(Clone)]
pub struct StartMenu {
    inner: Rc<StartMenuInner>,
}

impl StartMenu {
    pub fn new(surface: Rc<dyn LauncherSurface>) -> Self {
        Self {
            inner: Rc::new(StartMenuInner {
                surface,
                state: RefCell::default(),
            }),
        }
    }

    pub fn install(&self, bus: &EventBus) -> Subscription {
        let weak: Weak<StartMenuInner> = Rc::downgrade(&self.inner);
        let id = bus.subscribe(EventKind::RegisterApp, move |event| {
            if let (Some(inner), DesktopEvent::RegisterApp(app)) = (weak.upgrade(), event) {
                StartMenu { inner }.register(app.clone());
            }
            Ok(())
        });
        Subscription {
            kind: EventKind::RegisterApp,
            id,
        }
    }

    /// Adds `app` to the menu. Returns `false` when it is already listed or not meant for the
    /// start menu.
    pub fn register(&self, app: RegisteredApp) -> bool {
        if !app.shows_on(DisplaySurface::StartMenu) {
            return false;
        }
        {
            let mut state = self.inner.state.borrow_mut();
            if find_app(&state.apps, &app.id).is_some() {
                return false;
            }
            state.apps.push(app);
        }
        self.render();
        true
    }

    pub fn open(&self) {
        self.set_open(true);
    }

    pub fn close(&self) {
        self.set_open(false);
    }

    pub fn toggle(&self) {
        let open = self.is_open();
        self.set_open(!open);
    }

    pub fn is_open(&self) -> bool {
        self.inner.state.borrow().open
    }

    pub fn items(&self) -> Vec<LauncherItem> {
        self.inner
            .state
            .borrow()
            .apps
            .iter()
            .map(|app| LauncherItem {
                app_id: app.id.clone(),
                name: app.name.clone(),
                icon: app.icon.clone(),
            })
            .collect()
    }

    /// Launches the app and closes the menu.
    pub fn activate(&self, app_id: &str) -> bool {
        let handler = find_app(&self.inner.state.borrow().apps, app_id).map(|a| a.handler.clone());
        let Some(handler) = handler else {
            logging::warn!("start menu: unknown app `{app_id}`");
            return false;
        };
        self.close();
        handler.invoke();
        true
    }

    pub fn render(&self) {
        let open = self.is_open();
        self.inner.surface.render_start_menu(open, &self.items());
    }

    fn set_open(&self, open: bool) {
        {
            let mut state = self.inner.state.borrow_mut();
            if state.open == open {
                return;
            }
            state.open = open;
        }
        self.render();
    }
}

#[derive(Debug, Clone)]
struct IconDrag {
    app_id: String,
    pointer_start: PointerPosition,
    origin: IconPosition,
}

#[derive(Default)]
struct IconState {
    apps: Vec<RegisteredApp>,
    saved: IconPositions,
    drag: Option<IconDrag>,
}

struct IconsInner {
    surface: Rc<dyn LauncherSurface>,
    prefs: Rc<dyn PrefsStore>,
    config: DesktopConfig,
    state: RefCell<IconState>,
}

#[derive(Clone)]
pub struct DesktopIcons {
    inner: Rc<IconsInner>,
}

impl DesktopIcons {
    /// `saved` holds positions persisted by earlier sessions, keyed by app id.
    pub fn new(
        surface: Rc<dyn LauncherSurface>,
        prefs: Rc<dyn PrefsStore>,
        config: DesktopConfig,
        saved: IconPositions,
    ) -> Self {
        Self {
            inner: Rc::new(IconsInner {
                surface,
                prefs,
                config,
                state: RefCell::new(IconState {
                    saved,
                    ..IconState::default()
                }),
            }),
        }
    }

    pub fn install(&self, bus: &EventBus) -> Subscription {
        let weak: Weak<IconsInner> = Rc::downgrade(&self.inner);
        let id = bus.subscribe(EventKind::RegisterApp, move |event| {
            if let (Some(inner), DesktopEvent::RegisterApp(app)) = (weak.upgrade(), event) {
                DesktopIcons { inner }.register(app.clone());
            }
            Ok(())
        });
        Subscription {
            kind: EventKind::RegisterApp,
            id,
        }
    }

    /// Places an icon for `app`. Returns `false` for a repeated id or a start-menu-only app.
    pub fn register(&self, app: RegisteredApp) -> bool {
        if !app.shows_on(DisplaySurface::Desktop) {
            return false;
        }
        {
            let mut state = self.inner.state.borrow_mut();
            if find_app(&state.apps, &app.id).is_some() {
                return false;
            }
            state.apps.push(app);
        }
        self.render();
        true
    }

    pub fn icons(&self) -> Vec<DesktopIcon> {
        let state = self.inner.state.borrow();
        state
            .apps
            .iter()
            .enumerate()
            .map(|(index, app)| DesktopIcon {
                app_id: app.id.clone(),
                name: app.name.clone(),
                icon: app.icon.clone(),
                position: self.resolve_position(&state.saved, index, &app.id),
            })
            .collect()
    }

    pub fn position_of(&self, app_id: &str) -> Option<IconPosition> {
        let state = self.inner.state.borrow();
        let index = state.apps.iter().position(|app| app.id == app_id)?;
        Some(self.resolve_position(&state.saved, index, app_id))
    }

    /// Column-major grid slot for the icon at `index`.
    pub fn grid_position(&self, index: usize) -> IconPosition {
        let grid = self.inner.config.icon_grid;
        let rows = self.inner.config.icon_rows().max(1) as usize;
        let column = (index / rows) as i32;
        let row = (index % rows) as i32;
        IconPosition {
            x: grid.margin + column * grid.cell_width,
            y: grid.margin + row * grid.cell_height,
        }
    }

    pub fn begin_icon_drag(&self, app_id: &str, pointer: PointerPosition) -> bool {
        let Some(origin) = self.position_of(app_id) else {
            return false;
        };
        self.inner.state.borrow_mut().drag = Some(IconDrag {
            app_id: app_id.to_string(),
            pointer_start: pointer,
            origin,
        });
        true
    }

    pub fn drag_icon_to(&self, pointer: PointerPosition) {
        {
            let mut state = self.inner.state.borrow_mut();
            let Some(drag) = state.drag.clone() else {
                return;
            };
            let position = IconPosition {
                x: drag.origin.x + pointer.x - drag.pointer_start.x,
                y: drag.origin.y + pointer.y - drag.pointer_start.y,
            };
            state.saved.insert(drag.app_id, position);
        }
        self.render();
    }

    /// Ends the drag and saves every icon position.
    pub fn end_icon_drag(&self) -> Option<String> {
        let drag = self.inner.state.borrow_mut().drag.take()?;
        self.persist();
        Some(drag.app_id)
    }

    /// Double-click launch.
    pub fn activate(&self, app_id: &str) -> bool {
        let handler = find_app(&self.inner.state.borrow().apps, app_id).map(|a| a.handler.clone());
        match handler {
            Some(handler) => {
                handler.invoke();
                true
            }
            None => {
                logging::warn!("desktop icons: unknown app `{app_id}`");
                false
            }
        }
    }

    /// Drops the icon and forgets its saved position. A later registration starts from the grid.
    pub fn remove_desktop_icon(&self, app_id: &str) -> bool {
        let removed = {
            let mut state = self.inner.state.borrow_mut();
            let before = state.apps.len();
            state.apps.retain(|app| app.id != app_id);
            let had_position = state.saved.remove(app_id).is_some();
            if state.drag.as_ref().is_some_and(|d| d.app_id == app_id) {
                state.drag = None;
            }
            if had_position || state.apps.len() != before {
                Some(had_position)
            } else {
                None
            }
        };
        let Some(had_position) = removed else {
            return false;
        };
        if had_position {
            self.persist();
        }
        self.render();
        true
    }

    pub fn saved_positions(&self) -> IconPositions {
        self.inner.state.borrow().saved.clone()
    }

    pub fn render(&self) {
        self.inner.surface.render_desktop_icons(&self.icons());
    }

    fn resolve_position(&self, saved: &IconPositions, index: usize, app_id: &str) -> IconPosition {
        saved
            .get(app_id)
            .copied()
            .unwrap_or_else(|| self.grid_position(index))
    }

    fn persist(&self) {
        persist_icon_positions(self.inner.prefs.clone(), self.saved_positions());
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use futures::executor::block_on;
    use platform_host::MemoryPrefsStore;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{persistence::load_icon_positions, surface::HeadlessSurface};

    fn app(id: &str, surfaces: &[DisplaySurface]) -> RegisteredApp {
        RegisteredApp::new(id, id.to_uppercase(), format!("{id}.svg"), || {})
            .on_surfaces(surfaces.iter().copied())
    }

    fn both(id: &str) -> RegisteredApp {
        app(id, &[DisplaySurface::Desktop, DisplaySurface::StartMenu])
    }

    fn icons_with(prefs: &MemoryPrefsStore, saved: IconPositions) -> (DesktopIcons, Rc<HeadlessSurface>) {
        let surface = Rc::new(HeadlessSurface::default());
        let icons = DesktopIcons::new(
            surface.clone(),
            Rc::new(prefs.clone()),
            DesktopConfig::default(),
            saved,
        );
        (icons, surface)
    }

    #[test]
    fn repeated_registration_is_ignored_per_view() {
        let bus = EventBus::new();
        let surface = Rc::new(HeadlessSurface::default());
        let menu = StartMenu::new(surface.clone());
        let (icons, _) = icons_with(&MemoryPrefsStore::default(), IconPositions::new());
        menu.install(&bus);
        icons.install(&bus);

        for _ in 0..3 {
            register_app(&bus, both("calc"));
        }

        assert_eq!(menu.items().len(), 1);
        assert_eq!(icons.icons().len(), 1);
    }

    #[test]
    fn surfaces_filter_registrations() {
        let bus = EventBus::new();
        let surface = Rc::new(HeadlessSurface::default());
        let menu = StartMenu::new(surface.clone());
        let (icons, _) = icons_with(&MemoryPrefsStore::default(), IconPositions::new());
        menu.install(&bus);
        icons.install(&bus);

        register_app(&bus, app("settings", &[DisplaySurface::StartMenu]));
        register_app(&bus, app("trash", &[DisplaySurface::Desktop]));

        let menu_ids: Vec<_> = menu.items().into_iter().map(|i| i.app_id).collect();
        let icon_ids: Vec<_> = icons.icons().into_iter().map(|i| i.app_id).collect();
        assert_eq!(menu_ids, vec!["settings"]);
        assert_eq!(icon_ids, vec!["trash"]);
    }

    #[test]
    fn start_menu_activation_launches_and_closes() {
        let surface = Rc::new(HeadlessSurface::default());
        let menu = StartMenu::new(surface.clone());
        let launched = Rc::new(Cell::new(0));
        let counter = launched.clone();
        menu.register(RegisteredApp::new("calc", "Calculator", "calc.svg", move || {
            counter.set(counter.get() + 1)
        }));

        menu.toggle();
        assert!(menu.is_open());
        assert!(menu.activate("calc"));
        assert!(!menu.activate("missing"));

        assert_eq!(launched.get(), 1);
        assert!(!menu.is_open());
        assert_eq!(surface.last_start_menu().map(|(open, _)| open), Some(false));
    }

    #[test]
    fn icons_fill_grid_column_major() {
        let (icons, _) = icons_with(&MemoryPrefsStore::default(), IconPositions::new());
        // Default viewport fits 7 rows: (800 - 48 - 20) / 100.
        for i in 0..8 {
            icons.register(both(&format!("app{i}")));
        }

        assert_eq!(icons.position_of("app0"), Some(IconPosition { x: 20, y: 20 }));
        assert_eq!(icons.position_of("app6"), Some(IconPosition { x: 20, y: 620 }));
        assert_eq!(icons.position_of("app7"), Some(IconPosition { x: 110, y: 20 }));
        assert_eq!(icons.position_of("ghost"), None);
    }

    #[test]
    fn saved_position_wins_over_grid() {
        let saved = [("calc".to_string(), IconPosition { x: 500, y: 300 })]
            .into_iter()
            .collect();
        let (icons, _) = icons_with(&MemoryPrefsStore::default(), saved);
        icons.register(both("calc"));
        assert_eq!(icons.position_of("calc"), Some(IconPosition { x: 500, y: 300 }));
    }

    #[test]
    fn drag_moves_icon_and_persists_on_release() {
        let prefs = MemoryPrefsStore::default();
        let (icons, surface) = icons_with(&prefs, IconPositions::new());
        icons.register(both("calc"));

        assert!(icons.begin_icon_drag("calc", PointerPosition::new(30, 30)));
        icons.drag_icon_to(PointerPosition::new(130, 80));
        assert!(prefs.is_empty());
        assert_eq!(icons.end_icon_drag(), Some("calc".to_string()));

        let expected = IconPosition { x: 120, y: 70 };
        assert_eq!(icons.position_of("calc"), Some(expected));
        assert_eq!(block_on(load_icon_positions(&prefs)).get("calc"), Some(&expected));
        assert_eq!(
            surface.last_desktop_icons().map(|icons| icons[0].position),
            Some(expected)
        );
    }

    #[test]
    fn removing_an_icon_forgets_its_position() {
        let prefs = MemoryPrefsStore::default();
        let saved = [("calc".to_string(), IconPosition { x: 500, y: 300 })]
            .into_iter()
            .collect();
        let (icons, _) = icons_with(&prefs, saved);
        icons.register(both("calc"));

        assert!(icons.remove_desktop_icon("calc"));
        assert!(!icons.remove_desktop_icon("calc"));
        assert!(icons.icons().is_empty());
        assert!(block_on(load_icon_positions(&prefs)).is_empty());

        icons.register(both("calc"));
        assert_eq!(icons.position_of("calc"), Some(IconPosition { x: 20, y: 20 }));
    }

    #[test]
    fn icon_activation_invokes_handler() {
        let (icons, _) = icons_with(&MemoryPrefsStore::default(), IconPositions::new());
        let launched = Rc::new(Cell::new(false));
        let flag = launched.clone();
        icons.register(RegisteredApp::new("calc", "Calculator", "calc.svg", move || {
            flag.set(true)
        }));

        assert!(icons.activate("calc"));
        assert!(launched.get());
        assert!(!icons.activate("missing"));
    }
}
