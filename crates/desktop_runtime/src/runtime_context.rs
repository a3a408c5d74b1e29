//! Runtime assembly and lifecycle.
//!
//! [`DesktopRuntime::boot`] builds every desktop component from an injected [`HostServices`]
//! bundle, wires them to one [`EventBus`], and hydrates persisted preferences. There are no
//! ambient globals: whoever boots the runtime owns it and calls [`DesktopRuntime::shutdown`].

use std::{cell::RefCell, rc::Rc};

use leptos::logging;
use platform_host::{
    MemoryPrefsStore, NoopTemplateLoader, NoopThemeEngine, PrefsStore, TemplateLoader, ThemeEngine,
};

use crate::{
    config::DesktopConfig,
    dock::DockPresenter,
    event_bus::{EventBus, Subscription},
    launcher::{DesktopIcons, StartMenu},
    persistence::{load_dock_position, load_icon_positions, load_theme_id},
    surface::{HeadlessSurface, SurfaceSet},
    theme::ThemeController,
    window_manager::WindowManager,
};

/// Host collaborators injected at boot.
#[derive(Clone)]
pub struct HostServices {
    /// Preference key-value store.
    pub prefs: Rc<dyn PrefsStore>,
    /// Window content template source.
    pub templates: Rc<dyn TemplateLoader>,
    /// Visual theme engine.
    pub theme: Rc<dyn ThemeEngine>,
    /// Rendering seams.
    pub surface: SurfaceSet,
}

impl HostServices {
    /// In-memory services with a recording surface, for native builds and tests.
    pub fn headless() -> (Self, Rc<HeadlessSurface>) {
        let (surface, recorder) = SurfaceSet::headless();
        let services = Self {
            prefs: Rc::new(MemoryPrefsStore::default()),
            templates: Rc::new(NoopTemplateLoader),
            theme: Rc::new(NoopThemeEngine),
            surface,
        };
        (services, recorder)
    }

    /// Browser services: `localStorage` prefs, cached `fetch` templates under
    /// `template_base_url`, and the document theme engine. `surface` is usually
    /// [`crate::components::DesktopView::surface_set`].
    #[cfg(target_arch = "wasm32")]
    pub fn browser<I, S>(template_base_url: &str, themes: I, surface: SurfaceSet) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefs: platform_host_web::prefs_store(),
            templates: platform_host_web::template_loader(template_base_url),
            theme: platform_host_web::theme_engine(themes),
            surface,
        }
    }
}

/// The booted desktop: one bus and every component subscribed to it.
pub struct DesktopRuntime {
    pub bus: Rc<EventBus>,
    pub windows: WindowManager,
    pub dock: DockPresenter,
    pub start_menu: StartMenu,
    pub desktop_icons: DesktopIcons,
    pub theme: ThemeController,
    subscriptions: RefCell<Vec<Subscription>>,
}

impl DesktopRuntime {
    /// Builds and wires the desktop, restores saved preferences, and applies the saved theme
    /// (or the configured default).
    pub async fn boot(services: HostServices, config: DesktopConfig) -> Self {
        logging::log!("desktop runtime: booting");
        let prefs = services.prefs.clone();

        let dock_position = load_dock_position(prefs.as_ref())
            .await
            .unwrap_or(config.dock_position);
        let icon_positions = load_icon_positions(prefs.as_ref()).await;
        let theme_id = load_theme_id(prefs.as_ref())
            .await
            .unwrap_or_else(|| config.default_theme.clone());

        let bus = EventBus::new();
        let windows = WindowManager::new(
            bus.clone(),
            services.surface.windows.clone(),
            services.templates.clone(),
            config.clone(),
        );
        let dock = DockPresenter::new(
            bus.clone(),
            services.surface.dock.clone(),
            prefs.clone(),
            dock_position,
        );
        let start_menu = StartMenu::new(services.surface.launcher.clone());
        let desktop_icons = DesktopIcons::new(
            services.surface.launcher.clone(),
            prefs.clone(),
            config,
            icon_positions,
        );
        let theme = ThemeController::new(bus.clone(), services.theme.clone(), prefs);

        let mut subscriptions = windows.install_request_handlers();
        subscriptions.extend(dock.install());
        subscriptions.push(start_menu.install(&bus));
        subscriptions.push(desktop_icons.install(&bus));

        dock.render();
        start_menu.render();
        desktop_icons.render();
        theme.apply_theme(&theme_id).await;

        logging::log!("desktop runtime: ready ({} subscriptions)", subscriptions.len());
        Self {
            bus,
            windows,
            dock,
            start_menu,
            desktop_icons,
            theme,
            subscriptions: RefCell::new(subscriptions),
        }
    }

    /// Detaches every component from the bus. Open windows are left as they are.
    pub fn shutdown(&self) {
        let subscriptions = std::mem::take(&mut *self.subscriptions.borrow_mut());
        self.bus.release(&subscriptions);
        self.bus.clear();
        logging::log!("desktop runtime: shut down");
    }

    pub fn is_running(&self) -> bool {
        !self.subscriptions.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use platform_host::{MemoryPrefsStore, MemoryThemeEngine};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        events::{DesktopEvent, EventKind},
        model::{CreateWindowRequest, DockPosition, IconPosition, RegisteredApp},
        persistence::{DOCK_POSITION_KEY, ICON_POSITIONS_KEY, THEME_KEY},
    };

    #[test]
    fn boot_restores_saved_preferences() {
        let (mut services, surface) = HostServices::headless();
        services.prefs = Rc::new(MemoryPrefsStore::with_entries([
            (DOCK_POSITION_KEY, "\"right\""),
            (ICON_POSITIONS_KEY, r#"{"calc":{"x":300,"y":40}}"#),
            (THEME_KEY, "\"midnight\""),
        ]));
        let engine = MemoryThemeEngine::new(["classic", "midnight"]);
        services.theme = Rc::new(engine.clone());

        let runtime = block_on(DesktopRuntime::boot(services, DesktopConfig::default()));

        assert_eq!(runtime.dock.position(), DockPosition::Right);
        assert_eq!(surface.last_dock(), Some((DockPosition::Right, Vec::new())));
        assert_eq!(engine.applied(), vec!["midnight"]);
        assert_eq!(runtime.theme.current_theme().as_deref(), Some("midnight"));

        runtime
            .bus
            .publish(DesktopEvent::RegisterApp(RegisteredApp::new(
                "calc", "Calculator", "calc.svg", || {},
            )));
        assert_eq!(
            runtime.desktop_icons.position_of("calc"),
            Some(IconPosition { x: 300, y: 40 })
        );
    }

    #[test]
    fn boot_falls_back_to_config_defaults() {
        let (mut services, _) = HostServices::headless();
        let engine = MemoryThemeEngine::new(["classic"]);
        services.theme = Rc::new(engine.clone());
        let config = DesktopConfig {
            dock_position: DockPosition::Top,
            ..DesktopConfig::default()
        };

        let runtime = block_on(DesktopRuntime::boot(services, config));

        assert_eq!(runtime.dock.position(), DockPosition::Top);
        assert_eq!(engine.applied(), vec!["classic"]);
        assert!(runtime.is_running());
    }

    #[test]
    fn shutdown_detaches_everything() {
        let (services, _) = HostServices::headless();
        let runtime = block_on(DesktopRuntime::boot(services, DesktopConfig::default()));

        runtime.shutdown();
        runtime
            .bus
            .publish(DesktopEvent::CreateWindow(CreateWindowRequest::new("w1", "Calc")));

        assert!(!runtime.is_running());
        assert_eq!(runtime.windows.window_count(), 0);
        for kind in EventKind::ALL {
            assert_eq!(runtime.bus.subscriber_count(kind), 0);
        }
    }
}
