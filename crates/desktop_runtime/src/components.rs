//! Leptos view layer: the desktop shell, window chrome, dock, start menu, and desktop icons.
//!
//! Components never own desktop state. They draw the [`DesktopView`] signals that the runtime's
//! surfaces write, and forward pointer and keyboard input to the [`DesktopRuntime`] components.

mod dock;
mod launcher;
mod window;

use std::rc::Rc;

use leptos::*;

use self::{
    dock::Dock,
    launcher::{DesktopIconLayer, StartMenuPanel},
    window::DesktopWindow,
};
use crate::{
    config::DesktopConfig,
    event_bus::EventBus,
    launcher::register_app,
    model::{
        DesktopIcon, DockEntry, DockPosition, LauncherItem, PointerPosition, RegisteredApp,
        WindowId, WindowRecord,
    },
    runtime_context::{DesktopRuntime, HostServices},
    shortcuts::KeyChord,
    surface::{DockSurface, LauncherSurface, SurfaceSet, WindowSurface},
    task::spawn_detached,
};

/// A mounted window: its last rendered record plus the content resolved at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowView {
    pub record: WindowRecord,
    pub content: String,
}

/// Reactive copy of everything the surfaces were last asked to draw.
#[derive(Clone, Copy)]
pub struct DesktopView {
    pub windows: RwSignal<Vec<WindowView>>,
    pub dock: RwSignal<(DockPosition, Vec<DockEntry>)>,
    pub start_menu: RwSignal<(bool, Vec<LauncherItem>)>,
    pub icons: RwSignal<Vec<DesktopIcon>>,
}

impl DesktopView {
    pub fn new() -> Self {
        Self {
            windows: create_rw_signal(Vec::new()),
            dock: create_rw_signal((DockPosition::default(), Vec::new())),
            start_menu: create_rw_signal((false, Vec::new())),
            icons: create_rw_signal(Vec::new()),
        }
    }

    /// Surfaces that write into these signals, for [`HostServices::surface`].
    pub fn surface_set(self) -> SurfaceSet {
        SurfaceSet::shared(Rc::new(ViewSurface(self)))
    }
}

impl Default for DesktopView {
    fn default() -> Self {
        Self::new()
    }
}

struct ViewSurface(DesktopView);

impl WindowSurface for ViewSurface {
    fn mount_window(&self, record: &WindowRecord, content: &str) {
        self.0.windows.update(|windows| {
            windows.retain(|w| w.record.id != record.id);
            windows.push(WindowView {
                record: record.clone(),
                content: content.to_string(),
            });
        });
    }

    fn render_window(&self, record: &WindowRecord) {
        self.0.windows.update(|windows| {
            if let Some(window) = windows.iter_mut().find(|w| w.record.id == record.id) {
                window.record = record.clone();
            }
        });
    }

    fn unmount_window(&self, id: &WindowId) {
        self.0
            .windows
            .update(|windows| windows.retain(|w| w.record.id != *id));
    }
}

impl DockSurface for ViewSurface {
    fn render_dock(&self, position: DockPosition, entries: &[DockEntry]) {
        self.0.dock.set((position, entries.to_vec()));
    }
}

impl LauncherSurface for ViewSurface {
    fn render_start_menu(&self, open: bool, items: &[LauncherItem]) {
        self.0.start_menu.set((open, items.to_vec()));
    }

    fn render_desktop_icons(&self, icons: &[DesktopIcon]) {
        self.0.icons.set(icons.to_vec());
    }
}

/// Builds the launchers for a booted bus. Handlers usually capture the bus to publish
/// `createWindow`.
pub type AppCatalog = fn(Rc<EventBus>) -> Vec<RegisteredApp>;

/// Shared handle provided to every desktop component.
#[derive(Clone, Copy)]
pub struct DesktopContext {
    pub view: DesktopView,
    /// Flips once boot has finished and the apps are registered.
    pub ready: RwSignal<bool>,
    runtime: StoredValue<Option<Rc<DesktopRuntime>>>,
}

impl DesktopContext {
    /// Runs `f` against the booted runtime. Input that arrives before boot finishes is dropped.
    pub fn with_runtime<R>(self, f: impl FnOnce(&DesktopRuntime) -> R) -> Option<R> {
        let runtime = self.runtime.try_get_value().flatten()?;
        Some(f(&runtime))
    }
}

pub fn use_desktop() -> Option<DesktopContext> {
    use_context::<DesktopContext>()
}

#[component]
pub fn DesktopProvider(
    /// Host adapters. Their `surface` should come from `view`.
    services: HostServices,
    /// Signals the shell renders from.
    view: DesktopView,
    #[prop(optional)] config: Option<DesktopConfig>,
    #[prop(optional)] apps: Option<AppCatalog>,
    children: Children,
) -> impl IntoView {
    let desktop = DesktopContext {
        view,
        ready: create_rw_signal(false),
        runtime: store_value(None),
    };
    provide_context(desktop);

    let mut config = config.unwrap_or_default();
    if let Some((width, height)) = browser_viewport() {
        config.set_viewport(width, height);
    }

    spawn_detached(async move {
        let runtime = Rc::new(DesktopRuntime::boot(services, config).await);
        if let Some(apps) = apps {
            for app in apps(runtime.bus.clone()) {
                register_app(&runtime.bus, app);
            }
        }
        desktop.runtime.set_value(Some(runtime));
        desktop.ready.set(true);
    });

    on_cleanup(move || {
        desktop.with_runtime(|runtime| runtime.shutdown());
    });

    children()
}

#[component]
pub fn DesktopShell() -> impl IntoView {
    match use_desktop() {
        Some(desktop) => view! { <DesktopRoot desktop=desktop /> }.into_view(),
        None => {
            logging::error!("DesktopShell rendered outside DesktopProvider");
            ().into_view()
        }
    }
}

#[component]
fn DesktopRoot(desktop: DesktopContext) -> impl IntoView {
    let view = desktop.view;

    let keydown_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.default_prevented() {
            return;
        }
        let chord = KeyChord::from_keyboard_event(&ev);
        if desktop
            .with_runtime(|runtime| runtime.windows.handle_key(&chord))
            .unwrap_or(false)
        {
            ev.prevent_default();
        }
    });
    on_cleanup(move || keydown_listener.remove());

    let resize_listener = window_event_listener(ev::resize, move |_| {
        if let Some((width, height)) = browser_viewport() {
            desktop.with_runtime(|runtime| runtime.windows.set_viewport(width, height));
        }
    });
    on_cleanup(move || resize_listener.remove());

    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        let pointer = pointer_from_pointer_event(&ev);
        desktop.with_runtime(|runtime| {
            let interaction = runtime.windows.interaction();
            if interaction.dragging.is_some() {
                runtime.windows.drag_to(pointer);
            }
            if interaction.resizing.is_some() {
                runtime.windows.resize_to(pointer);
            }
            runtime.desktop_icons.drag_icon_to(pointer);
        });
    };
    let on_pointer_end = move |_: web_sys::PointerEvent| {
        desktop.with_runtime(end_active_pointer_interaction);
    };
    let on_backdrop_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        desktop.with_runtime(|runtime| {
            runtime.windows.unfocus_all_windows();
            runtime.start_menu.close();
        });
    };

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            data-dock-position=move || view.dock.with(|(position, _)| position.as_str())
            aria-busy=move || (!desktop.ready.get()).to_string()
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_end
            on:pointercancel=on_pointer_end
        >
            <div class="desktop-backdrop" on:pointerdown=on_backdrop_pointerdown />
            <DesktopIconLayer desktop=desktop />
            <div class="desktop-window-layer">
                <For
                    each=move || {
                        view.windows
                            .with(|windows| {
                                windows.iter().map(|w| w.record.id.clone()).collect::<Vec<_>>()
                            })
                    }
                    key=|id| id.clone()
                    let:window_id
                >
                    <DesktopWindow desktop=desktop window_id=window_id />
                </For>
            </div>
            <StartMenuPanel desktop=desktop />
            <Dock desktop=desktop />
        </div>
    }
}

fn end_active_pointer_interaction(runtime: &DesktopRuntime) {
    let interaction = runtime.windows.interaction();
    if interaction.dragging.is_some() {
        runtime.windows.end_drag();
    }
    if interaction.resizing.is_some() {
        runtime.windows.end_resize();
    }
    runtime.desktop_icons.end_icon_drag();
}

fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition::new(ev.client_x(), ev.client_y())
}

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    use wasm_bindgen::JsCast;

    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

#[cfg(target_arch = "wasm32")]
fn browser_viewport() -> Option<(i32, i32)> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some((width as i32, height as i32))
}

#[cfg(not(target_arch = "wasm32"))]
fn browser_viewport() -> Option<(i32, i32)> {
    None
}
