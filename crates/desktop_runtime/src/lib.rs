//! Desktop shell runtime: window manager, event bus, dock, and app launchers.
//!
//! State flows one way. UI input reaches the [`WindowManager`], which mutates the
//! [`registry::WindowRegistry`] and announces each change on the [`EventBus`]. The dock and the
//! launchers keep their own projections built from those events and render through the
//! [`surface`] seams. In the browser those seams feed the leptos [`components`].

pub mod components;
pub mod config;
pub mod dock;
pub mod error;
pub mod event_bus;
pub mod events;
pub mod launcher;
pub mod model;
pub mod persistence;
pub mod registry;
pub mod runtime_context;
pub mod shortcuts;
pub mod surface;
pub mod task;
pub mod theme;
pub mod window_manager;

pub use components::{
    use_desktop, AppCatalog, DesktopContext, DesktopProvider, DesktopShell, DesktopView, WindowView,
};
pub use config::{DesktopConfig, IconGrid, Viewport};
pub use dock::DockPresenter;
pub use error::{DesktopError, HandlerError, RegistryError};
pub use event_bus::{EventBus, EventHandler, Subscription, SubscriptionId};
pub use events::{DesktopEvent, EventKind};
pub use launcher::{register_app, DesktopIcons, StartMenu};
pub use model::*;
pub use runtime_context::{DesktopRuntime, HostServices};
pub use shortcuts::{KeyChord, ShortcutAction};
pub use surface::{DockSurface, HeadlessSurface, LauncherSurface, SurfaceSet, WindowSurface};
pub use theme::ThemeController;
pub use window_manager::WindowManager;
