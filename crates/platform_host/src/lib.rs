//! Typed host-domain contracts shared by the desktop runtime and browser adapters.
//!
//! This crate is the boundary for the collaborators the window manager depends on but never
//! inspects: the preference key-value store, the window-content template loader, and the theme
//! engine. Concrete browser adapters live in `platform_host_web`; memory and no-op adapters here
//! back tests and non-browser targets.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;
pub mod templates;
pub mod theme;
pub mod time;

pub use storage::prefs::{
    load_pref_with, save_pref_with, MemoryPrefsStore, NoopPrefsStore, PrefsStore, PrefsStoreFuture,
};
pub use templates::{
    CachedTemplateLoader, MemoryTemplateLoader, NoopTemplateLoader, TemplateFuture, TemplateLoader,
};
pub use theme::{MemoryThemeEngine, NoopThemeEngine, ThemeEngine, ThemeFuture};
pub use time::{next_monotonic_timestamp_ms, next_window_token, unix_time_ms_now};
