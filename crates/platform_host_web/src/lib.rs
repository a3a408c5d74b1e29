//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! On native targets every adapter compiles to an inert stand-in (empty prefs, failing fetch,
//! rejected themes) so the runtime can be built and tested without a browser.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod adapters;
pub mod fetch_templates;
pub mod storage;
pub mod theme;

pub use adapters::{prefs_store, template_loader, theme_engine};
pub use fetch_templates::FetchTemplateLoader;
pub use storage::local_prefs::{LocalStoragePrefs, DEFAULT_PREFS_NAMESPACE};
pub use theme::{DocumentThemeEngine, THEME_ATTRIBUTE};
