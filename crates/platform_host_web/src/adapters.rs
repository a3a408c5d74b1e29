//! Concrete adapter factories for runtime wiring.

use std::rc::Rc;

use platform_host::{CachedTemplateLoader, PrefsStore, TemplateLoader, ThemeEngine};

use crate::{DocumentThemeEngine, FetchTemplateLoader, LocalStoragePrefs};

/// Returns the browser preference store.
pub fn prefs_store() -> Rc<dyn PrefsStore> {
    Rc::new(LocalStoragePrefs::default())
}

/// Returns a caching `fetch` template loader rooted at `base_url`.
pub fn template_loader(base_url: &str) -> Rc<dyn TemplateLoader> {
    Rc::new(CachedTemplateLoader::new(Rc::new(FetchTemplateLoader::new(
        base_url,
    ))))
}

/// Returns the document theme engine accepting `themes`.
pub fn theme_engine<I, S>(themes: I) -> Rc<dyn ThemeEngine>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Rc::new(DocumentThemeEngine::new(themes))
}
