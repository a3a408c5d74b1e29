//! Document-attribute theme engine.

use std::collections::BTreeSet;

use platform_host::{ThemeEngine, ThemeFuture};

/// Attribute set on `<html>` to select the active stylesheet rules.
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Applies a theme by writing its id to the root element's [`THEME_ATTRIBUTE`].
///
/// Stylesheets own what a theme looks like; this engine only accepts ids it was built with.
/// On native targets every apply reports `false`.
#[derive(Debug, Clone, Default)]
pub struct DocumentThemeEngine {
    themes: BTreeSet<String>,
}

impl DocumentThemeEngine {
    /// Creates an engine that accepts the given theme ids.
    pub fn new<I, S>(themes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            themes: themes.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns whether `theme_id` is one of the accepted ids.
    pub fn knows(&self, theme_id: &str) -> bool {
        self.themes.contains(theme_id)
    }
}

impl ThemeEngine for DocumentThemeEngine {
    fn apply_theme<'a>(&'a self, theme_id: &'a str) -> ThemeFuture<'a, bool> {
        Box::pin(async move {
            if !self.knows(theme_id) {
                return false;
            }
            #[cfg(target_arch = "wasm32")]
            {
                let Some(root) = web_sys::window()
                    .and_then(|window| window.document())
                    .and_then(|document| document.document_element())
                else {
                    return false;
                };
                root.set_attribute(THEME_ATTRIBUTE, theme_id).is_ok()
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                false
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn unknown_and_native_applies_report_false() {
        let engine = DocumentThemeEngine::new(["classic"]);
        assert!(engine.knows("classic"));
        assert!(!block_on(engine.apply_theme("neon")));
        assert!(!block_on(engine.apply_theme("classic")));
    }
}
