//! Theme selection relay.

use std::{cell::RefCell, rc::Rc};

use leptos::logging;
use platform_host::{PrefsStore, ThemeEngine};

use crate::{
    event_bus::EventBus,
    events::DesktopEvent,
    persistence::{save_or_warn, THEME_KEY},
    task::spawn_detached,
};

struct Inner {
    bus: Rc<EventBus>,
    engine: Rc<dyn ThemeEngine>,
    prefs: Rc<dyn PrefsStore>,
    current: RefCell<Option<String>>,
}

/// Forwards theme choices to the host theme engine and announces the outcome as `themeApplied`.
#[derive(Clone)]
pub struct ThemeController {
    inner: Rc<Inner>,
}

impl ThemeController {
    pub fn new(bus: Rc<EventBus>, engine: Rc<dyn ThemeEngine>, prefs: Rc<dyn PrefsStore>) -> Self {
        Self {
            inner: Rc::new(Inner {
                bus,
                engine,
                prefs,
                current: RefCell::new(None),
            }),
        }
    }

    /// Applies `theme_id`. The id is remembered and saved only when the engine accepts it.
    pub async fn apply_theme(&self, theme_id: &str) -> bool {
        let engine = self.inner.engine.clone();
        let applied = engine.apply_theme(theme_id).await;
        if applied {
            *self.inner.current.borrow_mut() = Some(theme_id.to_string());
            save_or_warn(self.inner.prefs.as_ref(), THEME_KEY, &theme_id).await;
        } else {
            logging::warn!("theme `{theme_id}` was not applied");
        }
        self.inner.bus.publish(DesktopEvent::ThemeApplied {
            theme_id: theme_id.to_string(),
            applied,
        });
        applied
    }

    /// Fire-and-forget variant for UI handlers.
    pub fn select_theme(&self, theme_id: impl Into<String>) {
        let controller = self.clone();
        let theme_id = theme_id.into();
        spawn_detached(async move {
            controller.apply_theme(&theme_id).await;
        });
    }

    pub fn current_theme(&self) -> Option<String> {
        self.inner.current.borrow().clone()
    }
}
