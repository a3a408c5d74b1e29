//! Theme engine contracts.
//!
//! The desktop runtime only asks a theme engine to apply a theme id and relays the outcome; how
//! a theme is materialized (CSS variables, stylesheet swaps) stays behind this boundary.

use std::{cell::RefCell, collections::BTreeSet, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`ThemeEngine`] async methods.
pub type ThemeFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service that applies a named visual theme.
pub trait ThemeEngine {
    /// Applies `theme_id`, resolving to `true` when the theme is now active.
    fn apply_theme<'a>(&'a self, theme_id: &'a str) -> ThemeFuture<'a, bool>;
}

/// Theme engine for hosts without styling support. Reports every apply as unsuccessful.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopThemeEngine;

impl ThemeEngine for NoopThemeEngine {
    fn apply_theme<'a>(&'a self, _theme_id: &'a str) -> ThemeFuture<'a, bool> {
        Box::pin(async { false })
    }
}

/// In-memory theme engine that accepts a fixed set of theme ids and records apply calls.
#[derive(Debug, Clone, Default)]
pub struct MemoryThemeEngine {
    known: Rc<BTreeSet<String>>,
    applied: Rc<RefCell<Vec<String>>>,
}

impl MemoryThemeEngine {
    /// Creates an engine that accepts the given theme ids.
    pub fn new<I, S>(themes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: Rc::new(themes.into_iter().map(Into::into).collect()),
            applied: Rc::default(),
        }
    }

    /// Theme ids successfully applied, in order.
    pub fn applied(&self) -> Vec<String> {
        self.applied.borrow().clone()
    }

    /// Most recently applied theme id.
    pub fn current(&self) -> Option<String> {
        self.applied.borrow().last().cloned()
    }
}

impl ThemeEngine for MemoryThemeEngine {
    fn apply_theme<'a>(&'a self, theme_id: &'a str) -> ThemeFuture<'a, bool> {
        Box::pin(async move {
            if !self.known.contains(theme_id) {
                return false;
            }
            self.applied.borrow_mut().push(theme_id.to_string());
            true
        })
    }
}
