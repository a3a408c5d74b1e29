//! Window-content template loading contracts and adapters.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`TemplateLoader`] async methods.
pub type TemplateFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service that resolves a template path into markup text.
pub trait TemplateLoader {
    /// Loads the template stored at `path`.
    fn load_template<'a>(&'a self, path: &'a str) -> TemplateFuture<'a, Result<String, String>>;
}

/// Template loader for hosts without a template source. Every load fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTemplateLoader;

impl TemplateLoader for NoopTemplateLoader {
    fn load_template<'a>(&'a self, path: &'a str) -> TemplateFuture<'a, Result<String, String>> {
        Box::pin(async move { Err(format!("no template source for `{path}`")) })
    }
}

/// In-memory template loader keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplateLoader {
    templates: Rc<RefCell<HashMap<String, String>>>,
    loads: Rc<RefCell<Vec<String>>>,
}

impl MemoryTemplateLoader {
    /// Registers (or replaces) template text for `path`.
    pub fn insert(&self, path: impl Into<String>, markup: impl Into<String>) {
        self.templates
            .borrow_mut()
            .insert(path.into(), markup.into());
    }

    /// Paths requested so far, in request order.
    pub fn requested_paths(&self) -> Vec<String> {
        self.loads.borrow().clone()
    }
}

impl TemplateLoader for MemoryTemplateLoader {
    fn load_template<'a>(&'a self, path: &'a str) -> TemplateFuture<'a, Result<String, String>> {
        Box::pin(async move {
            self.loads.borrow_mut().push(path.to_string());
            self.templates
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| format!("template not found: {path}"))
        })
    }
}

/// Fetch-once wrapper that memoizes successful loads of an inner [`TemplateLoader`].
///
/// Failures are not cached so a later open can retry.
#[derive(Clone)]
pub struct CachedTemplateLoader {
    inner: Rc<dyn TemplateLoader>,
    cache: Rc<RefCell<HashMap<String, String>>>,
}

impl CachedTemplateLoader {
    /// Wraps `inner` with an empty cache.
    pub fn new(inner: Rc<dyn TemplateLoader>) -> Self {
        Self {
            inner,
            cache: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Returns whether `path` is already cached.
    pub fn is_cached(&self, path: &str) -> bool {
        self.cache.borrow().contains_key(path)
    }

    /// Drops every cached template.
    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
    }
}

impl TemplateLoader for CachedTemplateLoader {
    fn load_template<'a>(&'a self, path: &'a str) -> TemplateFuture<'a, Result<String, String>> {
        Box::pin(async move {
            let cached = self.cache.borrow().get(path).cloned();
            if let Some(markup) = cached {
                return Ok(markup);
            }
            let markup = self.inner.load_template(path).await?;
            self.cache
                .borrow_mut()
                .insert(path.to_string(), markup.clone());
            Ok(markup)
        })
    }
}
