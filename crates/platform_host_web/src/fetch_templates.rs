//! `fetch`-backed window-content template loader.

use platform_host::{TemplateFuture, TemplateLoader};

/// Loads templates over HTTP relative to a base URL.
#[derive(Debug, Clone, Default)]
pub struct FetchTemplateLoader {
    base_url: String,
}

impl FetchTemplateLoader {
    /// Creates a loader that resolves template paths against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Resolves `path` against the configured base URL.
    pub fn resolve(&self, path: &str) -> String {
        if self.base_url.is_empty() || path.contains("://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl TemplateLoader for FetchTemplateLoader {
    fn load_template<'a>(&'a self, path: &'a str) -> TemplateFuture<'a, Result<String, String>> {
        let url = self.resolve(path);
        Box::pin(async move { fetch_text(&url).await })
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch_text(url: &str) -> Result<String, String> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| format!("fetch `{url}` failed: {e:?}"))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|_| format!("fetch `{url}` returned a non-response value"))?;
    if !response.ok() {
        return Err(format!(
            "fetch `{url}` failed with status {}",
            response.status()
        ));
    }
    let body = response
        .text()
        .map_err(|e| format!("reading `{url}` failed: {e:?}"))?;
    let body = JsFuture::from(body)
        .await
        .map_err(|e| format!("reading `{url}` failed: {e:?}"))?;
    body.as_string()
        .ok_or_else(|| format!("template `{url}` body was not text"))
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_text(url: &str) -> Result<String, String> {
    Err(format!("fetch unavailable on this target: {url}"))
}
