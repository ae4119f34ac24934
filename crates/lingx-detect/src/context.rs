//! The environment a detection run reads from

use crate::store::{CookieStore, KeyValueStore, MemoryCookieStore, MemoryStore};
use std::sync::Arc;
use url::Url;

/// Everything the strategies may consult: the current URL, the
/// browser-reported language preferences, the document language, and the
/// persistence primitives.
#[derive(Debug, Clone)]
pub struct DetectionContext {
    /// Current page URL (query, path, fragment, and subdomain sources)
    pub url: Option<Url>,
    /// Browser-reported language preferences, most preferred first
    pub accept_languages: Vec<String>,
    /// The `<html lang>` attribute, if any
    pub html_lang: Option<String>,
    /// Cookie jar
    pub cookies: Arc<dyn CookieStore>,
    /// Durable per-origin store
    pub durable: Arc<dyn KeyValueStore>,
    /// Ephemeral per-tab store
    pub session: Arc<dyn KeyValueStore>,
}

impl DetectionContext {
    /// A context backed entirely by in-memory stores
    pub fn in_memory() -> Self {
        Self {
            url: None,
            accept_languages: Vec::new(),
            html_lang: None,
            cookies: Arc::new(MemoryCookieStore::new()),
            durable: Arc::new(MemoryStore::new()),
            session: Arc::new(MemoryStore::new()),
        }
    }

    /// Set the current URL
    pub fn with_url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }

    /// Set the browser-reported language preferences
    pub fn with_accept_languages(mut self, languages: Vec<String>) -> Self {
        self.accept_languages = languages;
        self
    }

    /// Set the document language attribute
    pub fn with_html_lang(mut self, lang: impl Into<String>) -> Self {
        self.html_lang = Some(lang.into());
        self
    }
}

impl Default for DetectionContext {
    fn default() -> Self {
        Self::in_memory()
    }
}
