//! The language detector

use crate::context::DetectionContext;
use crate::options::DetectorOptions;
use crate::strategies::{
    CookieStrategy, FragmentStrategy, HtmlTagStrategy, NavigatorStrategy, PathStrategy,
    QueryStrategy, SessionStrategy, StorageStrategy, SubdomainStrategy,
};
use crate::strategy::DetectionStrategy;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Walks an ordered list of detection strategies and persists resolved
/// choices through the configured caching strategies.
pub struct LanguageDetector {
    strategies: HashMap<&'static str, Box<dyn DetectionStrategy>>,
    order: Vec<String>,
    caches: Vec<String>,
    excluded: Vec<String>,
}

impl LanguageDetector {
    /// A detector with every built-in strategy registered and the default
    /// order: query parameter, cookie, durable store, navigator preferences
    pub fn new() -> Self {
        let mut detector = Self {
            strategies: HashMap::new(),
            order: vec![
                "query".to_string(),
                "cookie".to_string(),
                "storage".to_string(),
                "navigator".to_string(),
            ],
            caches: vec!["cookie".to_string(), "storage".to_string()],
            excluded: vec!["cimode".to_string()],
        };
        detector.add_detector(Box::new(QueryStrategy));
        detector.add_detector(Box::new(CookieStrategy));
        detector.add_detector(Box::new(StorageStrategy));
        detector.add_detector(Box::new(SessionStrategy));
        detector.add_detector(Box::new(PathStrategy));
        detector.add_detector(Box::new(FragmentStrategy));
        detector.add_detector(Box::new(SubdomainStrategy));
        detector.add_detector(Box::new(HtmlTagStrategy));
        detector.add_detector(Box::new(NavigatorStrategy));
        detector
    }

    /// Replace the strategy order
    pub fn with_order(mut self, order: Vec<String>) -> Self {
        self.order = order;
        self
    }

    /// Replace the list of persisting strategies
    pub fn with_caches(mut self, caches: Vec<String>) -> Self {
        self.caches = caches;
        self
    }

    /// Replace the set of languages that are never persisted
    pub fn with_excluded(mut self, excluded: Vec<String>) -> Self {
        self.excluded = excluded;
        self
    }

    /// Register a strategy, replacing any existing one with the same name
    pub fn add_detector(&mut self, strategy: Box<dyn DetectionStrategy>) {
        self.strategies.insert(strategy.name(), strategy);
    }

    /// Unregister a strategy by name
    pub fn remove_detector(&mut self, name: &str) {
        self.strategies.remove(name);
    }

    /// Resolve the preferred language.
    ///
    /// Strategies are consulted in the configured order; the first result
    /// contained in the supported set wins. When none match, the fallback
    /// language is returned.
    pub fn detect(&self, ctx: &DetectionContext, options: &DetectorOptions) -> String {
        for name in &self.order {
            let Some(strategy) = self.strategies.get(name.as_str()) else {
                trace!(strategy = %name, "Ordered strategy not registered, skipping");
                continue;
            };
            if let Some(candidate) = strategy.lookup(ctx, options) {
                if options.is_supported(&candidate) {
                    debug!(strategy = %name, language = %candidate, "Language detected");
                    return candidate;
                }
                trace!(
                    strategy = %name,
                    candidate = %candidate,
                    "Candidate not in supported set, continuing"
                );
            }
        }
        debug!(fallback = %options.fallback_language, "No strategy matched, using fallback");
        options.fallback_language.clone()
    }

    /// Persist a resolved language through the caching strategies.
    ///
    /// Excluded languages (e.g. the testing pseudo-locale) are never
    /// persisted.
    pub fn cache_language(&self, language: &str, ctx: &DetectionContext, options: &DetectorOptions) {
        if self.excluded.iter().any(|code| code == language) {
            debug!(language = %language, "Language excluded from persistence");
            return;
        }
        for name in &self.caches {
            if let Some(strategy) = self.strategies.get(name.as_str()) {
                strategy.cache_user_language(language, ctx, options);
            }
        }
    }

    /// Remove every persisted language choice.
    ///
    /// The cookie is expired with a zero max-age write rather than deleted
    /// client-side.
    pub fn clear_cache(&self, ctx: &DetectionContext, options: &DetectorOptions) {
        for name in &self.caches {
            if let Some(strategy) = self.strategies.get(name.as_str()) {
                strategy.clear(ctx, options);
            }
        }
    }
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Cookie, CookieStore, KeyValueStore};
    use url::Url;

    fn options() -> DetectorOptions {
        DetectorOptions::new(vec!["en".into(), "de".into(), "fr".into()], "en")
    }

    #[test]
    fn test_detect_falls_back_when_nothing_matches() {
        let detector = LanguageDetector::new();
        let ctx = DetectionContext::in_memory();
        assert_eq!(detector.detect(&ctx, &options()), "en");
    }

    #[test]
    fn test_detect_skips_unsupported_candidates() {
        let detector = LanguageDetector::new();
        let ctx = DetectionContext::in_memory()
            .with_url(Url::parse("https://app.example.com/?lang=ja").unwrap())
            .with_accept_languages(vec!["de".into()]);
        // Query yields "ja" (unsupported), navigator then yields "de"
        assert_eq!(detector.detect(&ctx, &options()), "de");
    }

    #[test]
    fn test_cache_language_writes_configured_stores() {
        let detector = LanguageDetector::new();
        let ctx = DetectionContext::in_memory();
        let opts = options();

        detector.cache_language("de", &ctx, &opts);
        assert_eq!(ctx.cookies.get("lingx-lang").unwrap(), Some("de".to_string()));
        assert_eq!(ctx.durable.get("lingx-lang").unwrap(), Some("de".to_string()));
        // Session is not in the default caches list
        assert_eq!(ctx.session.get("lingx-lang").unwrap(), None);
    }

    #[test]
    fn test_cache_language_skips_excluded() {
        let detector = LanguageDetector::new();
        let ctx = DetectionContext::in_memory();
        detector.cache_language("cimode", &ctx, &options());
        assert_eq!(ctx.cookies.get("lingx-lang").unwrap(), None);
        assert_eq!(ctx.durable.get("lingx-lang").unwrap(), None);
    }

    #[test]
    fn test_clear_cache_expires_cookie_and_storage() {
        let detector = LanguageDetector::new();
        let ctx = DetectionContext::in_memory();
        let opts = options();

        ctx.cookies.set(&Cookie::new("lingx-lang", "de", 3600)).unwrap();
        ctx.durable.set("lingx-lang", "de").unwrap();

        detector.clear_cache(&ctx, &opts);
        assert_eq!(ctx.cookies.get("lingx-lang").unwrap(), None);
        assert_eq!(ctx.durable.get("lingx-lang").unwrap(), None);
    }

    #[test]
    fn test_remove_detector() {
        let mut detector = LanguageDetector::new();
        let ctx = DetectionContext::in_memory()
            .with_url(Url::parse("https://app.example.com/?lang=de").unwrap());

        assert_eq!(detector.detect(&ctx, &options()), "de");
        detector.remove_detector("query");
        assert_eq!(detector.detect(&ctx, &options()), "en");
    }
}
