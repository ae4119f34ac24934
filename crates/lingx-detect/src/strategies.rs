//! The built-in detection strategies

use crate::context::DetectionContext;
use crate::options::DetectorOptions;
use crate::store::Cookie;
use crate::strategy::DetectionStrategy;
use tracing::warn;

/// `?lang=de` style query parameter
pub struct QueryStrategy;

impl DetectionStrategy for QueryStrategy {
    fn name(&self) -> &'static str {
        "query"
    }

    fn lookup(&self, ctx: &DetectionContext, options: &DetectorOptions) -> Option<String> {
        let url = ctx.url.as_ref()?;
        url.query_pairs()
            .find(|(key, _)| key == options.query_param.as_str())
            .map(|(_, value)| value.into_owned())
    }
}

/// The language cookie
pub struct CookieStrategy;

impl DetectionStrategy for CookieStrategy {
    fn name(&self) -> &'static str {
        "cookie"
    }

    fn lookup(&self, ctx: &DetectionContext, options: &DetectorOptions) -> Option<String> {
        match ctx.cookies.get(&options.cookie_name) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "Cookie read failed, treating as unset");
                None
            }
        }
    }

    fn cache_user_language(
        &self,
        language: &str,
        ctx: &DetectionContext,
        options: &DetectorOptions,
    ) {
        let cookie = Cookie::new(&options.cookie_name, language, options.cookie_max_age)
            .with_domain(options.cookie_domain.clone());
        if let Err(err) = ctx.cookies.set(&cookie) {
            warn!(error = %err, "Cookie write failed, language not persisted");
        }
    }

    fn clear(&self, ctx: &DetectionContext, options: &DetectorOptions) {
        // Expire with zero max-age; a plain delete could resurrect on a
        // stale client
        let expiry = Cookie::expired(&options.cookie_name, options.cookie_domain.clone());
        if let Err(err) = ctx.cookies.set(&expiry) {
            warn!(error = %err, "Cookie expiry failed");
        }
    }
}

/// The durable per-origin store
pub struct StorageStrategy;

impl DetectionStrategy for StorageStrategy {
    fn name(&self) -> &'static str {
        "storage"
    }

    fn lookup(&self, ctx: &DetectionContext, options: &DetectorOptions) -> Option<String> {
        match ctx.durable.get(&options.storage_key) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "Durable store read failed, treating as unset");
                None
            }
        }
    }

    fn cache_user_language(
        &self,
        language: &str,
        ctx: &DetectionContext,
        options: &DetectorOptions,
    ) {
        if let Err(err) = ctx.durable.set(&options.storage_key, language) {
            warn!(error = %err, "Durable store write failed, language not persisted");
        }
    }

    fn clear(&self, ctx: &DetectionContext, options: &DetectorOptions) {
        if let Err(err) = ctx.durable.remove(&options.storage_key) {
            warn!(error = %err, "Durable store removal failed");
        }
    }
}

/// The ephemeral per-tab store
pub struct SessionStrategy;

impl DetectionStrategy for SessionStrategy {
    fn name(&self) -> &'static str {
        "session"
    }

    fn lookup(&self, ctx: &DetectionContext, options: &DetectorOptions) -> Option<String> {
        match ctx.session.get(&options.storage_key) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "Per-tab store read failed, treating as unset");
                None
            }
        }
    }

    fn cache_user_language(
        &self,
        language: &str,
        ctx: &DetectionContext,
        options: &DetectorOptions,
    ) {
        if let Err(err) = ctx.session.set(&options.storage_key, language) {
            warn!(error = %err, "Per-tab store write failed, language not persisted");
        }
    }

    fn clear(&self, ctx: &DetectionContext, options: &DetectorOptions) {
        if let Err(err) = ctx.session.remove(&options.storage_key) {
            warn!(error = %err, "Per-tab store removal failed");
        }
    }
}

/// First URL path segment (`/de/page`)
pub struct PathStrategy;

impl DetectionStrategy for PathStrategy {
    fn name(&self) -> &'static str {
        "path"
    }

    fn lookup(&self, ctx: &DetectionContext, _options: &DetectorOptions) -> Option<String> {
        let url = ctx.url.as_ref()?;
        url.path_segments()?
            .find(|segment| !segment.is_empty())
            .map(str::to_string)
    }
}

/// `#lang=de` style fragment parameter
pub struct FragmentStrategy;

impl DetectionStrategy for FragmentStrategy {
    fn name(&self) -> &'static str {
        "fragment"
    }

    fn lookup(&self, ctx: &DetectionContext, options: &DetectorOptions) -> Option<String> {
        let fragment = ctx.url.as_ref()?.fragment()?;
        url::form_urlencoded::parse(fragment.as_bytes())
            .find(|(key, _)| key == options.query_param.as_str())
            .map(|(_, value)| value.into_owned())
    }
}

/// Leading subdomain label (`de.example.com`)
pub struct SubdomainStrategy;

impl DetectionStrategy for SubdomainStrategy {
    fn name(&self) -> &'static str {
        "subdomain"
    }

    fn lookup(&self, ctx: &DetectionContext, _options: &DetectorOptions) -> Option<String> {
        let host = ctx.url.as_ref()?.host_str()?;
        let labels: Vec<&str> = host.split('.').collect();
        if labels.len() < 3 {
            return None;
        }
        let label = labels[0];
        if label.is_empty() || label.eq_ignore_ascii_case("www") {
            None
        } else {
            Some(label.to_string())
        }
    }
}

/// The `<html lang>` attribute; read-only, never persisted
pub struct HtmlTagStrategy;

impl DetectionStrategy for HtmlTagStrategy {
    fn name(&self) -> &'static str {
        "html-tag"
    }

    fn lookup(&self, ctx: &DetectionContext, _options: &DetectorOptions) -> Option<String> {
        ctx.html_lang.clone()
    }
}

/// Browser-reported language preferences.
///
/// Region-qualified tags are normalized: `en-US` first tries the exact
/// tag against the supported set, then the bare `en` subtag.
pub struct NavigatorStrategy;

impl DetectionStrategy for NavigatorStrategy {
    fn name(&self) -> &'static str {
        "navigator"
    }

    fn lookup(&self, ctx: &DetectionContext, options: &DetectorOptions) -> Option<String> {
        for tag in &ctx.accept_languages {
            if options.is_supported(tag) {
                return Some(tag.clone());
            }
            if let Some((base, _)) = tag.split_once('-') {
                if options.is_supported(base) {
                    return Some(base.to_string());
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn options() -> DetectorOptions {
        DetectorOptions::new(vec!["en".into(), "de".into(), "fr".into()], "en")
    }

    fn ctx_with_url(url: &str) -> DetectionContext {
        DetectionContext::in_memory().with_url(Url::parse(url).unwrap())
    }

    #[test]
    fn test_query_lookup() {
        let ctx = ctx_with_url("https://app.example.com/page?lang=de&x=1");
        assert_eq!(QueryStrategy.lookup(&ctx, &options()), Some("de".to_string()));

        let ctx = ctx_with_url("https://app.example.com/page");
        assert_eq!(QueryStrategy.lookup(&ctx, &options()), None);
    }

    #[test]
    fn test_path_lookup() {
        let ctx = ctx_with_url("https://app.example.com/fr/dashboard");
        assert_eq!(PathStrategy.lookup(&ctx, &options()), Some("fr".to_string()));
    }

    #[test]
    fn test_fragment_lookup() {
        let ctx = ctx_with_url("https://app.example.com/page#lang=fr");
        assert_eq!(FragmentStrategy.lookup(&ctx, &options()), Some("fr".to_string()));
    }

    #[test]
    fn test_subdomain_lookup() {
        let ctx = ctx_with_url("https://de.example.com/");
        assert_eq!(SubdomainStrategy.lookup(&ctx, &options()), Some("de".to_string()));

        let ctx = ctx_with_url("https://www.example.com/");
        assert_eq!(SubdomainStrategy.lookup(&ctx, &options()), None);

        let ctx = ctx_with_url("https://example.com/");
        assert_eq!(SubdomainStrategy.lookup(&ctx, &options()), None);
    }

    #[test]
    fn test_navigator_normalizes_region_tags() {
        let ctx =
            DetectionContext::in_memory().with_accept_languages(vec!["en-US".into(), "de".into()]);
        assert_eq!(NavigatorStrategy.lookup(&ctx, &options()), Some("en".to_string()));

        // An exact supported tag wins as-is
        let opts = DetectorOptions::new(vec!["en-US".into(), "de".into()], "de");
        assert_eq!(NavigatorStrategy.lookup(&ctx, &opts), Some("en-US".to_string()));
    }

    #[test]
    fn test_navigator_skips_unsupported() {
        let ctx = DetectionContext::in_memory()
            .with_accept_languages(vec!["ja".into(), "fr-CA".into()]);
        assert_eq!(NavigatorStrategy.lookup(&ctx, &options()), Some("fr".to_string()));
    }

    #[test]
    fn test_cookie_round_trip() {
        let ctx = DetectionContext::in_memory();
        let opts = options();
        assert_eq!(CookieStrategy.lookup(&ctx, &opts), None);

        CookieStrategy.cache_user_language("de", &ctx, &opts);
        assert_eq!(CookieStrategy.lookup(&ctx, &opts), Some("de".to_string()));

        CookieStrategy.clear(&ctx, &opts);
        assert_eq!(CookieStrategy.lookup(&ctx, &opts), None);
    }

    #[test]
    fn test_html_tag_lookup() {
        let ctx = DetectionContext::in_memory().with_html_lang("fr");
        assert_eq!(HtmlTagStrategy.lookup(&ctx, &options()), Some("fr".to_string()));
    }
}
