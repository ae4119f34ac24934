//! Integration tests for language detection precedence and persistence

use lingx_detect::{Cookie, CookieStore, DetectionContext, DetectorOptions, LanguageDetector};
use url::Url;

fn options() -> DetectorOptions {
    DetectorOptions::new(vec!["en".into(), "de".into(), "fr".into()], "en")
}

/// A context where the query parameter says `de` and the cookie says `fr`
fn conflicting_context() -> DetectionContext {
    let ctx = DetectionContext::in_memory()
        .with_url(Url::parse("https://app.example.com/?lang=de").unwrap());
    ctx.cookies
        .set(&Cookie::new("lingx-lang", "fr", 3600))
        .unwrap();
    ctx
}

#[test]
fn query_wins_when_ordered_first() {
    let detector = LanguageDetector::new()
        .with_order(vec!["query".to_string(), "cookie".to_string()]);
    assert_eq!(detector.detect(&conflicting_context(), &options()), "de");
}

#[test]
fn cookie_wins_when_order_is_reversed() {
    let detector = LanguageDetector::new()
        .with_order(vec!["cookie".to_string(), "query".to_string()]);
    assert_eq!(detector.detect(&conflicting_context(), &options()), "fr");
}

#[test]
fn navigator_base_subtag_matches_supported_set() {
    let detector = LanguageDetector::new();
    let ctx = DetectionContext::in_memory().with_accept_languages(vec!["de-AT".into()]);
    assert_eq!(detector.detect(&ctx, &options()), "de");
}

#[test]
fn custom_query_parameter_name() {
    let detector = LanguageDetector::new();
    let mut opts = options();
    opts.query_param = "locale".to_string();

    let ctx = DetectionContext::in_memory()
        .with_url(Url::parse("https://app.example.com/?locale=fr").unwrap());
    assert_eq!(detector.detect(&ctx, &opts), "fr");
}

#[test]
fn cached_language_survives_detection_round_trip() {
    let detector = LanguageDetector::new();
    let ctx = DetectionContext::in_memory();
    let opts = options();

    detector.cache_language("fr", &ctx, &opts);
    assert_eq!(detector.detect(&ctx, &opts), "fr");

    detector.clear_cache(&ctx, &opts);
    assert_eq!(detector.detect(&ctx, &opts), "en");
}
