//! Integration tests for the runtime client against a mock translation server

use anyhow::Result;
use lingx_client::LingxClient;
use lingx_config::{ApiSettings, ClientSettings, LocalSettings, RetrySettings};
use lingx_detect::{CookieStore, DetectionContext, KeyValueStore, LanguageDetector};
use lingx_format::format_values;
use serde_json::json;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_retry(attempts: u32) -> RetrySettings {
    RetrySettings {
        attempts,
        base_delay_ms: 1,
        max_delay_ms: 10,
    }
}

fn settings_for(server_url: &str) -> ClientSettings {
    let mut settings = ClientSettings::default();
    settings.language.default_language = "en".to_string();
    settings.language.supported_languages = vec!["en".into(), "de".into(), "fr".into()];
    settings.api = Some(ApiSettings {
        base_url: server_url.to_string(),
        translate_path: "translate".to_string(),
        project: "demo".to_string(),
        space: "main".to_string(),
        environment: "test".to_string(),
        timeout_seconds: 5,
        retry: fast_retry(3),
    });
    settings
}

fn translations_body(language: &str, greeting: &str) -> serde_json::Value {
    json!({
        "language": language,
        "translations": {
            "greeting": greeting,
            "items": "{count, plural, =0 {No items} one {1 item} other {{count} items}}",
            "total": "{count, plural, other {# entries}}",
            "common": { "farewell": "Goodbye" }
        },
        "availableLanguages": ["en", "de", "fr"]
    })
}

async fn mock_language(server: &MockServer, language: &str, greeting: &str) {
    Mock::given(method("GET"))
        .and(path("/translate"))
        .and(query_param("language", language))
        .respond_with(ResponseTemplate::new(200).set_body_json(translations_body(language, greeting)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn init_loads_default_language() -> Result<()> {
    let server = MockServer::start().await;
    mock_language(&server, "en", "Hello").await;

    let client = LingxClient::new(settings_for(&server.uri()))?;
    client.init().await?;

    assert_eq!(client.language(), "en");
    assert_eq!(client.translate("greeting", None), "Hello");
    assert_eq!(client.translate("common.farewell", None), "Goodbye");
    assert_eq!(client.available_languages(), vec!["en", "de", "fr"]);
    Ok(())
}

#[tokio::test]
async fn concurrent_loads_share_one_request() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate"))
        .and(query_param("language", "de"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(translations_body("de", "Hallo"))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = LingxClient::new(settings_for(&server.uri()))?;

    let mut tasks = Vec::new();
    for _ in 0..5 {
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            client.load_translations("de", None).await
        }));
    }

    let mut bundles = Vec::new();
    for task in tasks {
        bundles.push(task.await??);
    }
    for bundle in &bundles[1..] {
        assert_eq!(bundle, &bundles[0]);
    }
    // The mock's expect(1) verifies exactly one request was made
    Ok(())
}

#[tokio::test]
async fn remote_exhaustion_falls_back_to_local() -> Result<()> {
    let remote = MockServer::start().await;
    let local = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&remote)
        .await;
    Mock::given(method("GET"))
        .and(path("/static/de.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "greeting": "Hallo (offline)"
        })))
        .expect(1)
        .mount(&local)
        .await;

    let mut settings = settings_for(&remote.uri());
    settings.local = Some(LocalSettings {
        path: format!("{}/static", local.uri()),
        retry: fast_retry(1),
    });

    let client = LingxClient::new(settings)?;
    let bundle = client.load_translations("de", None).await?;
    assert_eq!(
        lingx_common::resolve_key(&bundle, "greeting"),
        Some("Hallo (offline)")
    );
    Ok(())
}

#[tokio::test]
async fn exhausting_both_sources_surfaces_failure() -> Result<()> {
    let remote = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&remote)
        .await;

    let mut settings = settings_for(&remote.uri());
    settings.api.as_mut().unwrap().retry = fast_retry(2);
    settings.local = Some(LocalSettings {
        path: "http://127.0.0.1:9".to_string(),
        retry: fast_retry(1),
    });

    let client = LingxClient::new(settings)?;
    let err = client.load_translations("de", None).await.unwrap_err();
    assert!(err.to_string().contains("local"));
    Ok(())
}

#[tokio::test]
async fn client_errors_are_not_retried() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = LingxClient::new(settings_for(&server.uri()))?;
    assert!(client.load_translations("de", None).await.is_err());
    Ok(())
}

#[tokio::test]
async fn second_load_is_served_from_cache() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate"))
        .and(query_param("language", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(translations_body("en", "Hello")))
        .expect(1)
        .mount(&server)
        .await;

    let client = LingxClient::new(settings_for(&server.uri()))?;
    client.load_translations("en", None).await?;
    client.load_translations("en", None).await?;
    assert_eq!(client.cached_bundles(), 1);
    Ok(())
}

#[tokio::test]
async fn set_language_swaps_bundle_and_formats_locale_correctly() -> Result<()> {
    let server = MockServer::start().await;
    mock_language(&server, "en", "Hello").await;
    mock_language(&server, "de", "Hallo").await;

    let client = LingxClient::new(settings_for(&server.uri()))?;
    client.init().await?;

    let values = format_values!["count" => 1000];
    assert_eq!(client.translate("total", Some(&values)), "1,000 entries");

    client.set_language("de").await?;
    assert_eq!(client.language(), "de");
    assert_eq!(client.translate("greeting", None), "Hallo");
    // Same message, new locale: templates were recompiled with German
    // number grouping
    assert_eq!(client.translate("total", Some(&values)), "1.000 entries");
    Ok(())
}

#[tokio::test]
async fn plural_selection_follows_count() -> Result<()> {
    let server = MockServer::start().await;
    mock_language(&server, "en", "Hello").await;

    let client = LingxClient::new(settings_for(&server.uri()))?;
    client.init().await?;

    assert_eq!(
        client.translate("items", Some(&format_values!["count" => 0])),
        "No items"
    );
    assert_eq!(
        client.translate("items", Some(&format_values!["count" => 1])),
        "1 item"
    );
    assert_eq!(
        client.translate("items", Some(&format_values!["count" => 5])),
        "5 items"
    );
    Ok(())
}

#[tokio::test]
async fn missing_keys_fall_back_to_default_bundle_then_key() -> Result<()> {
    let server = MockServer::start().await;
    mock_language(&server, "en", "Hello").await;
    Mock::given(method("GET"))
        .and(path("/translate"))
        .and(query_param("language", "fr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "language": "fr",
            "translations": { "greeting": "Bonjour" }
        })))
        .mount(&server)
        .await;

    let client = LingxClient::new(settings_for(&server.uri()))?;
    client.init().await?;
    client.set_language("fr").await?;

    assert_eq!(client.translate("greeting", None), "Bonjour");
    // Absent from French, present in the default English bundle
    assert_eq!(client.translate("common.farewell", None), "Goodbye");
    // Absent everywhere: the key itself comes back
    assert_eq!(client.translate("nonexistent.key", None), "nonexistent.key");
    Ok(())
}

#[tokio::test]
async fn load_namespace_merges_prefixed_keys() -> Result<()> {
    let server = MockServer::start().await;
    mock_language(&server, "en", "Hello").await;
    Mock::given(method("GET"))
        .and(path("/translate"))
        .and(query_param("language", "en"))
        .and(query_param("namespace", "shop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "language": "en",
            "translations": { "title": "Checkout", "cart": { "empty": "Your cart is empty" } }
        })))
        .expect(1)
        // Outrank the generic language mock so the namespace request is
        // served by this more specific mock rather than the base bundle.
        .with_priority(1)
        .mount(&server)
        .await;

    let client = LingxClient::new(settings_for(&server.uri()))?;
    client.init().await?;

    client.load_namespace("shop").await?;
    // Namespace keys are merged, not replacing the base bundle
    assert_eq!(client.translate("shop.title", None), "Checkout");
    assert_eq!(client.translate("shop.cart.empty", None), "Your cart is empty");
    assert_eq!(client.translate("greeting", None), "Hello");
    Ok(())
}

#[tokio::test]
async fn detection_applies_query_override_and_persists() -> Result<()> {
    let server = MockServer::start().await;
    mock_language(&server, "en", "Hello").await;
    mock_language(&server, "de", "Hallo").await;

    let context = DetectionContext::in_memory()
        .with_url(Url::parse("https://app.example.com/?lang=de")?);
    let client = LingxClient::with_detection(
        settings_for(&server.uri()),
        LanguageDetector::new(),
        context.clone(),
    )?;
    client.init().await?;

    assert_eq!(client.language(), "de");
    assert_eq!(client.translate("greeting", None), "Hallo");
    // The resolved choice was persisted for the next visit
    assert_eq!(context.cookies.get("lingx-lang").unwrap(), Some("de".to_string()));
    assert_eq!(context.durable.get("lingx-lang").unwrap(), Some("de".to_string()));
    Ok(())
}

#[tokio::test]
async fn expired_cache_entry_triggers_reload() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate"))
        .and(query_param("language", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(translations_body("en", "Hello")))
        .expect(2)
        .mount(&server)
        .await;

    let mut settings = settings_for(&server.uri());
    settings.cache.ttl_seconds = 1;

    let client = LingxClient::new(settings)?;
    client.load_translations("en", None).await?;
    tokio::time::sleep(Duration::from_millis(1_100)).await;
    client.load_translations("en", None).await?;
    Ok(())
}
