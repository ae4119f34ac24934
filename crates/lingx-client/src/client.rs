//! The runtime client facade

use crate::cache::{CacheConfig, CacheKey, TranslationCache};
use crate::pending::PendingRequests;
use crate::source::{FetchedBundle, LocalSource, RemoteSource};
use arc_swap::ArcSwap;
use futures::FutureExt;
use lingx_common::{merge_bundles, prefix_namespace, resolve_key, Bundle, LingxError, Result};
use lingx_config::ClientSettings;
use lingx_detect::{DetectionContext, DetectorOptions, LanguageDetector};
use lingx_format::{FormatArgs, LanguageIdentifier, MessageFormatter};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

struct ClientInner {
    settings: ClientSettings,
    remote: Option<RemoteSource>,
    local: Option<LocalSource>,
    cache: Mutex<TranslationCache>,
    pending: PendingRequests,
    formatter: Mutex<MessageFormatter>,
    active: ArcSwap<Bundle>,
    default_bundle: ArcSwap<Bundle>,
    language: Mutex<String>,
    available_languages: Mutex<Vec<String>>,
    detection: Option<(LanguageDetector, DetectionContext)>,
    missing_logged: Mutex<HashSet<(String, String)>>,
}

/// The translation runtime client.
///
/// Cheap to clone; clones share the caches, the pending-load registry,
/// and the active bundle.
#[derive(Clone)]
pub struct LingxClient {
    inner: Arc<ClientInner>,
}

impl LingxClient {
    /// Create a client from settings, without language detection
    pub fn new(settings: ClientSettings) -> Result<Self> {
        Self::build(settings, None)
    }

    /// Create a client that resolves and persists the user's language
    /// preference through the given detector.
    ///
    /// The settings' detection order, caches, and exclusion lists are
    /// applied to the detector.
    pub fn with_detection(
        settings: ClientSettings,
        detector: LanguageDetector,
        context: DetectionContext,
    ) -> Result<Self> {
        let detector = detector
            .with_order(settings.detection.order.clone())
            .with_caches(settings.detection.caches.clone())
            .with_excluded(settings.detection.excluded.clone());
        Self::build(settings, Some((detector, context)))
    }

    fn build(
        settings: ClientSettings,
        detection: Option<(LanguageDetector, DetectionContext)>,
    ) -> Result<Self> {
        let remote = settings
            .api
            .clone()
            .map(RemoteSource::new)
            .transpose()?;
        let local = settings
            .local
            .clone()
            .map(LocalSource::new)
            .transpose()?;

        let cache = TranslationCache::new(CacheConfig {
            ttl: Duration::from_secs(settings.cache.ttl_seconds),
            capacity: settings.cache.capacity,
        });
        let formatter = MessageFormatter::with_capacity(
            parse_locale(&settings.language.default_language),
            settings.formatter.template_cache_size,
        );
        let language = settings.language.default_language.clone();

        Ok(Self {
            inner: Arc::new(ClientInner {
                settings,
                remote,
                local,
                cache: Mutex::new(cache),
                pending: PendingRequests::new(),
                formatter: Mutex::new(formatter),
                active: ArcSwap::from_pointee(Bundle::new()),
                default_bundle: ArcSwap::from_pointee(Bundle::new()),
                language: Mutex::new(language),
                available_languages: Mutex::new(Vec::new()),
                detection,
                missing_logged: Mutex::new(HashSet::new()),
            }),
        })
    }

    /// Load the default language bundle and apply the detected preference.
    ///
    /// A failing default-language load is fatal; a failing load of the
    /// detected language degrades to the default with a warning.
    pub async fn init(&self) -> Result<()> {
        let default_language = self.inner.settings.language.default_language.clone();
        let bundle = self.load_translations(&default_language, None).await?;
        self.inner.default_bundle.store(Arc::new(bundle.clone()));
        self.inner.active.store(Arc::new(bundle));
        *self.inner.language.lock() = default_language.clone();
        info!(language = %default_language, "Runtime client initialized");

        if let Some((detector, context)) = &self.inner.detection {
            let detected = detector.detect(context, &self.detector_options());
            if detected != default_language {
                if let Err(err) = self.set_language(&detected).await {
                    warn!(
                        language = %detected,
                        error = %err,
                        "Could not load detected language, staying on default"
                    );
                }
            }
        }
        Ok(())
    }

    /// Switch the active language, replacing the active bundle wholesale.
    ///
    /// A no-op when the target equals the current language. On success the
    /// formatter's locale follows (discarding its compiled templates) and
    /// the choice is persisted through the detector's caching strategies.
    #[instrument(skip(self))]
    pub async fn set_language(&self, code: &str) -> Result<()> {
        if *self.inner.language.lock() == code {
            debug!(language = %code, "Language unchanged");
            return Ok(());
        }

        let bundle = self.load_translations(code, None).await?;

        self.inner.active.store(Arc::new(bundle));
        *self.inner.language.lock() = code.to_string();
        self.inner.formatter.lock().set_language(parse_locale(code));

        if let Some((detector, context)) = &self.inner.detection {
            detector.cache_language(code, context, &self.detector_options());
        }
        info!(language = %code, "Language switched");
        Ok(())
    }

    /// Load a namespace bundle for the current language and merge it into
    /// the active bundle under `namespace.`-prefixed keys.
    #[instrument(skip(self))]
    pub async fn load_namespace(&self, namespace: &str) -> Result<Bundle> {
        let language = self.inner.language.lock().clone();
        let bundle = self.load_translations(&language, Some(namespace)).await?;
        let prefixed = prefix_namespace(bundle, namespace);

        self.inner.active.rcu(|active| {
            let mut merged = Bundle::clone(active);
            merge_bundles(&mut merged, &prefixed);
            merged
        });
        debug!(namespace = %namespace, keys = prefixed.len(), "Namespace merged");
        Ok(prefixed)
    }

    /// Load the bundle for `(language, namespace?)`.
    ///
    /// Consults the bundle cache, then joins any in-flight load for the
    /// same key, and only then fetches: remote with retry first, local
    /// fallback with its own retry budget second. The only error surfaced
    /// is the exhaustion of every configured source.
    pub async fn load_translations(
        &self,
        language: &str,
        namespace: Option<&str>,
    ) -> Result<Bundle> {
        let key = CacheKey::new(language, namespace);

        let cached = self
            .inner
            .cache
            .lock()
            .get(language, namespace);
        if let Some(bundle) = cached {
            return Ok(bundle);
        }

        let (load, created) = self.inner.pending.obtain(key.clone(), || {
            let inner = Arc::clone(&self.inner);
            let key = key.clone();
            // Spawned so the load runs to completion and still populates
            // the cache even if every caller stops awaiting. The task
            // drops the pending entry the moment the load settles.
            let task = tokio::spawn(async move {
                let result = run_load(Arc::clone(&inner), key.clone()).await;
                inner.pending.remove(&key);
                result
            });
            async move {
                match task.await {
                    Ok(result) => result,
                    Err(err) => Err(Arc::new(LingxError::new(format!(
                        "Translation load task failed: {err}"
                    )))),
                }
            }
            .boxed()
        });
        if created {
            debug!(key = %key, "Started translation load");
        }

        load.await.map_err(LingxError::from)
    }

    /// Resolve and format a translation.
    ///
    /// Lookup order: flat key, dotted path, then the default language's
    /// bundle. A key absent everywhere is returned verbatim (and logged
    /// once per distinct language/key pair); this never fails.
    pub fn translate(&self, key: &str, values: Option<&FormatArgs>) -> String {
        let language = self.inner.language.lock().clone();
        let active = self.inner.active.load_full();

        let message = resolve_key(&active, key).map(str::to_string).or_else(|| {
            if language != self.inner.settings.language.default_language {
                let default_bundle = self.inner.default_bundle.load_full();
                resolve_key(&default_bundle, key).map(str::to_string)
            } else {
                None
            }
        });

        match message {
            Some(message) => match values {
                Some(values) => self.inner.formatter.lock().format(&message, values),
                None => message,
            },
            None => {
                let mut logged = self.inner.missing_logged.lock();
                if logged.insert((language.clone(), key.to_string())) {
                    warn!(language = %language, key = %key, "Missing translation, returning the key");
                }
                key.to_string()
            }
        }
    }

    /// Snapshot of the active bundle
    pub fn translations(&self) -> Arc<Bundle> {
        self.inner.active.load_full()
    }

    /// Whether a key resolves in the active or default bundle
    pub fn has_translation(&self, key: &str) -> bool {
        if resolve_key(&self.inner.active.load_full(), key).is_some() {
            return true;
        }
        resolve_key(&self.inner.default_bundle.load_full(), key).is_some()
    }

    /// The currently active language
    pub fn language(&self) -> String {
        self.inner.language.lock().clone()
    }

    /// Languages the remote endpoint reported as available
    pub fn available_languages(&self) -> Vec<String> {
        self.inner.available_languages.lock().clone()
    }

    /// Drop every cached bundle and compiled template
    pub fn clear_cache(&self) {
        self.inner.cache.lock().clear();
        self.inner.formatter.lock().clear_cache();
    }

    /// Number of bundles currently cached
    pub fn cached_bundles(&self) -> usize {
        self.inner.cache.lock().len()
    }

    /// Number of compiled templates currently cached
    pub fn cached_templates(&self) -> usize {
        self.inner.formatter.lock().template_cache_len()
    }

    fn detector_options(&self) -> DetectorOptions {
        let settings = &self.inner.settings;
        DetectorOptions {
            supported_languages: settings.language.supported_languages.clone(),
            fallback_language: settings.language.default_language.clone(),
            query_param: settings.detection.query_param.clone(),
            cookie_name: settings.detection.cookie_name.clone(),
            cookie_max_age: settings.detection.cookie_max_age,
            cookie_domain: settings.detection.cookie_domain.clone(),
            storage_key: settings.detection.storage_key.clone(),
        }
    }
}

/// The body of one de-duplicated load: fetch with fallback, then write
/// through to the cache.
async fn run_load(
    inner: Arc<ClientInner>,
    key: CacheKey,
) -> std::result::Result<Bundle, Arc<LingxError>> {
    // A load that completed while this one was being registered wins
    let cached = inner
        .cache
        .lock()
        .get(&key.language, key.namespace.as_deref());
    if let Some(bundle) = cached {
        return Ok(bundle);
    }

    let fetched = fetch_with_fallback(&inner, &key).await.map_err(Arc::new)?;

    if let Some(languages) = fetched.available_languages {
        *inner.available_languages.lock() = languages;
    }
    inner.cache.lock().set(
        &key.language,
        fetched.bundle.clone(),
        key.namespace.as_deref(),
    );
    Ok(fetched.bundle)
}

/// Remote first, local second, each with its own retry budget
async fn fetch_with_fallback(inner: &ClientInner, key: &CacheKey) -> Result<FetchedBundle> {
    let namespace = key.namespace.as_deref();

    let remote_failure = match &inner.remote {
        Some(remote) => match remote.fetch(&key.language, namespace).await {
            Ok(fetched) => return Ok(fetched),
            Err(err) => {
                warn!(
                    language = %key.language,
                    error = %err,
                    "Remote source exhausted, trying local fallback"
                );
                Some(err)
            }
        },
        None => None,
    };

    match &inner.local {
        Some(local) => local.fetch(&key.language, namespace).await.map_err(|err| {
            LingxError::source_exhausted_with(
                "local",
                format!("All sources failed for '{}'", key),
                err,
            )
        }),
        None => match remote_failure {
            Some(err) => Err(LingxError::source_exhausted_with(
                "remote",
                format!("Remote source failed for '{}' and no local fallback is configured", key),
                err,
            )),
            None => Err(LingxError::source_exhausted(
                "none",
                "No translation source is configured",
            )),
        },
    }
}

fn parse_locale(code: &str) -> LanguageIdentifier {
    code.parse().unwrap_or_else(|_| {
        warn!(code = %code, "Unparseable language tag, formatter falls back to root locale");
        LanguageIdentifier::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingx_common::BundleValue;

    fn offline_client() -> LingxClient {
        LingxClient::new(ClientSettings::default()).unwrap()
    }

    #[test]
    fn test_missing_key_returns_key() {
        let client = offline_client();
        assert_eq!(client.translate("nonexistent.key", None), "nonexistent.key");
        // Repeated misses stay quiet and still return the key
        assert_eq!(client.translate("nonexistent.key", None), "nonexistent.key");
    }

    #[test]
    fn test_translate_resolves_active_bundle() {
        let client = offline_client();
        let mut bundle = Bundle::new();
        bundle.insert(
            "greeting".to_string(),
            BundleValue::Message("Hello {name}".to_string()),
        );
        client.inner.active.store(Arc::new(bundle));

        assert_eq!(client.translate("greeting", None), "Hello {name}");
        let values = lingx_format::format_values!["name" => "Alice"];
        assert_eq!(client.translate("greeting", Some(&values)), "Hello Alice");
    }

    #[tokio::test]
    async fn test_load_without_sources_fails() {
        let client = offline_client();
        let err = client.load_translations("en", None).await.unwrap_err();
        assert!(matches!(err, LingxError::Shared(_)));
        assert!(err.to_string().contains("No translation source"));
    }

    #[tokio::test]
    async fn test_set_language_to_current_is_noop() {
        // No sources configured, so anything but a no-op would fail
        let client = offline_client();
        assert!(client.set_language("en").await.is_ok());
        assert_eq!(client.language(), "en");
    }

    #[test]
    fn test_clear_cache_empties_both_caches() {
        let client = offline_client();
        let values = lingx_format::format_values!["count" => 1];
        let mut bundle = Bundle::new();
        bundle.insert(
            "items".to_string(),
            BundleValue::Message("{count, plural, one {# item} other {# items}}".to_string()),
        );
        client.inner.active.store(Arc::new(bundle));

        client.translate("items", Some(&values));
        assert_eq!(client.cached_templates(), 1);

        client.clear_cache();
        assert_eq!(client.cached_templates(), 0);
        assert_eq!(client.cached_bundles(), 0);
    }
}
