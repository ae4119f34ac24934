//! Bundle cache with TTL expiry and access-order LRU eviction

use lingx_common::Bundle;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Configuration for the bundle cache
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Entry time-to-live
    pub ttl: Duration,
    /// Maximum number of entries
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            capacity: 50,
        }
    }
}

/// Cache key: a language, optionally scoped by namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub language: String,
    pub namespace: Option<String>,
}

impl CacheKey {
    pub fn new(language: impl Into<String>, namespace: Option<&str>) -> Self {
        Self {
            language: language.into(),
            namespace: namespace.map(str::to_string),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{}.{}", self.language, namespace),
            None => write!(f, "{}", self.language),
        }
    }
}

/// One cached bundle with its lifecycle timestamps
#[derive(Debug, Clone)]
struct CacheEntry {
    bundle: Bundle,
    expires_at: Instant,
    last_accessed: Instant,
}

impl CacheEntry {
    fn new(bundle: Bundle, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            bundle,
            expires_at: now + ttl,
            last_accessed: now,
        }
    }
}

/// Cache performance counters
#[derive(Debug, Default)]
pub struct CacheMetrics {
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    pub evictions: AtomicU64,
    pub expirations: AtomicU64,
}

impl CacheMetrics {
    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    fn record_expiration(&self) {
        self.expirations.fetch_add(1, Ordering::Relaxed);
    }

    /// Fraction of reads served from the cache
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(Ordering::Relaxed) as f64;
        let total = hits + self.misses.load(Ordering::Relaxed) as f64;
        if total > 0.0 {
            hits / total
        } else {
            0.0
        }
    }
}

/// Keyed, expiring store of translation bundles.
///
/// Expired entries are deleted lazily on the read that finds them, never
/// swept eagerly. When full, inserting a new key evicts the entry with
/// the oldest access time (true LRU); updating an existing key never
/// evicts. This cache performs no I/O.
#[derive(Debug)]
pub struct TranslationCache {
    entries: HashMap<CacheKey, CacheEntry>,
    config: CacheConfig,
    metrics: Arc<CacheMetrics>,
}

impl TranslationCache {
    /// Create a cache with the given configuration
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            config,
            metrics: Arc::new(CacheMetrics::default()),
        }
    }

    /// Look up a bundle, deleting it if its TTL has passed
    pub fn get(&mut self, language: &str, namespace: Option<&str>) -> Option<Bundle> {
        let key = CacheKey::new(language, namespace);
        let now = Instant::now();

        match self.entries.get_mut(&key) {
            Some(entry) if now >= entry.expires_at => {
                debug!(key = %key, "Cache entry expired");
                self.entries.remove(&key);
                self.metrics.record_expiration();
                self.metrics.record_miss();
                None
            }
            Some(entry) => {
                entry.last_accessed = now;
                self.metrics.record_hit();
                Some(entry.bundle.clone())
            }
            None => {
                self.metrics.record_miss();
                None
            }
        }
    }

    /// Store a bundle, evicting the least-recently-accessed entry when a
    /// new key would exceed capacity
    pub fn set(&mut self, language: &str, bundle: Bundle, namespace: Option<&str>) {
        let key = CacheKey::new(language, namespace);

        if !self.entries.contains_key(&key) && self.entries.len() >= self.config.capacity {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_accessed)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                debug!(key = %oldest, "Evicting least-recently-accessed bundle");
                self.entries.remove(&oldest);
                self.metrics.record_eviction();
            }
        }

        self.entries.insert(key, CacheEntry::new(bundle, self.config.ttl));
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Remove the bare-language entry and every namespaced entry of a language
    pub fn clear_language(&mut self, language: &str) {
        let before = self.entries.len();
        self.entries.retain(|key, _| key.language != language);
        debug!(
            language = %language,
            removed = before - self.entries.len(),
            "Cleared language from bundle cache"
        );
    }

    /// Number of live entries (expired ones included until read)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The cache's performance counters
    pub fn metrics(&self) -> Arc<CacheMetrics> {
        Arc::clone(&self.metrics)
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
