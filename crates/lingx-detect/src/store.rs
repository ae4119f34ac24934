//! Persistence primitives the detector reads and writes
//!
//! Real deployments back these traits with browser cookies, the per-origin
//! durable store, and the per-tab store. Every operation returns a
//! `Result` so a blocked or failing store degrades to "no value" at the
//! call site instead of propagating.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Errors raised by a persistence primitive
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Access denied by policy (e.g. blocked third-party storage)
    #[error("Storage access blocked: {0}")]
    AccessBlocked(String),

    /// Backend failure while reading or writing
    #[error("Storage operation failed: {0}")]
    OperationFailed(String),
}

/// A single-value string store (durable per-origin or per-tab)
pub trait KeyValueStore: Send + Sync + fmt::Debug {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// A cookie with the attributes the runtime sets
#[derive(Debug, Clone, PartialEq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    /// Lifetime in seconds; zero expires the cookie immediately
    pub max_age: u32,
    pub path: String,
    pub domain: Option<String>,
}

impl Cookie {
    /// A cookie rooted at `/` with the given lifetime
    pub fn new(name: impl Into<String>, value: impl Into<String>, max_age: u32) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            max_age,
            path: "/".to_string(),
            domain: None,
        }
    }

    /// Attach a cross-subdomain domain attribute
    pub fn with_domain(mut self, domain: Option<String>) -> Self {
        self.domain = domain;
        self
    }

    /// An expiry cookie: same name and attributes, zero max-age.
    ///
    /// Clearing must go through the store as a zero max-age write rather
    /// than a client-side delete, so a stale client cannot resurrect it.
    pub fn expired(name: impl Into<String>, domain: Option<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            max_age: 0,
            path: "/".to_string(),
            domain,
        }
    }
}

/// A cookie jar
pub trait CookieStore: Send + Sync + fmt::Debug {
    fn get(&self, name: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, cookie: &Cookie) -> Result<(), StoreError>;
}

/// In-memory [`KeyValueStore`] used in native embeddings and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// In-memory [`CookieStore`] honoring zero max-age expiry
#[derive(Debug, Default)]
pub struct MemoryCookieStore {
    cookies: Mutex<HashMap<String, Cookie>>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored cookie record, attributes included
    pub fn cookie(&self, name: &str) -> Option<Cookie> {
        self.cookies.lock().get(name).cloned()
    }
}

impl CookieStore for MemoryCookieStore {
    fn get(&self, name: &str) -> Result<Option<String>, StoreError> {
        Ok(self.cookies.lock().get(name).map(|c| c.value.clone()))
    }

    fn set(&self, cookie: &Cookie) -> Result<(), StoreError> {
        let mut cookies = self.cookies.lock();
        if cookie.max_age == 0 {
            cookies.remove(&cookie.name);
        } else {
            cookies.insert(cookie.name.clone(), cookie.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("key").unwrap(), None);
        store.set("key", "value").unwrap();
        assert_eq!(store.get("key").unwrap(), Some("value".to_string()));
        store.remove("key").unwrap();
        assert_eq!(store.get("key").unwrap(), None);
    }

    #[test]
    fn test_cookie_store_zero_max_age_expires() {
        let store = MemoryCookieStore::new();
        store.set(&Cookie::new("lingx-lang", "de", 3600)).unwrap();
        assert_eq!(store.get("lingx-lang").unwrap(), Some("de".to_string()));

        store.set(&Cookie::expired("lingx-lang", None)).unwrap();
        assert_eq!(store.get("lingx-lang").unwrap(), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = Cookie::new("lingx-lang", "fr", 60).with_domain(Some(".example.com".into()));
        assert_eq!(cookie.path, "/");
        assert_eq!(cookie.domain.as_deref(), Some(".example.com"));
    }
}
