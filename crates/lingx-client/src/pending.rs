//! In-flight load registry for request de-duplication

use crate::cache::CacheKey;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt, Shared};
use lingx_common::{Bundle, LingxError};
use std::sync::Arc;
use tracing::debug;

/// The shared result of one in-flight load
pub type SharedLoad = Shared<BoxFuture<'static, std::result::Result<Bundle, Arc<LingxError>>>>;

/// Transient map from load key to in-flight future.
///
/// At most one load per key is outstanding at any instant; entries are
/// removed the moment their load settles, successfully or not.
#[derive(Default)]
pub struct PendingRequests {
    inner: DashMap<CacheKey, SharedLoad>,
}

impl std::fmt::Debug for PendingRequests {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingRequests")
            .field("in_flight", &self.inner.len())
            .finish()
    }
}

impl PendingRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Join the existing load for `key`, or register the one built by `make`.
    ///
    /// Returns the shared future plus whether this call created it.
    pub fn obtain<F>(&self, key: CacheKey, make: F) -> (SharedLoad, bool)
    where
        F: FnOnce() -> BoxFuture<'static, std::result::Result<Bundle, Arc<LingxError>>>,
    {
        match self.inner.entry(key) {
            Entry::Occupied(entry) => {
                debug!(key = %entry.key(), "Joining in-flight load");
                (entry.get().clone(), false)
            }
            Entry::Vacant(entry) => {
                let load = make().shared();
                entry.insert(load.clone());
                (load, true)
            }
        }
    }

    /// Drop the entry for a settled load
    pub fn remove(&self, key: &CacheKey) {
        self.inner.remove(key);
    }

    /// Number of in-flight loads
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether no load is in flight
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
