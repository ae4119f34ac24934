//! The lingx runtime client
//!
//! Orchestrates the bundle cache, the message formatter, and the language
//! detector behind one facade:
//!
//! - [`LingxClient::init`] loads the default language and applies the
//!   detected preference
//! - [`LingxClient::set_language`] switches the active bundle wholesale
//! - [`LingxClient::load_namespace`] lazily merges a namespace bundle
//! - [`LingxClient::translate`] resolves and formats a message, never
//!   failing to the caller
//!
//! Loads go remote-first with retry, fall back to a local static source
//! with its own retry budget, and are de-duplicated so concurrent callers
//! of the same `(language, namespace)` key share one in-flight request.

pub mod cache;
pub mod client;
pub mod pending;
pub mod source;

pub use cache::{CacheConfig, CacheKey, CacheMetrics, TranslationCache};
pub use client::LingxClient;
pub use pending::PendingRequests;
pub use source::{FetchedBundle, LocalSource, RemoteSource, TranslationsResponse};

// The value types callers hand to `translate`
pub use lingx_format::{FormatArgs, FormatValue};
