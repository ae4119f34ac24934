//! Language-preference detection for the lingx runtime
//!
//! Detection walks an ordered list of named strategies, each reading one
//! browser-level source (query parameter, cookie, durable store, navigator
//! preferences, ...) through a [`DetectionContext`]. The first strategy
//! returning a supported language wins; otherwise detection falls back to
//! the configured fallback language. Strategies named in the caches list
//! also persist the resolved language.
//!
//! Ordering and selection are pure data: strategies live in a name-keyed
//! map, and the configured order is just a list of names.

pub mod context;
pub mod detector;
pub mod options;
pub mod store;
pub mod strategies;
pub mod strategy;

pub use context::DetectionContext;
pub use detector::LanguageDetector;
pub use options::DetectorOptions;
pub use store::{Cookie, CookieStore, KeyValueStore, MemoryCookieStore, MemoryStore, StoreError};
pub use strategy::DetectionStrategy;
