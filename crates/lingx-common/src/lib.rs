//! Shared foundation for the lingx translation runtime
//!
//! This crate provides the pieces every other lingx crate builds on:
//!
//! - The [`LingxError`] taxonomy and the [`Result`] alias
//! - Structured logging initialization via `tracing`
//! - The [`Bundle`] translation model with key resolution, merging, and
//!   namespace prefixing

pub mod error;
pub mod logging;
pub mod types;

pub use error::{LingxError, Result};
pub use logging::{init_default_logging, init_logging, LoggingConfig};
pub use types::{merge_bundles, prefix_namespace, resolve_key, Bundle, BundleValue, KEY_DELIMITER};
