//! Message formatting for the lingx translation runtime
//!
//! This crate compiles message strings in an ICU-style grammar into an
//! internal template form and formats them against caller-supplied values:
//!
//! - `{name}` interpolation
//! - `plural` / `selectordinal` with exact (`=0`, `=1`, ...) and CLDR
//!   category arms, including `#` for the formatted count
//! - `select` with arbitrary arms and a mandatory `other`
//! - `number` with `integer`, `percent`, and `currency` styles
//! - `date` / `time` with `short`, `medium`, `long`, and `full` presets
//!
//! Compiled templates are cached per locale; changing the locale discards
//! the whole cache, because plural, number, and date rules are
//! locale-bound. Formatting never fails to the caller: a message that does
//! not parse is returned unchanged and a warning is logged.
//!
//! # Example
//!
//! ```rust
//! use lingx_format::{format_values, MessageFormatter};
//!
//! let mut formatter = MessageFormatter::new("en".parse().unwrap());
//! let out = formatter.format(
//!     "{count, plural, =0 {No items} one {1 item} other {{count} items}}",
//!     &format_values!["count" => 5],
//! );
//! assert_eq!(out, "5 items");
//! ```

pub mod ast;
pub mod cache;
pub mod dates;
pub mod error;
pub mod formatter;
pub mod numbers;
pub mod parser;
pub mod plurals;
pub mod values;

pub use ast::{DateTimePreset, Message, Node, NumberStyle};
pub use error::{FormatError, FormatResult};
pub use formatter::{is_plain_message, MessageFormatter};
pub use values::{FormatArgs, FormatValue};

// Re-export the locale identifier type used throughout the API
pub use unic_langid::LanguageIdentifier;
