//! Configuration for the lingx translation runtime
//!
//! Settings are plain serde structs with `validator` rules, loadable from a
//! file plus `LINGX_`-prefixed environment variables. A process-wide ambient
//! default can be installed exactly once at startup for contexts (such as
//! server-side rendering helpers) that cannot thread settings explicitly;
//! it is immutable after installation.

pub mod ambient;
pub mod defaults;
pub mod loader;
pub mod settings;
pub mod validation;

pub use ambient::{ambient, set_ambient};
pub use loader::SettingsLoader;
pub use settings::{
    ApiSettings, CacheSettings, ClientSettings, DetectionSettings, FormatterSettings,
    LanguageSettings, LocalSettings, RetrySettings,
};
