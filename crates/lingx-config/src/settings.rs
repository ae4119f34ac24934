//! Settings structures for the lingx runtime client

use crate::defaults;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Top-level settings for a lingx runtime client
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ClientSettings {
    /// Language selection settings
    #[validate]
    pub language: LanguageSettings,

    /// Remote translation endpoint; omit to run without a remote source
    #[validate]
    pub api: Option<ApiSettings>,

    /// Local static bundle source; omit to run without a fallback
    #[validate]
    pub local: Option<LocalSettings>,

    /// Bundle cache settings
    #[validate]
    pub cache: CacheSettings,

    /// Message formatter settings
    #[validate]
    pub formatter: FormatterSettings,

    /// Language detection settings
    pub detection: DetectionSettings,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            language: LanguageSettings::default(),
            api: None,
            local: None,
            cache: CacheSettings::default(),
            formatter: FormatterSettings::default(),
            detection: DetectionSettings::default(),
        }
    }
}

/// Language selection settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LanguageSettings {
    /// Language loaded at startup and used as the translation fallback
    #[validate(custom(
        function = "crate::validation::validate_language_code",
        message = "Default language must be a valid language tag"
    ))]
    pub default_language: String,

    /// Languages the application ships translations for
    #[validate(custom(
        function = "crate::validation::validate_language_codes",
        message = "Supported languages must be valid language tags"
    ))]
    pub supported_languages: Vec<String>,
}

impl Default for LanguageSettings {
    fn default() -> Self {
        Self {
            default_language: defaults::default_language(),
            supported_languages: vec![defaults::default_language()],
        }
    }
}

/// Remote translation endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApiSettings {
    /// Base URL of the translation server
    #[validate(url(message = "API base URL must be a valid URL"))]
    pub base_url: String,

    /// Path segment of the translation endpoint
    #[serde(default = "defaults::translate_path")]
    pub translate_path: String,

    /// Project identifier sent with every request
    #[validate(length(min = 1, message = "Project cannot be empty"))]
    pub project: String,

    /// Space (workspace) identifier sent with every request
    #[validate(length(min = 1, message = "Space cannot be empty"))]
    pub space: String,

    /// Environment name sent with every request
    #[validate(length(min = 1, message = "Environment cannot be empty"))]
    pub environment: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout_seconds")]
    #[validate(range(min = 1, max = 300, message = "Timeout must be between 1 and 300 seconds"))]
    pub timeout_seconds: u64,

    /// Retry budget for the remote source
    #[serde(default = "RetrySettings::remote")]
    #[validate]
    pub retry: RetrySettings,
}

/// Local static bundle source settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LocalSettings {
    /// Base URL under which `{language}.json` files are served
    #[validate(length(min = 1, message = "Local path cannot be empty"))]
    pub path: String,

    /// Retry budget for the local source, independent of the remote one
    #[serde(default = "RetrySettings::local")]
    #[validate]
    pub retry: RetrySettings,
}

/// Retry budget with exponential backoff
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RetrySettings {
    /// Total attempts, the first try included
    #[validate(range(min = 1, max = 10, message = "Attempts must be between 1 and 10"))]
    pub attempts: u32,

    /// First backoff delay in milliseconds; later delays double
    #[validate(range(min = 1, message = "Base delay must be at least 1 ms"))]
    pub base_delay_ms: u64,

    /// Upper bound on any single backoff delay, in milliseconds
    #[validate(range(min = 1, message = "Delay cap must be at least 1 ms"))]
    pub max_delay_ms: u64,
}

impl RetrySettings {
    /// Default budget for the remote source
    pub fn remote() -> Self {
        Self {
            attempts: defaults::remote_attempts(),
            base_delay_ms: defaults::remote_base_delay_ms(),
            max_delay_ms: defaults::max_delay_ms(),
        }
    }

    /// Default budget for the local source
    pub fn local() -> Self {
        Self {
            attempts: defaults::local_attempts(),
            base_delay_ms: defaults::local_base_delay_ms(),
            max_delay_ms: defaults::max_delay_ms(),
        }
    }
}

/// Bundle cache settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CacheSettings {
    /// Entry time-to-live in seconds
    #[validate(range(min = 1, message = "Cache TTL must be at least 1 second"))]
    pub ttl_seconds: u64,

    /// Maximum number of cached bundles
    #[validate(range(min = 1, max = 10000, message = "Capacity must be between 1 and 10000"))]
    pub capacity: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_seconds: defaults::cache_ttl_seconds(),
            capacity: defaults::cache_capacity(),
        }
    }
}

/// Message formatter settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct FormatterSettings {
    /// Maximum number of compiled templates kept per locale
    #[validate(range(min = 1, max = 100000, message = "Template cache size must be between 1 and 100000"))]
    pub template_cache_size: usize,
}

impl Default for FormatterSettings {
    fn default() -> Self {
        Self {
            template_cache_size: defaults::template_cache_size(),
        }
    }
}

/// Language detection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionSettings {
    /// Ordered strategy names consulted by detection
    pub order: Vec<String>,

    /// Strategy names that persist the resolved language
    pub caches: Vec<String>,

    /// Languages never persisted (e.g. the testing pseudo-locale)
    pub excluded: Vec<String>,

    /// Query parameter carrying a language override
    pub query_param: String,

    /// Cookie storing the resolved language
    pub cookie_name: String,

    /// Cookie lifetime in seconds
    pub cookie_max_age: u32,

    /// Optional cross-subdomain cookie domain
    pub cookie_domain: Option<String>,

    /// Key under which the durable and per-tab stores hold the language
    pub storage_key: String,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            order: defaults::detection_order(),
            caches: defaults::detection_caches(),
            excluded: defaults::detection_excluded(),
            query_param: defaults::query_param(),
            cookie_name: defaults::cookie_name(),
            cookie_max_age: defaults::cookie_max_age(),
            cookie_domain: None,
            storage_key: defaults::storage_key(),
        }
    }
}
