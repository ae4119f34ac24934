//! Default values for lingx settings

/// Default language used when nothing else resolves
pub fn default_language() -> String {
    "en".to_string()
}

/// Path segment of the translation endpoint on the remote server
pub fn translate_path() -> String {
    "translate".to_string()
}

/// Remote request timeout in seconds
pub fn timeout_seconds() -> u64 {
    30
}

/// Remote retry attempts (first try included)
pub fn remote_attempts() -> u32 {
    3
}

/// Base backoff delay for remote retries, in milliseconds
pub fn remote_base_delay_ms() -> u64 {
    1_000
}

/// Backoff delay cap, in milliseconds
pub fn max_delay_ms() -> u64 {
    10_000
}

/// Local-source retry attempts (first try included)
pub fn local_attempts() -> u32 {
    2
}

/// Base backoff delay for local retries, in milliseconds
pub fn local_base_delay_ms() -> u64 {
    250
}

/// Bundle cache time-to-live in seconds
pub fn cache_ttl_seconds() -> u64 {
    300
}

/// Bundle cache capacity in entries
pub fn cache_capacity() -> usize {
    50
}

/// Compiled-template cache capacity in entries
pub fn template_cache_size() -> usize {
    500
}

/// Ordered detection strategy names
pub fn detection_order() -> Vec<String> {
    vec![
        "query".to_string(),
        "cookie".to_string(),
        "storage".to_string(),
        "navigator".to_string(),
    ]
}

/// Strategy names that persist the resolved language
pub fn detection_caches() -> Vec<String> {
    vec!["cookie".to_string(), "storage".to_string()]
}

/// Languages never persisted by the detector
pub fn detection_excluded() -> Vec<String> {
    vec!["cimode".to_string()]
}

/// Query parameter carrying a language override
pub fn query_param() -> String {
    "lang".to_string()
}

/// Cookie storing the resolved language
pub fn cookie_name() -> String {
    "lingx-lang".to_string()
}

/// Cookie lifetime in seconds (one year)
pub fn cookie_max_age() -> u32 {
    31_536_000
}

/// Key under which the durable and per-tab stores hold the language
pub fn storage_key() -> String {
    "lingx-lang".to_string()
}
