//! Per-call detector options

/// Immutable options passed to every detector invocation. Never persisted.
#[derive(Debug, Clone)]
pub struct DetectorOptions {
    /// Languages the application can actually serve
    pub supported_languages: Vec<String>,
    /// Returned when no strategy yields a supported language
    pub fallback_language: String,
    /// Query parameter carrying a language override
    pub query_param: String,
    /// Cookie storing the resolved language
    pub cookie_name: String,
    /// Cookie lifetime in seconds
    pub cookie_max_age: u32,
    /// Optional cross-subdomain cookie domain
    pub cookie_domain: Option<String>,
    /// Key used in the durable and per-tab stores
    pub storage_key: String,
}

impl DetectorOptions {
    /// Options for a supported-language set with defaults for everything else
    pub fn new(supported_languages: Vec<String>, fallback_language: impl Into<String>) -> Self {
        Self {
            supported_languages,
            fallback_language: fallback_language.into(),
            query_param: "lang".to_string(),
            cookie_name: "lingx-lang".to_string(),
            cookie_max_age: 31_536_000,
            cookie_domain: None,
            storage_key: "lingx-lang".to_string(),
        }
    }

    /// Whether a language is in the supported set
    pub fn is_supported(&self, code: &str) -> bool {
        self.supported_languages.iter().any(|lang| lang == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DetectorOptions::new(vec!["en".into(), "de".into()], "en");
        assert_eq!(options.cookie_name, "lingx-lang");
        assert_eq!(options.storage_key, "lingx-lang");
        assert_eq!(options.query_param, "lang");
        assert_eq!(options.cookie_max_age, 31_536_000);
        assert!(options.is_supported("de"));
        assert!(!options.is_supported("fr"));
    }
}
