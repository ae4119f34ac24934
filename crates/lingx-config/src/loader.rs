//! Settings loading from files and the environment

use crate::settings::ClientSettings;
use lingx_common::{LingxError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use validator::Validate;

/// Loads [`ClientSettings`] from an optional file layered with
/// `LINGX_`-prefixed environment variables (e.g. `LINGX_CACHE__CAPACITY`).
pub struct SettingsLoader {
    path: Option<PathBuf>,
}

impl SettingsLoader {
    /// Create a loader reading the given settings file
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Create a loader using environment variables only
    pub fn from_env() -> Self {
        Self { path: None }
    }

    /// Load and validate settings
    pub fn load(&self) -> Result<ClientSettings> {
        let mut builder = config::Config::builder();

        if let Some(path) = &self.path {
            debug!("Loading settings file: {}", path.display());
            builder = builder.add_source(config::File::from(path.clone()));
        }

        let raw = builder
            .add_source(
                config::Environment::with_prefix("LINGX")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| LingxError::config_with_source("Failed to load settings", e))?;

        let settings: ClientSettings = raw
            .try_deserialize()
            .map_err(|e| LingxError::config_with_source("Failed to deserialize settings", e))?;

        settings
            .validate()
            .map_err(|e| LingxError::validation(e.to_string()))?;

        info!(
            default_language = %settings.language.default_language,
            "Settings loaded"
        );
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
[language]
default_language = "de"
supported_languages = ["en", "de", "fr"]

[cache]
ttl_seconds = 60
capacity = 10
"#
        )
        .unwrap();

        let settings = SettingsLoader::from_file(file.path()).load().unwrap();
        assert_eq!(settings.language.default_language, "de");
        assert_eq!(settings.cache.ttl_seconds, 60);
        assert_eq!(settings.cache.capacity, 10);
        // Untouched sections keep their defaults
        assert_eq!(settings.formatter.template_cache_size, 500);
    }

    #[test]
    fn test_invalid_file_rejected() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
[language]
default_language = "not a language"
"#
        )
        .unwrap();

        assert!(SettingsLoader::from_file(file.path()).load().is_err());
    }

    #[test]
    fn test_env_only_defaults() {
        let settings = SettingsLoader::from_env().load().unwrap();
        assert_eq!(settings.language.default_language, "en");
        assert!(settings.api.is_none());
    }
}
