//! Remote and local translation sources with independent retry budgets

use lingx_common::{Bundle, BundleValue, LingxError, Result};
use lingx_config::{ApiSettings, LocalSettings, RetrySettings};
use reqwest::Client;
use std::time::Duration;
use tokio_retry::strategy::{jitter, ExponentialBackoff};
use tokio_retry::RetryIf;
use tracing::{debug, instrument, warn};

/// Response body of the remote translation endpoint
#[derive(Debug, Clone, serde::Deserialize)]
pub struct TranslationsResponse {
    pub language: String,
    pub translations: Bundle,
    #[serde(rename = "availableLanguages")]
    pub available_languages: Option<Vec<String>>,
}

/// A successfully fetched bundle plus any response metadata
#[derive(Debug, Clone)]
pub struct FetchedBundle {
    pub bundle: Bundle,
    pub available_languages: Option<Vec<String>>,
}

/// Exponential backoff with jitter, capped, sized to the attempt budget
fn backoff(retry: &RetrySettings) -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(2)
        .factor((retry.base_delay_ms / 2).max(1))
        .max_delay(Duration::from_millis(retry.max_delay_ms))
        .map(jitter)
        .take(retry.attempts.saturating_sub(1) as usize)
}

fn retry_transient(err: &LingxError) -> bool {
    err.is_transient()
}

/// The remote translation endpoint
#[derive(Debug, Clone)]
pub struct RemoteSource {
    client: Client,
    settings: ApiSettings,
}

impl RemoteSource {
    /// Build the source and its pooled HTTP client
    pub fn new(settings: ApiSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(|e| LingxError::network_with_source("Failed to create HTTP client", e))?;
        Ok(Self { client, settings })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.translate_path.trim_matches('/')
        )
    }

    /// Fetch translations for a language, retrying transient failures
    #[instrument(skip(self), fields(language = %language))]
    pub async fn fetch(&self, language: &str, namespace: Option<&str>) -> Result<FetchedBundle> {
        let url = self.endpoint();
        let mut query = vec![
            ("project", self.settings.project.as_str()),
            ("space", self.settings.space.as_str()),
            ("environment", self.settings.environment.as_str()),
            ("language", language),
        ];
        if let Some(namespace) = namespace {
            query.push(("namespace", namespace));
        }

        let response = RetryIf::spawn(
            backoff(&self.settings.retry),
            || async {
                debug!(url = %url, "Requesting remote translations");
                let response = self.client.get(&url).query(&query).send().await?;
                let status = response.status();
                if status.is_success() {
                    Ok(response)
                } else if status.is_client_error() {
                    Err(LingxError::http_with_status(
                        format!("Translation endpoint rejected the request: {}", status),
                        status.as_u16(),
                    ))
                } else {
                    warn!(status = %status, "Translation endpoint error, may retry");
                    Err(LingxError::http_with_status(
                        format!("Translation endpoint error: {}", status),
                        status.as_u16(),
                    ))
                }
            },
            retry_transient,
        )
        .await?;

        let body: TranslationsResponse = response.json().await?;
        debug!(
            language = %body.language,
            keys = body.translations.len(),
            "Remote translations received"
        );
        Ok(FetchedBundle {
            bundle: body.translations,
            available_languages: body.available_languages,
        })
    }
}

/// The local static bundle source serving `{path}/{language}.json`
#[derive(Debug, Clone)]
pub struct LocalSource {
    client: Client,
    settings: LocalSettings,
}

impl LocalSource {
    pub fn new(settings: LocalSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| LingxError::network_with_source("Failed to create HTTP client", e))?;
        Ok(Self { client, settings })
    }

    /// Fetch the static bundle for a language, retrying transient failures.
    ///
    /// Static files are per-language; for a namespace load the namespace
    /// sub-tree is extracted when the file has one.
    #[instrument(skip(self), fields(language = %language))]
    pub async fn fetch(&self, language: &str, namespace: Option<&str>) -> Result<FetchedBundle> {
        let url = format!(
            "{}/{}.json",
            self.settings.path.trim_end_matches('/'),
            language
        );

        let response = RetryIf::spawn(
            backoff(&self.settings.retry),
            || async {
                debug!(url = %url, "Requesting local translations");
                let response = self.client.get(&url).send().await?;
                let status = response.status();
                if status.is_success() {
                    Ok(response)
                } else {
                    Err(LingxError::http_with_status(
                        format!("Local bundle request failed: {}", status),
                        status.as_u16(),
                    ))
                }
            },
            retry_transient,
        )
        .await?;

        let mut bundle: Bundle = response.json().await?;
        if let Some(namespace) = namespace {
            if let Some(BundleValue::Nested(sub)) = bundle.get(namespace) {
                bundle = sub.clone();
            }
        }
        debug!(keys = bundle.len(), "Local translations received");
        Ok(FetchedBundle {
            bundle,
            available_languages: None,
        })
    }
}
