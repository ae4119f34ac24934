//! Error types and utilities for the lingx runtime

use std::sync::Arc;
use thiserror::Error;

/// Result type alias for lingx operations
pub type Result<T> = std::result::Result<T, LingxError>;

/// Main error type for lingx operations
#[derive(Error, Debug)]
pub enum LingxError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Network related errors (connection failures, timeouts)
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// HTTP responses outside the success range
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        status: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A translation source exhausted its retry budget, naming the failing stage
    #[error("Translation load failed at {stage} source: {message}")]
    Source {
        stage: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation errors for configuration or input
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// A failure observed through a de-duplicated in-flight load
    #[error(transparent)]
    Shared(#[from] Arc<LingxError>),

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl LingxError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new network error with source
    pub fn network_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new HTTP error with status code
    pub fn http_with_status(msg: impl Into<String>, status: u16) -> Self {
        Self::Http {
            message: msg.into(),
            status: Some(status),
            source: None,
        }
    }

    /// Create a new source-exhaustion error naming the failing stage
    pub fn source_exhausted(stage: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Source {
            stage: stage.into(),
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new source-exhaustion error with the underlying failure attached
    pub fn source_exhausted_with(
        stage: impl Into<String>,
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Source {
            stage: stage.into(),
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Whether a retry may succeed for this error
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Http { status, .. } => status.map_or(true, |s| s >= 500),
            Self::Shared(inner) => inner.is_transient(),
            _ => false,
        }
    }
}

/// Convert from reqwest::Error to LingxError
impl From<reqwest::Error> for LingxError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network_with_source("Request timeout", err)
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err)
        } else if err.is_status() {
            let status = err.status().map(|s| s.as_u16());
            Self::Http {
                message: format!("HTTP error: {}", status.unwrap_or(0)),
                status,
                source: Some(Box::new(err)),
            }
        } else {
            Self::network_with_source("Network request failed", err)
        }
    }
}
