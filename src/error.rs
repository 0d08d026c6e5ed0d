//! Error types for Reflekta

use thiserror::Error;

/// Result type alias for Reflekta operations
pub type Result<T> = std::result::Result<T, ReflektaError>;

/// Main error type for Reflekta
#[derive(Error, Debug)]
pub enum ReflektaError {
    /// No credential or client configured for a provider. The orchestrator
    /// silently skips providers that report this.
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Transport or API failure from a provider call
    #[error("Provider error from {provider}: {message}")]
    Provider {
        provider: &'static str,
        message: String,
        status: Option<u16>,
    },

    /// Provider response was parseable but missing required profile keys,
    /// or was not valid JSON at all
    #[error("Schema invalid: {0}")]
    SchemaInvalid(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ReflektaError {
    /// Check if error should count as a failed attempt the orchestrator may
    /// retry (as opposed to a skipped provider)
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ReflektaError::Provider { .. }
                | ReflektaError::SchemaInvalid(_)
                | ReflektaError::Http(_)
        )
    }

    /// Classify rate/quota exhaustion: HTTP 429 or the textual
    /// "insufficient_quota" marker. Logged by the orchestrator but does not
    /// change retry behavior.
    pub fn is_rate_limit(&self) -> bool {
        match self {
            ReflektaError::Provider {
                message, status, ..
            } => {
                *status == Some(429) || message.to_lowercase().contains("insufficient_quota")
            }
            ReflektaError::Http(e) => e.status().map(|s| s.as_u16()) == Some(429),
            _ => false,
        }
    }
}
