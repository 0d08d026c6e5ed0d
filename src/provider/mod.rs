//! Provider adapters for text-analysis backends
//!
//! Each adapter exposes the uniform [`Provider`] contract: build the
//! backend-specific request, unwrap the backend-specific response envelope
//! to plain text. Adapters perform no retry logic and no semantic
//! validation; that is the orchestrator's job.

mod anthropic;
mod google;
mod openai;

pub use anthropic::AnthropicProvider;
pub use google::GoogleProvider;
pub use openai::OpenAiProvider;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::error::Result;
use crate::types::AnalysisConfig;

/// Uniform interface to a text-analysis backend
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short backend identifier used in logs and question metadata
    fn name(&self) -> &'static str;

    /// Send system instructions + user payload, return the unwrapped
    /// response text
    async fn invoke(&self, system: &str, user: &str) -> Result<String>;

    /// Like [`invoke`](Provider::invoke), but requests a JSON object where
    /// the backend supports a structured-output mode. Backends without one
    /// rely on the system instructions alone.
    async fn invoke_json(&self, system: &str, user: &str) -> Result<String> {
        self.invoke(system, user).await
    }
}

/// Build the provider priority list from configured credentials.
///
/// Fixed order: Anthropic, then OpenAI, then Google. A missing key skips
/// that provider with a warning; an empty list degrades the orchestrator to
/// default-profile behavior, never a hard failure.
pub fn providers_from_config(config: &AnalysisConfig) -> Vec<Arc<dyn Provider>> {
    let mut providers: Vec<Arc<dyn Provider>> = Vec::new();

    match &config.anthropic_api_key {
        Some(key) => providers.push(Arc::new(AnthropicProvider::new(
            key.clone(),
            config.anthropic_model.clone(),
        ))),
        None => warn!("Brak klucza API Anthropic (ANTHROPIC_API_KEY), pomijam dostawcę"),
    }
    match &config.openai_api_key {
        Some(key) => providers.push(Arc::new(OpenAiProvider::new(
            key.clone(),
            config.openai_model.clone(),
        ))),
        None => warn!("Brak klucza API OpenAI (OPENAI_API_KEY), pomijam dostawcę"),
    }
    match &config.google_api_key {
        Some(key) => providers.push(Arc::new(GoogleProvider::new(
            key.clone(),
            config.google_model.clone(),
        ))),
        None => warn!("Brak klucza API Google (GOOGLE_API_KEY), pomijam dostawcę"),
    }

    providers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_builds_no_providers() {
        let providers = providers_from_config(&AnalysisConfig::default());
        assert!(providers.is_empty());
    }

    #[test]
    fn priority_order_is_anthropic_openai_google() {
        let config = AnalysisConfig {
            anthropic_api_key: Some("ak".to_string()),
            openai_api_key: Some("ok".to_string()),
            google_api_key: Some("gk".to_string()),
            ..AnalysisConfig::default()
        };
        let providers = providers_from_config(&config);
        let names: Vec<_> = providers.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["anthropic", "openai", "google"]);
    }

    #[test]
    fn missing_key_skips_provider() {
        let config = AnalysisConfig {
            openai_api_key: Some("ok".to_string()),
            ..AnalysisConfig::default()
        };
        let providers = providers_from_config(&config);
        let names: Vec<_> = providers.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["openai"]);
    }
}
