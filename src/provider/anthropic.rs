//! Anthropic Messages API adapter

use async_trait::async_trait;

use crate::error::{ReflektaError, Result};
use crate::provider::Provider;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1000;
const TEMPERATURE: f64 = 0.2;

pub struct AnthropicProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl AnthropicProvider {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model,
        }
    }

    /// Override the API endpoint (proxies, test servers)
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn invoke(&self, system: &str, user: &str) -> Result<String> {
        if self.api_key.trim().is_empty() {
            return Err(ReflektaError::ProviderUnavailable(
                "no Anthropic API key configured".to_string(),
            ));
        }
        let url = format!("{}/messages", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&serde_json::json!({
                "model": self.model,
                "max_tokens": MAX_TOKENS,
                "temperature": TEMPERATURE,
                "system": system,
                "messages": [
                    {"role": "user", "content": user}
                ],
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ReflektaError::Provider {
                provider: "anthropic",
                message: format!("API error {status}: {body}"),
                status: Some(status),
            });
        }

        let data: serde_json::Value = response.json().await?;
        let text = data["content"][0]["text"].as_str().ok_or_else(|| {
            ReflektaError::Provider {
                provider: "anthropic",
                message: "unexpected response envelope".to_string(),
                status: None,
            }
        })?;

        Ok(text.trim().to_string())
    }
}
