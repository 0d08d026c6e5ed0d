//! Google Gemini generateContent adapter

use async_trait::async_trait;

use crate::error::{ReflektaError, Result};
use crate::provider::Provider;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GoogleProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GoogleProvider {
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
impl Provider for GoogleProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn invoke(&self, system: &str, user: &str) -> Result<String> {
        if self.api_key.trim().is_empty() {
            return Err(ReflektaError::ProviderUnavailable(
                "no Google API key configured".to_string(),
            ));
        }
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "system_instruction": {"parts": [{"text": system}]},
                "contents": [
                    {"role": "user", "parts": [{"text": user}]}
                ],
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ReflektaError::Provider {
                provider: "google",
                message: format!("API error {status}: {body}"),
                status: Some(status),
            });
        }

        let data: serde_json::Value = response.json().await?;
        let text = data["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| ReflektaError::Provider {
                provider: "google",
                message: "unexpected response envelope".to_string(),
                status: None,
            })?;

        Ok(text.trim().to_string())
    }
}
