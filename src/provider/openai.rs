//! OpenAI Chat Completions adapter
//!
//! Also works against OpenAI-compatible endpoints via `with_base_url`.

use async_trait::async_trait;

use crate::error::{ReflektaError, Result};
use crate::provider::Provider;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiProvider {
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
impl Provider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn invoke(&self, system: &str, user: &str) -> Result<String> {
        self.chat(system, user, false).await
    }

    async fn invoke_json(&self, system: &str, user: &str) -> Result<String> {
        self.chat(system, user, true).await
    }
}

impl OpenAiProvider {
    async fn chat(&self, system: &str, user: &str, json_mode: bool) -> Result<String> {
        if self.api_key.trim().is_empty() {
            return Err(ReflektaError::ProviderUnavailable(
                "no OpenAI API key configured".to_string(),
            ));
        }
        let url = format!("{}/chat/completions", self.base_url);

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user}
            ],
        });
        if json_mode {
            body["response_format"] = serde_json::json!({"type": "json_object"});
        }

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ReflektaError::Provider {
                provider: "openai",
                message: format!("API error {status}: {body}"),
                status: Some(status),
            });
        }

        let data: serde_json::Value = response.json().await?;
        let text = data["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| ReflektaError::Provider {
                provider: "openai",
                message: "unexpected response envelope".to_string(),
                status: None,
            })?;

        Ok(text.trim().to_string())
    }
}
