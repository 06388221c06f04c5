//! Google Gemini provider

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::provider::{ModelProvider, ProviderError};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// `generateContent` client for the Gemini API
pub struct GeminiProvider {
    client: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
    api_key_env: String,
    json_mode: bool,
}

impl GeminiProvider {
    pub fn new(api_base: impl Into<String>, api_key: Option<String>) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("clearclause/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ProviderError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            json_mode: true,
        })
    }

    /// Read the key from the named environment variable.
    ///
    /// A missing key is not an error here; each request then fails with
    /// [`ProviderError::MissingApiKey`] so the caller gets a normal failed
    /// analysis instead of a crash.
    pub fn from_env(api_base: impl Into<String>, api_key_env: &str) -> Result<Self, ProviderError> {
        let api_key = std::env::var(api_key_env).ok();
        let mut provider = Self::new(api_base, api_key)?;
        provider.api_key_env = api_key_env.to_string();
        Ok(provider)
    }

    /// Ask the service to return `application/json` directly
    pub fn with_json_mode(mut self, json_mode: bool) -> Self {
        self.json_mode = json_mode;
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.api_base, model)
    }

    fn request_body(&self, prompt: &str) -> Value {
        let mut body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }]
        });
        if self.json_mode {
            body["generationConfig"] = serde_json::json!({
                "responseMimeType": "application/json"
            });
        }
        body
    }
}

/// Concatenate the text parts of the first candidate
fn candidate_text(response: &Value) -> Option<String> {
    let parts = response
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|arr| arr.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.trim().is_empty() { None } else { Some(text) }
}

#[async_trait]
impl ModelProvider for GeminiProvider {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::MissingApiKey(self.api_key_env.clone()))?;

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", api_key)
            .json(&self.request_body(prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Rejected { status, body });
        }

        let json: Value = response.json().await?;

        candidate_text(&json).ok_or_else(|| {
            let reason = json
                .pointer("/promptFeedback/blockReason")
                .or_else(|| json.pointer("/candidates/0/finishReason"))
                .and_then(|r| r.as_str())
                .unwrap_or("no candidates returned");
            ProviderError::EmptyResponse(reason.to_string())
        })
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
