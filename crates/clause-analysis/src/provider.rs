//! Model provider trait

use async_trait::async_trait;
use thiserror::Error;

/// Reasons a provider rejected or could not serve a request.
///
/// Every variant makes the client move on to the next configured model.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("API key not found: set the {0} environment variable")]
    MissingApiKey(String),

    #[error("HTTP error {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Response contained no text: {0}")]
    EmptyResponse(String),

    #[error("{0}")]
    Other(String),
}

/// A hosted text-generation service addressed by model identifier
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Send `prompt` to `model` and return the raw response text
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderError>;

    /// Short name used in logs
    fn name(&self) -> &str {
        "provider"
    }
}
