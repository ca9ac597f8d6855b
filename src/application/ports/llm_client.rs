use async_trait::async_trait;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// One completion for one prompt. The model's text comes back as-is.
    async fn generate(&self, prompt: &str) -> Result<String, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("no API key configured for the summarization model")]
    MissingApiKey,
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
