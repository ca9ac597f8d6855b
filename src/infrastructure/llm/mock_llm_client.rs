use crate::application::ports::{LlmClient, LlmClientError};

/// Returns the same text for every prompt.
pub struct MockLlmClient {
    response: String,
}

impl MockLlmClient {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new("Mock summary")
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn generate(&self, _prompt: &str) -> Result<String, LlmClientError> {
        Ok(self.response.clone())
    }
}
