use std::sync::Arc;

use crate::application::ports::LlmClient;
use crate::presentation::config::{LlmProvider, LlmSettings};

use super::gemini_client::GeminiClient;
use super::openai_client::OpenAiClient;

pub fn create_llm_client(settings: &LlmSettings) -> Arc<dyn LlmClient> {
    let api_key = settings.api_key.clone();
    let model = settings.model.clone();
    let base_url = settings.base_url.clone();

    match settings.provider {
        LlmProvider::Gemini => Arc::new(GeminiClient::new(api_key, model, base_url)),
        LlmProvider::OpenAi => Arc::new(OpenAiClient::new(api_key, model, base_url)),
    }
}
