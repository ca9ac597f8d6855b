use std::sync::Arc;

use validator::{Validate, ValidationErrors};

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::SummarizationRequest;
use crate::infrastructure::observability::sanitize_prompt;

pub struct SummarizationService {
    llm_client: Arc<dyn LlmClient>,
}

#[derive(Debug, thiserror::Error)]
pub enum SummarizationError {
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] ValidationErrors),
    #[error("generation: {0}")]
    Generation(#[from] LlmClientError),
}

impl SummarizationService {
    pub fn new(llm_client: Arc<dyn LlmClient>) -> Self {
        Self { llm_client }
    }

    /// One call to the model per request; the response comes back verbatim.
    #[tracing::instrument(skip_all, fields(transcript_chars = request.transcript.chars().count()))]
    pub async fn summarize(
        &self,
        request: &SummarizationRequest,
    ) -> Result<String, SummarizationError> {
        request.validate()?;

        tracing::debug!(instruction = %sanitize_prompt(&request.instruction), "Summarizing");

        let prompt = build_prompt(&request.instruction, &request.transcript);
        let summary = self.llm_client.generate(&prompt).await?;

        tracing::info!(summary_chars = summary.len(), "Summary generated");

        Ok(summary)
    }
}

pub fn build_prompt(instruction: &str, transcript: &str) -> String {
    format!(
        "Your task is to process the text transcript provided below based on a specific instruction.\n\
         \n\
         Instruction:\n\
         \"{instruction}\"\n\
         \n\
         Transcript:\n\
         ---\n\
         {transcript}\n\
         ---\n\
         \n\
         Now, generate the response that fulfills the instruction.\n"
    )
}
