use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_SUMMARY_INSTRUCTION: &str =
    "Summarize this transcript in bullet points for a busy executive.";
pub const DEFAULT_UPLOAD_INSTRUCTION: &str =
    "Summarize this document in bullet points for a busy executive.";

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SummarizationRequest {
    #[validate(length(min = 20))]
    pub transcript: String,
    #[serde(default = "default_instruction")]
    #[validate(length(min = 10))]
    pub instruction: String,
}

impl SummarizationRequest {
    pub fn new(transcript: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            instruction: instruction.into(),
        }
    }

    pub fn with_default_instruction(transcript: impl Into<String>) -> Self {
        Self::new(transcript, DEFAULT_SUMMARY_INSTRUCTION)
    }
}

fn default_instruction() -> String {
    DEFAULT_SUMMARY_INSTRUCTION.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummarizationResponse {
    pub summary: String,
}
