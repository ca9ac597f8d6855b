use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::application::ports::{Transcription, TranscriptionEngine, TranscriptionError};
use crate::infrastructure::llm::OPENAI_BASE_URL;

/// Hosted Whisper via `/audio/transcriptions`. Requests `verbose_json` so the
/// per-segment log probabilities can be turned into a confidence score.
pub struct OpenAiWhisperEngine {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
}

#[derive(Deserialize)]
struct VerboseTranscription {
    text: String,
    #[serde(default)]
    segments: Vec<Segment>,
}

#[derive(Deserialize)]
struct Segment {
    avg_logprob: f32,
}

impl OpenAiWhisperEngine {
    pub fn new(api_key: String, base_url: Option<String>, model: String) -> Self {
        let base_url = base_url.unwrap_or_else(|| OPENAI_BASE_URL.to_string());
        Self {
            client: reqwest::Client::new(),
            api_key,
            endpoint: format!("{}/audio/transcriptions", base_url.trim_end_matches('/')),
            model,
        }
    }

    fn form(&self, wav: Vec<u8>) -> Result<Form, TranscriptionError> {
        let file = Part::bytes(wav)
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {e}")))?;

        Ok(Form::new()
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .part("file", file))
    }
}

#[async_trait]
impl TranscriptionEngine for OpenAiWhisperEngine {
    #[tracing::instrument(skip(self), fields(model = %self.model))]
    async fn transcribe(&self, wav_path: &Path) -> Result<Transcription, TranscriptionError> {
        let wav = tokio::fs::read(wav_path)
            .await
            .map_err(|e| TranscriptionError::UnsupportedFormat(format!("read wav: {e}")))?;

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .multipart(self.form(wav)?)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "HTTP {status}: {body}"
            )));
        }

        let parsed: VerboseTranscription = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("response body: {e}")))?;

        let confidence = segment_confidence(&parsed.segments);
        tracing::info!(
            chars = parsed.text.len(),
            segments = parsed.segments.len(),
            confidence = ?confidence,
            "Hosted transcription completed"
        );

        Ok(Transcription {
            text: parsed.text.trim().to_string(),
            confidence,
        })
    }
}

/// `exp` of the mean segment log probability, or `None` without segments.
fn segment_confidence(segments: &[Segment]) -> Option<f32> {
    if segments.is_empty() {
        return None;
    }
    let mean = segments.iter().map(|s| s.avg_logprob).sum::<f32>() / segments.len() as f32;
    Some(mean.exp().clamp(0.0, 1.0))
}
