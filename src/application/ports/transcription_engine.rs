use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub struct Transcription {
    pub text: String,
    pub confidence: Option<f32>,
}

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// Transcribes a canonical 16 kHz mono WAV file.
    async fn transcribe(&self, wav_path: &Path) -> Result<Transcription, TranscriptionError>;
}

/// Builds the engine on first use. Runs on the blocking pool since local
/// models load weights from disk.
pub type EngineLoader =
    Arc<dyn Fn() -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
}
