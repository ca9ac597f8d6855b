use std::sync::Arc;

use crate::application::ports::{ExtractionError, TextExtractor};
use crate::domain::{ExtractedText, FileKind, UploadedFile};

use super::audio_transcriber::{AudioProcessingError, AudioTranscriber};

/// Validates an upload against the allow-list and routes it to the matching
/// extractor or to the audio transcriber.
pub struct UploadService {
    documents: Arc<dyn TextExtractor>,
    transcriber: Arc<AudioTranscriber>,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("unsupported media type: {0}")]
    UnsupportedType(String),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error("audio: {0}")]
    Audio(#[from] AudioProcessingError),
    #[error("no text content extracted from {0}")]
    EmptyContent(String),
}

impl UploadService {
    pub fn new(documents: Arc<dyn TextExtractor>, transcriber: Arc<AudioTranscriber>) -> Self {
        Self {
            documents,
            transcriber,
        }
    }

    #[tracing::instrument(
        skip(self, file),
        fields(filename = %file.filename, media_type = %file.media_type, bytes = file.data.len())
    )]
    pub async fn extract(&self, file: UploadedFile) -> Result<ExtractedText, UploadError> {
        let kind = FileKind::from_mime(&file.media_type)
            .ok_or_else(|| UploadError::UnsupportedType(file.media_type.clone()))?;

        let content = if kind.is_audio() {
            self.transcriber
                .transcribe(&file.data, &file.filename, kind)
                .await?
                .text
        } else {
            self.documents.extract_text(&file.data, kind).await?
        };

        if content.trim().is_empty() {
            return Err(UploadError::EmptyContent(file.filename));
        }

        tracing::info!(kind = %kind, chars = content.len(), "Text extracted from upload");

        Ok(ExtractedText {
            content,
            filename: file.filename,
            kind,
        })
    }
}
