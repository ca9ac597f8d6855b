use async_trait::async_trait;

use crate::domain::FileKind;

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, data: &[u8], kind: FileKind) -> Result<String, ExtractionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("no extractor registered for {0} files")]
    UnsupportedKind(FileKind),
    #[error("Error processing {} file: {reason}", .kind.label())]
    Format { kind: FileKind, reason: String },
}

impl ExtractionError {
    pub fn format(kind: FileKind, reason: impl ToString) -> Self {
        Self::Format {
            kind,
            reason: reason.to_string(),
        }
    }
}
