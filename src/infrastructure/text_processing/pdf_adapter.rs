use std::time::Duration;

use async_trait::async_trait;
use lopdf::Document as PdfDocument;

use crate::application::ports::{ExtractionError, TextExtractor};
use crate::domain::FileKind;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract_pages(data: &[u8]) -> Result<String, ExtractionError> {
        let doc = PdfDocument::load_mem(data)
            .map_err(|e| ExtractionError::format(FileKind::Pdf, e))?;

        let mut text = String::new();
        for page_number in doc.get_pages().into_keys() {
            match doc.extract_text(&[page_number]) {
                Ok(page_text) => text.push_str(&page_text),
                Err(e) => {
                    tracing::warn!(page_number, error = %e, "Skipping unreadable PDF page");
                }
            }
            text.push('\n');
        }

        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl TextExtractor for PdfAdapter {
    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    async fn extract_text(&self, data: &[u8], kind: FileKind) -> Result<String, ExtractionError> {
        if kind != FileKind::Pdf {
            return Err(ExtractionError::UnsupportedKind(kind));
        }

        let data = data.to_vec();
        let text = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract_pages(&data)),
        )
        .await
        .map_err(|_| ExtractionError::format(FileKind::Pdf, "extraction timed out"))?
        .map_err(|e| ExtractionError::format(FileKind::Pdf, format!("task join error: {e}")))??;

        tracing::info!(chars = text.len(), "PDF text extraction complete");

        Ok(text)
    }
}
