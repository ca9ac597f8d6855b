use std::io::Cursor;

use async_trait::async_trait;
use docx_rust::DocxFile;
use docx_rust::document::BodyContent;

use crate::application::ports::{ExtractionError, TextExtractor};
use crate::domain::FileKind;

/// Flattens the top-level paragraphs of a Word document, one per line.
/// Tables, headers and footers are not visited.
#[derive(Default)]
pub struct DocxAdapter;

impl DocxAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract_paragraphs(data: Vec<u8>) -> Result<String, ExtractionError> {
        let file = DocxFile::from_reader(Cursor::new(data))
            .map_err(|e| ExtractionError::format(FileKind::Docx, format!("{e:?}")))?;
        let docx = file
            .parse()
            .map_err(|e| ExtractionError::format(FileKind::Docx, format!("{e:?}")))?;

        let mut text = String::new();
        for content in &docx.document.body.content {
            if let BodyContent::Paragraph(paragraph) = content {
                text.push_str(&paragraph.text());
                text.push('\n');
            }
        }

        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl TextExtractor for DocxAdapter {
    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    async fn extract_text(&self, data: &[u8], kind: FileKind) -> Result<String, ExtractionError> {
        if kind != FileKind::Docx {
            return Err(ExtractionError::UnsupportedKind(kind));
        }

        let data = data.to_vec();
        let text = tokio::task::spawn_blocking(move || Self::extract_paragraphs(data))
            .await
            .map_err(|e| {
                ExtractionError::format(FileKind::Docx, format!("task join error: {e}"))
            })??;

        tracing::info!(chars = text.len(), "DOCX text extraction complete");

        Ok(text)
    }
}
