use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{ExtractionError, TextExtractor};
use crate::domain::FileKind;

use super::docx_adapter::DocxAdapter;
use super::pdf_adapter::PdfAdapter;
use super::plain_text_adapter::PlainTextAdapter;

pub struct CompositeExtractor {
    adapters: HashMap<FileKind, Arc<dyn TextExtractor>>,
}

impl CompositeExtractor {
    pub fn new(adapters: Vec<(FileKind, Arc<dyn TextExtractor>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }

    /// PDF, DOCX and plain text.
    pub fn with_document_adapters() -> Self {
        let pdf: Arc<dyn TextExtractor> = Arc::new(PdfAdapter::new());
        let docx: Arc<dyn TextExtractor> = Arc::new(DocxAdapter::new());
        let txt: Arc<dyn TextExtractor> = Arc::new(PlainTextAdapter);

        Self::new(vec![
            (FileKind::Pdf, pdf),
            (FileKind::Docx, docx),
            (FileKind::Txt, txt),
        ])
    }
}

#[async_trait]
impl TextExtractor for CompositeExtractor {
    async fn extract_text(&self, data: &[u8], kind: FileKind) -> Result<String, ExtractionError> {
        let adapter = self
            .adapters
            .get(&kind)
            .ok_or(ExtractionError::UnsupportedKind(kind))?;

        adapter.extract_text(data, kind).await
    }
}
