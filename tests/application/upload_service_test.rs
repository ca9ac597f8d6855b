use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;

use docsum::application::ports::{ExtractionError, TextExtractor};
use docsum::application::services::{UploadError, UploadService};
use docsum::domain::{FileKind, UploadedFile};

use crate::helpers::{StubCodec, StubEngine, counting_loader, transcriber};

struct CountingExtractor {
    text: &'static str,
    calls: AtomicUsize,
}

impl CountingExtractor {
    fn new(text: &'static str) -> Self {
        Self {
            text,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl TextExtractor for CountingExtractor {
    async fn extract_text(&self, _data: &[u8], _kind: FileKind) -> Result<String, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.text.to_string())
    }
}

fn service(
    extractor: Arc<CountingExtractor>,
    engine: Arc<StubEngine>,
    scratch: &tempfile::TempDir,
) -> UploadService {
    let (loader, _) = counting_loader(engine);
    UploadService::new(
        extractor,
        Arc::new(transcriber(StubCodec::new(), loader, scratch.path().to_path_buf())),
    )
}

fn upload(filename: &str, media_type: &str) -> UploadedFile {
    UploadedFile::new(filename, media_type, Bytes::from_static(b"payload"))
}

#[tokio::test]
async fn given_unknown_media_type_when_extracting_then_no_extractor_runs() {
    let scratch = tempfile::tempdir().unwrap();
    let extractor = Arc::new(CountingExtractor::new("text"));
    let engine = Arc::new(StubEngine::new("audio", None));
    let service = service(Arc::clone(&extractor), Arc::clone(&engine), &scratch);

    let result = service.extract(upload("sheet.xlsx", "application/vnd.ms-excel")).await;

    assert!(matches!(result, Err(UploadError::UnsupportedType(m)) if m == "application/vnd.ms-excel"));
    assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn given_whitespace_only_extraction_when_extracting_then_returns_empty_content() {
    let scratch = tempfile::tempdir().unwrap();
    let extractor = Arc::new(CountingExtractor::new(" \n\t "));
    let service = service(extractor, Arc::new(StubEngine::new("audio", None)), &scratch);

    let result = service.extract(upload("blank.pdf", "application/pdf")).await;

    assert!(matches!(result, Err(UploadError::EmptyContent(name)) if name == "blank.pdf"));
}

#[tokio::test]
async fn given_document_when_extracting_then_tags_canonical_kind() {
    let scratch = tempfile::tempdir().unwrap();
    let extractor = Arc::new(CountingExtractor::new("Body text"));
    let service = service(
        Arc::clone(&extractor),
        Arc::new(StubEngine::new("audio", None)),
        &scratch,
    );

    let extracted = service
        .extract(upload(
            "report.docx",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ))
        .await
        .unwrap();

    assert_eq!(extracted.kind, FileKind::Docx);
    assert_eq!(extracted.content, "Body text");
    assert_eq!(extracted.filename, "report.docx");
    assert_eq!(extractor.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn given_audio_when_extracting_then_routes_to_transcriber() {
    let scratch = tempfile::tempdir().unwrap();
    let extractor = Arc::new(CountingExtractor::new("unused"));
    let engine = Arc::new(StubEngine::new(" spoken words ", Some(0.7)));
    let service = service(Arc::clone(&extractor), Arc::clone(&engine), &scratch);

    let extracted = service.extract(upload("memo.wav", "audio/x-wav")).await.unwrap();

    assert_eq!(extracted.kind, FileKind::Wav);
    assert_eq!(extracted.content, "spoken words");
    assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
    assert_eq!(engine.calls(), 1);
}
