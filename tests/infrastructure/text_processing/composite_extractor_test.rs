use std::sync::Arc;

use docsum::application::ports::{ExtractionError, TextExtractor};
use docsum::domain::FileKind;
use docsum::infrastructure::text_processing::{CompositeExtractor, PlainTextAdapter};

#[tokio::test]
async fn given_registered_kind_when_extracting_then_delegates_to_adapter() {
    let extractor = CompositeExtractor::with_document_adapters();

    let text = extractor
        .extract_text(b"  delegated text ", FileKind::Txt)
        .await
        .unwrap();

    assert_eq!(text, "delegated text");
}

#[tokio::test]
async fn given_audio_kind_when_extracting_then_returns_unsupported() {
    let extractor = CompositeExtractor::with_document_adapters();

    let result = extractor.extract_text(b"RIFF", FileKind::Wav).await;

    assert!(matches!(
        result,
        Err(ExtractionError::UnsupportedKind(FileKind::Wav))
    ));
}

#[tokio::test]
async fn given_partial_registry_when_extracting_unlisted_kind_then_returns_unsupported() {
    let txt: Arc<dyn TextExtractor> = Arc::new(PlainTextAdapter);
    let extractor = CompositeExtractor::new(vec![(FileKind::Txt, txt)]);

    let result = extractor.extract_text(b"%PDF-1.5", FileKind::Pdf).await;

    assert!(matches!(
        result,
        Err(ExtractionError::UnsupportedKind(FileKind::Pdf))
    ));
}
