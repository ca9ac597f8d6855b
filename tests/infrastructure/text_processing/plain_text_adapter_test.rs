use docsum::application::ports::{ExtractionError, TextExtractor};
use docsum::domain::FileKind;
use docsum::infrastructure::text_processing::PlainTextAdapter;

#[tokio::test]
async fn given_valid_utf8_bytes_when_extracting_then_returns_trimmed_string() {
    let adapter = PlainTextAdapter;

    let result = adapter
        .extract_text("  Grüße aus Köln\n".as_bytes(), FileKind::Txt)
        .await;

    assert_eq!(result.unwrap(), "Grüße aus Köln");
}

#[tokio::test]
async fn given_latin1_bytes_when_extracting_then_falls_back_instead_of_failing() {
    let adapter = PlainTextAdapter;
    // "café" in Latin-1
    let bytes: &[u8] = &[0x63, 0x61, 0x66, 0xE9];

    let result = adapter.extract_text(bytes, FileKind::Txt).await;

    assert_eq!(result.unwrap(), "café");
}

#[tokio::test]
async fn given_non_text_kind_when_extracting_then_returns_unsupported() {
    let adapter = PlainTextAdapter;

    let result = adapter.extract_text(b"some data", FileKind::Pdf).await;

    assert!(matches!(
        result,
        Err(ExtractionError::UnsupportedKind(FileKind::Pdf))
    ));
}
