use docx_rust::Docx;
use docx_rust::document::Paragraph;

use docsum::application::ports::{ExtractionError, TextExtractor};
use docsum::domain::FileKind;
use docsum::infrastructure::text_processing::DocxAdapter;

fn docx_fixture(paragraphs: &[&str]) -> Vec<u8> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixture.docx");

    let mut docx = Docx::default();
    for text in paragraphs {
        docx.document.push(Paragraph::default().push_text(*text));
    }
    docx.write_file(&path).unwrap();

    std::fs::read(&path).unwrap()
}

#[tokio::test]
async fn given_docx_with_paragraphs_when_extracting_then_joins_them_with_newlines() {
    let data = docx_fixture(&["Quarterly review", "Revenue grew 12%"]);

    let text = DocxAdapter::new()
        .extract_text(&data, FileKind::Docx)
        .await
        .unwrap();

    assert_eq!(text, "Quarterly review\nRevenue grew 12%");
}

#[tokio::test]
async fn given_bytes_that_are_not_a_zip_when_extracting_then_returns_format_error() {
    let result = DocxAdapter::new()
        .extract_text(b"plain bytes, no archive", FileKind::Docx)
        .await;

    let error = result.unwrap_err();
    assert!(matches!(error, ExtractionError::Format { kind: FileKind::Docx, .. }));
    assert!(error.to_string().starts_with("Error processing DOCX file"));
}
