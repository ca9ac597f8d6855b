mod composite_extractor;
mod docx_adapter;
mod pdf_adapter;
mod plain_text_adapter;

pub use composite_extractor::CompositeExtractor;
pub use docx_adapter::DocxAdapter;
pub use pdf_adapter::PdfAdapter;
pub use plain_text_adapter::PlainTextAdapter;
