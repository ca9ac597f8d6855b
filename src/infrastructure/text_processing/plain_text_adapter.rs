use async_trait::async_trait;

use crate::application::ports::{ExtractionError, TextExtractor};
use crate::domain::FileKind;

/// UTF-8 first, Latin-1 as the fallback.
pub struct PlainTextAdapter;

impl PlainTextAdapter {
    pub fn decode(data: &[u8]) -> String {
        let text = match std::str::from_utf8(data) {
            Ok(text) => text.to_string(),
            Err(e) => {
                tracing::debug!(error = %e, "Input is not UTF-8, decoding as Latin-1");
                decode_latin1(data)
            }
        };

        text.trim().to_string()
    }
}

// Every byte is a valid Latin-1 code point, so this never fails.
fn decode_latin1(data: &[u8]) -> String {
    data.iter().map(|&byte| char::from(byte)).collect()
}

#[async_trait]
impl TextExtractor for PlainTextAdapter {
    async fn extract_text(&self, data: &[u8], kind: FileKind) -> Result<String, ExtractionError> {
        if kind != FileKind::Txt {
            return Err(ExtractionError::UnsupportedKind(kind));
        }

        Ok(Self::decode(data))
    }
}
