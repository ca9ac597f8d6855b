use bytes::Bytes;

use super::file_kind::FileKind;

/// Raw upload as it arrived on the wire. Dropped once extraction is done.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub media_type: String,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, media_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            filename: filename.into(),
            media_type: media_type.into(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedText {
    pub content: String,
    pub filename: String,
    pub kind: FileKind,
}
