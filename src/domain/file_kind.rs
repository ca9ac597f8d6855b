use std::fmt;

use serde::Serialize;

/// Canonical short tag for every media type the service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Pdf,
    Docx,
    Txt,
    Wav,
    Mp3,
}

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

impl FileKind {
    /// Looks a declared media type up in the allow-list.
    ///
    /// Parameters such as `; charset=utf-8` are ignored and the comparison is
    /// case-insensitive. Anything not listed yields `None`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "application/pdf" => Some(Self::Pdf),
            DOCX_MIME => Some(Self::Docx),
            "text/plain" => Some(Self::Txt),
            "audio/wav" | "audio/x-wav" => Some(Self::Wav),
            "audio/mpeg" | "audio/mp3" => Some(Self::Mp3),
            _ => None,
        }
    }

    /// Same as [`FileKind::from_mime`] but only admits audio kinds.
    pub fn from_audio_mime(mime: &str) -> Option<Self> {
        Self::from_mime(mime).filter(|kind| kind.is_audio())
    }

    pub fn is_audio(&self) -> bool {
        matches!(self, Self::Wav | Self::Mp3)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Txt => "txt",
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
        }
    }

    /// Upper-case label used in user-facing error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
            Self::Txt => "TXT",
            Self::Wav => "WAV",
            Self::Mp3 => "MP3",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
