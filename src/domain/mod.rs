mod audio_transcript;
mod file_kind;
mod summarization;
mod uploaded_file;

pub use audio_transcript::{AudioTranscript, MAX_AUDIO_DURATION_SECS};
pub use file_kind::FileKind;
pub use summarization::{
    DEFAULT_SUMMARY_INSTRUCTION, DEFAULT_UPLOAD_INSTRUCTION, SummarizationRequest,
    SummarizationResponse,
};
pub use uploaded_file::{ExtractedText, UploadedFile};
