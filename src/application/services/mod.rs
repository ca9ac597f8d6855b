mod audio_transcriber;
mod summarization_service;
mod upload_service;

pub use audio_transcriber::{AudioProcessingError, AudioTranscriber};
pub use summarization_service::{SummarizationError, SummarizationService, build_prompt};
pub use upload_service::{UploadError, UploadService};
