use std::sync::Arc;

use crate::application::services::{AudioTranscriber, SummarizationService, UploadService};
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub upload_service: Arc<UploadService>,
    pub audio_transcriber: Arc<AudioTranscriber>,
    pub summarization_service: Arc<SummarizationService>,
    pub settings: Settings,
}
