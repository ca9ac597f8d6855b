use std::sync::Arc;

use crate::application::ports::{EngineLoader, TranscriptionEngine, TranscriptionError};
use crate::presentation::config::{TranscriptionProvider, TranscriptionSettings};

use super::candle_whisper_engine::CandleWhisperEngine;
use super::openai_whisper_engine::OpenAiWhisperEngine;

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    /// Builds the configured engine. For the local provider this downloads
    /// or memory-maps the weights, which is slow, so callers go through
    /// [`TranscriptionEngineFactory::loader`] instead of calling it at startup.
    pub fn create(
        settings: &TranscriptionSettings,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        tracing::info!(
            provider = ?settings.provider,
            model = %settings.model_id(),
            "Building transcription engine"
        );

        let engine: Arc<dyn TranscriptionEngine> = match settings.provider {
            TranscriptionProvider::Local => Arc::new(CandleWhisperEngine::new(settings.model_id())?),
            TranscriptionProvider::OpenAi => {
                let api_key = settings
                    .api_key
                    .clone()
                    .filter(|key| !key.trim().is_empty())
                    .ok_or_else(|| {
                        TranscriptionError::ModelLoadFailed(
                            "transcription.api_key is required for the openai provider"
                                .to_string(),
                        )
                    })?;
                Arc::new(OpenAiWhisperEngine::new(
                    api_key,
                    settings.base_url.clone(),
                    settings.model_id().to_string(),
                ))
            }
        };

        Ok(engine)
    }

    /// Captures the settings now and defers [`TranscriptionEngineFactory::create`]
    /// until the first audio request.
    pub fn loader(settings: &TranscriptionSettings) -> EngineLoader {
        let settings = settings.clone();
        Arc::new(move || Self::create(&settings))
    }
}
