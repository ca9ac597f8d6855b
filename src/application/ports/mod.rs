mod audio_codec;
mod llm_client;
mod text_extractor;
mod transcription_engine;

pub use audio_codec::{AudioCodec, AudioCodecError, DecodedAudio};
pub use llm_client::{LlmClient, LlmClientError};
pub use text_extractor::{ExtractionError, TextExtractor};
pub use transcription_engine::{
    EngineLoader, Transcription, TranscriptionEngine, TranscriptionError,
};
