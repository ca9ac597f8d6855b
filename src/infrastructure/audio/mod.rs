mod candle_whisper_engine;
mod openai_whisper_engine;
mod symphonia_codec;
mod transcription_engine_factory;

pub use candle_whisper_engine::CandleWhisperEngine;
pub use openai_whisper_engine::OpenAiWhisperEngine;
pub use symphonia_codec::{CANONICAL_SAMPLE_RATE, SymphoniaCodec};
pub use transcription_engine_factory::TranscriptionEngineFactory;
