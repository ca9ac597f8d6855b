mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    CorsSettings, LlmProvider, LlmSettings, LoggingSettings, ServerSettings, Settings,
    TranscriptionProvider, TranscriptionSettings,
};
