use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::path::PathBuf;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::domain::MAX_AUDIO_DURATION_SECS;

use super::environment::Environment;

/// Layered configuration: built-in defaults, then
/// `appsettings.<environment>.{toml,yaml,json}` if present, then `APP_*`
/// environment variables with `__` between nested keys
/// (e.g. `APP_SERVER__PORT=9000`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub cors: CorsSettings,
    pub llm: LlmSettings,
    pub transcription: TranscriptionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_size_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionProvider {
    Local,
    #[serde(rename = "openai")]
    OpenAi,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    pub provider: TranscriptionProvider,
    /// Falls back to the provider's stock model when unset.
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub max_duration_secs: f64,
    pub scratch_dir: Option<PathBuf>,
    pub preload_model: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Settings {
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins"),
            )
            .build()?;

        let mut settings: Settings = config.try_deserialize()?;
        settings.apply_provider_key_fallbacks();
        Ok(settings)
    }

    /// Honours the conventional provider variables when no key was configured.
    fn apply_provider_key_fallbacks(&mut self) {
        if self.llm.api_key.is_none() {
            let var = match self.llm.provider {
                LlmProvider::Gemini => "GOOGLE_API_KEY",
                LlmProvider::OpenAi => "OPENAI_API_KEY",
            };
            self.llm.api_key = std::env::var(var).ok();
        }

        if self.transcription.api_key.is_none()
            && self.transcription.provider == TranscriptionProvider::OpenAi
        {
            self.transcription.api_key = std::env::var("OPENAI_API_KEY").ok();
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let ip: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.max_upload_size_mb.saturating_mul(1024 * 1024)
    }
}

impl LlmSettings {
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }
}

impl TranscriptionSettings {
    pub fn scratch_dir(&self) -> PathBuf {
        self.scratch_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            max_upload_size_mb: 100,
        }
    }
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Gemini,
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            base_url: None,
        }
    }
}

impl TranscriptionSettings {
    /// Hugging Face repo id for the local engine, API model name for OpenAI.
    pub fn model_id(&self) -> &str {
        match self.model.as_deref().map(str::trim) {
            Some(model) if !model.is_empty() => model,
            _ => match self.provider {
                TranscriptionProvider::Local => "openai/whisper-base",
                TranscriptionProvider::OpenAi => "whisper-1",
            },
        }
    }
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            provider: TranscriptionProvider::Local,
            model: None,
            api_key: None,
            base_url: None,
            max_duration_secs: MAX_AUDIO_DURATION_SECS,
            scratch_dir: None,
            preload_model: false,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}
