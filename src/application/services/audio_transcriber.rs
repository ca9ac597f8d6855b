use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::NamedTempFile;
use tokio::sync::OnceCell;

use crate::application::ports::{
    AudioCodec, AudioCodecError, EngineLoader, TranscriptionEngine, TranscriptionError,
};
use crate::domain::{AudioTranscript, FileKind};

/// Turns uploaded audio into text.
///
/// The uploaded bytes and the canonical transcode each live in a
/// [`NamedTempFile`] inside `scratch_dir`, owned by the call that created
/// them, so both are unlinked on every exit path including early returns and
/// a dropped request future.
///
/// The transcription engine is loaded at most once per transcriber and then
/// shared by every request.
pub struct AudioTranscriber {
    codec: Arc<dyn AudioCodec>,
    loader: EngineLoader,
    engine: OnceCell<Arc<dyn TranscriptionEngine>>,
    scratch_dir: PathBuf,
    max_duration_secs: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum AudioProcessingError {
    #[error("audio is {duration_secs:.1}s long, limit is {max_duration_secs:.0}s")]
    DurationExceeded {
        duration_secs: f64,
        max_duration_secs: f64,
    },
    #[error("scratch file: {0}")]
    ScratchFile(#[source] std::io::Error),
    #[error("decoding: {0}")]
    Decoding(#[source] AudioCodecError),
    #[error("transcoding: {0}")]
    Transcoding(#[source] AudioCodecError),
    #[error("engine initialization: {0}")]
    EngineInit(#[source] TranscriptionError),
    #[error("transcription: {0}")]
    Transcription(#[source] TranscriptionError),
    #[error("background task: {0}")]
    Task(String),
}

impl AudioTranscriber {
    pub fn new(
        codec: Arc<dyn AudioCodec>,
        loader: EngineLoader,
        scratch_dir: PathBuf,
        max_duration_secs: f64,
    ) -> Self {
        Self {
            codec,
            loader,
            engine: OnceCell::new(),
            scratch_dir,
            max_duration_secs,
        }
    }

    /// Forces the one-time engine load ahead of the first request.
    pub async fn warm_up(&self) -> Result<(), AudioProcessingError> {
        self.engine().await.map(|_| ())
    }

    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    pub async fn transcribe(
        &self,
        data: &[u8],
        filename: &str,
        kind: FileKind,
    ) -> Result<AudioTranscript, AudioProcessingError> {
        let extension = source_extension(filename, kind);

        let mut source = self.scratch_file(&format!(".{extension}"))?;
        source
            .write_all(data)
            .and_then(|_| source.as_file().sync_data())
            .map_err(AudioProcessingError::ScratchFile)?;
        let canonical = self.scratch_file(".wav")?;

        let source_handle = source.reopen().map_err(AudioProcessingError::ScratchFile)?;
        let canonical_handle = canonical
            .reopen()
            .map_err(AudioProcessingError::ScratchFile)?;
        let codec = Arc::clone(&self.codec);
        let max_duration_secs = self.max_duration_secs;

        let duration_secs = tokio::task::spawn_blocking(move || {
            let audio = codec
                .decode(source_handle, Some(extension.as_str()), max_duration_secs)
                .map_err(|e| match e {
                    AudioCodecError::DurationExceeded { duration_secs } => {
                        AudioProcessingError::DurationExceeded {
                            duration_secs,
                            max_duration_secs,
                        }
                    }
                    e => AudioProcessingError::Decoding(e),
                })?;

            let duration_secs = audio.duration_secs();
            if duration_secs > max_duration_secs {
                return Err(AudioProcessingError::DurationExceeded {
                    duration_secs,
                    max_duration_secs,
                });
            }

            codec
                .encode_canonical(&audio, canonical_handle)
                .map_err(AudioProcessingError::Transcoding)?;

            Ok(duration_secs)
        })
        .await
        .map_err(|e| AudioProcessingError::Task(e.to_string()))??;

        tracing::debug!(duration_secs, "Audio transcoded to canonical WAV");

        let engine = self.engine().await?;
        let transcription = engine
            .transcribe(canonical.path())
            .await
            .map_err(AudioProcessingError::Transcription)?;

        release(source);
        release(canonical);

        tracing::info!(
            duration_secs,
            chars = transcription.text.len(),
            confidence = ?transcription.confidence,
            "Audio transcription completed"
        );

        Ok(AudioTranscript {
            text: transcription.text.trim().to_string(),
            duration_secs,
            confidence: transcription.confidence,
        })
    }

    async fn engine(&self) -> Result<Arc<dyn TranscriptionEngine>, AudioProcessingError> {
        let engine = self
            .engine
            .get_or_try_init(|| async {
                tracing::info!("Loading transcription engine");
                let loader = Arc::clone(&self.loader);
                let engine = tokio::task::spawn_blocking(move || loader())
                    .await
                    .map_err(|e| AudioProcessingError::Task(e.to_string()))?
                    .map_err(AudioProcessingError::EngineInit)?;
                tracing::info!("Transcription engine ready");
                Ok::<_, AudioProcessingError>(engine)
            })
            .await?;

        Ok(Arc::clone(engine))
    }

    fn scratch_file(&self, suffix: &str) -> Result<NamedTempFile, AudioProcessingError> {
        tempfile::Builder::new()
            .prefix("docsum-")
            .suffix(suffix)
            .tempfile_in(&self.scratch_dir)
            .map_err(AudioProcessingError::ScratchFile)
    }
}

fn source_extension(filename: &str, kind: FileKind) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_else(|| kind.as_str().to_string())
}

fn release(file: NamedTempFile) {
    let path = file.path().to_path_buf();
    if let Err(e) = file.close() {
        tracing::warn!(path = %path.display(), error = %e, "Failed to remove scratch file");
    }
}
