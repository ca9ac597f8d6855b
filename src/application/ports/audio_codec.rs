use std::fs::File;

/// Mono PCM at the source sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl DecodedAudio {
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Decodes arbitrary containers and re-encodes to the canonical waveform the
/// transcription engines accept (16 kHz mono 16-bit PCM WAV).
///
/// Both operations are blocking and run on the blocking pool.
pub trait AudioCodec: Send + Sync {
    /// Stops with [`AudioCodecError::DurationExceeded`] as soon as the stream
    /// is known to run longer than `max_duration_secs`, so oversized input is
    /// never fully expanded in memory.
    fn decode(
        &self,
        source: File,
        extension: Option<&str>,
        max_duration_secs: f64,
    ) -> Result<DecodedAudio, AudioCodecError>;

    fn encode_canonical(&self, audio: &DecodedAudio, dest: File) -> Result<(), AudioCodecError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioCodecError {
    #[error("audio runs at least {duration_secs:.1}s")]
    DurationExceeded { duration_secs: f64 },
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("audio encoding failed: {0}")]
    EncodingFailed(String),
}
