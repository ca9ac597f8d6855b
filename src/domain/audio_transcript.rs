/// Hard ceiling on accepted audio length: 30 minutes.
pub const MAX_AUDIO_DURATION_SECS: f64 = 1800.0;

#[derive(Debug, Clone, PartialEq)]
pub struct AudioTranscript {
    pub text: String,
    pub duration_secs: f64,
    /// `None` when the engine reports no confidence at all, which is not the
    /// same thing as a score of zero.
    pub confidence: Option<f32>,
}
