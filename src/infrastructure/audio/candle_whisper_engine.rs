use std::path::Path;

use async_trait::async_trait;
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;
use tokio::sync::Mutex;

use crate::application::ports::{Transcription, TranscriptionEngine, TranscriptionError};

use super::symphonia_codec::CANONICAL_SAMPLE_RATE;

const MAX_TOKENS_PER_SEGMENT: usize = 224;

/// Whisper running in-process on CPU. Weights come from the Hugging Face hub
/// cache; the decoder's KV cache makes inference stateful, hence the mutex.
pub struct CandleWhisperEngine {
    model: Mutex<m::model::Whisper>,
    tokenizer: Tokenizer,
    config: Config,
    device: Device,
    mel_filters: Vec<f32>,
}

struct SegmentOutput {
    text: String,
    log_probs: Vec<f32>,
}

impl CandleWhisperEngine {
    pub fn new(model_id: &str) -> Result<Self, TranscriptionError> {
        let device = Device::Cpu;

        tracing::info!(
            device = ?device,
            model = model_id,
            "Initializing Candle Whisper transcription engine"
        );

        let api = Api::new().map_err(|e| TranscriptionError::ModelLoadFailed(e.to_string()))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("config.json: {}", e)))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer.json: {}", e)))?;
        let weights_path = repo.get("model.safetensors").map_err(|e| {
            TranscriptionError::ModelLoadFailed(format!("model.safetensors: {}", e))
        })?;

        let config_contents = std::fs::read_to_string(&config_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("read config: {}", e)))?;
        let config: Config = serde_json::from_str(&config_contents)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("parse config: {}", e)))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer: {}", e)))?;

        let mel_filters = mel_filterbank(config.num_mel_bins);

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], m::DTYPE, &device)
                .map_err(|e| TranscriptionError::ModelLoadFailed(format!("weights: {}", e)))?
        };

        let model = m::model::Whisper::load(&vb, config.clone())
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("model: {}", e)))?;

        tracing::info!("Candle Whisper engine loaded successfully");

        Ok(Self {
            model: Mutex::new(model),
            tokenizer,
            config,
            device,
            mel_filters,
        })
    }

    /// Splits canonical PCM into 30 s windows, zero-padding the last one, and
    /// turns each into a `(1, n_mel, frames)` log-mel tensor.
    fn mel_segments(&self, pcm: &[f32]) -> Result<Vec<Tensor>, TranscriptionError> {
        let n_mel = self.config.num_mel_bins;

        pcm.chunks(m::N_SAMPLES)
            .map(|chunk| {
                let mut window = chunk.to_vec();
                window.resize(m::N_SAMPLES, 0.0);

                let mel = m::audio::pcm_to_mel(&self.config, &window, &self.mel_filters);
                let frames = mel.len() / n_mel;
                Tensor::from_vec(mel, (1, n_mel, frames), &self.device)
                    .map_err(inference_error("mel tensor"))
            })
            .collect()
    }
}

#[async_trait]
impl TranscriptionEngine for CandleWhisperEngine {
    async fn transcribe(&self, wav_path: &Path) -> Result<Transcription, TranscriptionError> {
        let pcm = read_canonical_wav(wav_path)?;
        let mel_segments = self.mel_segments(&pcm)?;

        let mut model = self.model.lock().await;
        let mut segments: Vec<String> = Vec::new();
        let mut log_probs: Vec<f32> = Vec::new();

        // Inference is CPU-bound for seconds per segment.
        tokio::task::block_in_place(|| {
            for (i, mel_tensor) in mel_segments.iter().enumerate() {
                tracing::debug!(segment = i, "Transcribing audio segment");
                let output =
                    decode_segment(&mut model, &self.tokenizer, &self.device, mel_tensor)?;
                if !output.text.is_empty() {
                    segments.push(output.text);
                }
                log_probs.extend(output.log_probs);
            }
            Ok::<_, TranscriptionError>(())
        })?;

        let text = segments.join(" ");
        let confidence = mean_probability(&log_probs);

        tracing::info!(
            segments = segments.len(),
            chars = text.len(),
            confidence = ?confidence,
            "Whisper transcription completed"
        );

        Ok(Transcription { text, confidence })
    }
}

fn read_canonical_wav(path: &Path) -> Result<Vec<f32>, TranscriptionError> {
    let mut reader = hound::WavReader::open(path)
        .map_err(|e| TranscriptionError::UnsupportedFormat(format!("wav: {}", e)))?;

    let spec = reader.spec();
    if spec.sample_rate != CANONICAL_SAMPLE_RATE || spec.channels != 1 {
        return Err(TranscriptionError::UnsupportedFormat(format!(
            "expected {} Hz mono, got {} Hz with {} channels",
            CANONICAL_SAMPLE_RATE, spec.sample_rate, spec.channels
        )));
    }

    reader
        .samples::<i16>()
        .map(|s| s.map(|v| v as f32 / i16::MAX as f32))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| TranscriptionError::UnsupportedFormat(format!("wav samples: {}", e)))
}

/// Geometric mean of per-token probabilities.
fn mean_probability(log_probs: &[f32]) -> Option<f32> {
    if log_probs.is_empty() {
        return None;
    }
    let mean = log_probs.iter().sum::<f32>() / log_probs.len() as f32;
    Some(mean.exp().clamp(0.0, 1.0))
}

fn decode_segment(
    model: &mut m::model::Whisper,
    tokenizer: &Tokenizer,
    device: &Device,
    mel: &Tensor,
) -> Result<SegmentOutput, TranscriptionError> {
    let sot_token = token_id(tokenizer, m::SOT_TOKEN)?;
    let transcribe_token = token_id(tokenizer, m::TRANSCRIBE_TOKEN)?;
    let no_timestamps_token = token_id(tokenizer, m::NO_TIMESTAMPS_TOKEN)?;
    let eot_token = token_id(tokenizer, m::EOT_TOKEN)?;

    let audio_features = model
        .encoder
        .forward(mel, true)
        .map_err(inference_error("encoder"))?;

    let prompt = [sot_token, transcribe_token, no_timestamps_token];
    let mut tokens = prompt.to_vec();
    let mut log_probs = Vec::new();

    for _ in 0..MAX_TOKENS_PER_SEGMENT {
        let first_step = tokens.len() == prompt.len();
        let token_tensor = Tensor::new(tokens.as_slice(), device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(inference_error("token tensor"))?;

        let last_logits = model
            .decoder
            .forward(&token_tensor, &audio_features, first_step)
            .and_then(|hidden| hidden.squeeze(0))
            .and_then(|hidden| model.decoder.final_linear(&hidden))
            .and_then(|logits| {
                let seq_len = logits.dim(0)?;
                logits.get(seq_len - 1)
            })
            .map_err(inference_error("decoder"))?;

        let next_token = last_logits
            .argmax(0)
            .and_then(|t| t.to_scalar::<u32>())
            .map_err(inference_error("argmax"))?;

        if next_token == eot_token {
            break;
        }

        let log_prob = candle_nn::ops::log_softmax(&last_logits, 0)
            .and_then(|lp| lp.get(next_token as usize))
            .and_then(|lp| lp.to_scalar::<f32>())
            .map_err(inference_error("log prob"))?;

        log_probs.push(log_prob);
        tokens.push(next_token);
    }

    model.reset_kv_cache();

    let text = tokenizer
        .decode(&tokens[prompt.len()..], true)
        .map_err(|e| TranscriptionError::TranscriptionFailed(format!("detokenize: {}", e)))?;

    Ok(SegmentOutput {
        text: text.trim().to_string(),
        log_probs,
    })
}

fn inference_error(stage: &'static str) -> impl Fn(candle_core::Error) -> TranscriptionError {
    move |e| TranscriptionError::TranscriptionFailed(format!("{stage}: {e}"))
}

fn token_id(tokenizer: &Tokenizer, token: &str) -> Result<u32, TranscriptionError> {
    tokenizer.token_to_id(token).ok_or_else(|| {
        TranscriptionError::TranscriptionFailed(format!("token not found: {}", token))
    })
}

// Slaney mel scale: linear below 1 kHz, logarithmic above.
const MEL_LINEAR_HZ_PER_MEL: f64 = 200.0 / 3.0;
const MEL_LOG_START_HZ: f64 = 1000.0;
const MEL_LOG_START: f64 = MEL_LOG_START_HZ / MEL_LINEAR_HZ_PER_MEL;

fn mel_log_step() -> f64 {
    6.4_f64.ln() / 27.0
}

fn hz_to_mel(hz: f64) -> f64 {
    if hz >= MEL_LOG_START_HZ {
        MEL_LOG_START + (hz / MEL_LOG_START_HZ).ln() / mel_log_step()
    } else {
        hz / MEL_LINEAR_HZ_PER_MEL
    }
}

fn mel_to_hz(mel: f64) -> f64 {
    if mel >= MEL_LOG_START {
        MEL_LOG_START_HZ * (mel_log_step() * (mel - MEL_LOG_START)).exp()
    } else {
        mel * MEL_LINEAR_HZ_PER_MEL
    }
}

/// Area-normalised triangular filters spanning 0 Hz to Nyquist, laid out
/// row-major as `(num_mel_bins, N_FFT / 2 + 1)` for `pcm_to_mel`. Built from
/// the model config so 80- and 128-band checkpoints both get a matching bank.
fn mel_filterbank(num_mel_bins: usize) -> Vec<f32> {
    let n_freqs = m::N_FFT / 2 + 1;
    let nyquist = CANONICAL_SAMPLE_RATE as f64 / 2.0;
    let fft_freqs: Vec<f64> = (0..n_freqs)
        .map(|bin| bin as f64 * nyquist / (n_freqs - 1) as f64)
        .collect();

    let max_mel = hz_to_mel(nyquist);
    let edges: Vec<f64> = (0..num_mel_bins + 2)
        .map(|i| mel_to_hz(max_mel * i as f64 / (num_mel_bins + 1) as f64))
        .collect();

    let mut filters = Vec::with_capacity(num_mel_bins * n_freqs);
    for band in edges.windows(3) {
        let (lower, centre, upper) = (band[0], band[1], band[2]);
        let norm = 2.0 / (upper - lower);
        filters.extend(fft_freqs.iter().map(|&freq| {
            let rising = (freq - lower) / (centre - lower);
            let falling = (upper - freq) / (upper - centre);
            (rising.min(falling).max(0.0) * norm) as f32
        }));
    }

    filters
}
