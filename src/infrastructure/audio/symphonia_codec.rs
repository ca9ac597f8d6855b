use std::fs::File;
use std::io::BufWriter;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{AudioCodec, AudioCodecError, DecodedAudio};

pub const CANONICAL_SAMPLE_RATE: u32 = 16_000;

/// Pure-Rust decoding through symphonia, resampling through rubato, WAV
/// output through hound.
#[derive(Default)]
pub struct SymphoniaCodec;

impl AudioCodec for SymphoniaCodec {
    fn decode(
        &self,
        source: File,
        extension: Option<&str>,
        max_duration_secs: f64,
    ) -> Result<DecodedAudio, AudioCodecError> {
        let mss = MediaSourceStream::new(Box::new(source), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = extension {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| AudioCodecError::DecodingFailed(format!("probe: {}", e)))?;

        let mut format = probed.format;

        let track = format
            .default_track()
            .ok_or_else(|| AudioCodecError::DecodingFailed("no audio track found".to_string()))?;

        let track_id = track.id;
        let codec_params = track.codec_params.clone();
        let sample_rate = codec_params
            .sample_rate
            .ok_or_else(|| AudioCodecError::DecodingFailed("unknown sample rate".to_string()))?;

        if let Some(frames) = codec_params.n_frames {
            let duration_secs = frames as f64 / sample_rate as f64;
            if duration_secs > max_duration_secs {
                return Err(AudioCodecError::DurationExceeded { duration_secs });
            }
        }
        let max_samples = (max_duration_secs * sample_rate as f64).floor() as usize;

        let mut decoder = symphonia::default::get_codecs()
            .make(&codec_params, &DecoderOptions::default())
            .map_err(|e| AudioCodecError::DecodingFailed(format!("codec: {}", e)))?;

        let mut samples: Vec<f32> = Vec::new();

        loop {
            let packet = match format.next_packet() {
                Ok(p) => p,
                Err(symphonia::core::errors::Error::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(symphonia::core::errors::Error::ResetRequired) => break,
                Err(e) => {
                    return Err(AudioCodecError::DecodingFailed(format!("packet: {}", e)));
                }
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(d) => d,
                Err(symphonia::core::errors::Error::DecodeError(e)) => {
                    tracing::warn!(error = %e, "Skipping corrupt audio frame");
                    continue;
                }
                Err(e) => {
                    return Err(AudioCodecError::DecodingFailed(format!("decode: {}", e)));
                }
            };

            let spec = *decoded.spec();
            let num_frames = decoded.frames();
            if num_frames == 0 {
                continue;
            }

            let channels = spec.channels.count().max(1);
            let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
            sample_buf.copy_interleaved_ref(decoded);

            // Downmix to mono
            if channels > 1 {
                for frame in sample_buf.samples().chunks(channels) {
                    samples.push(frame.iter().sum::<f32>() / channels as f32);
                }
            } else {
                samples.extend_from_slice(sample_buf.samples());
            }

            // Streams without a frame count in the header are cut off here.
            if samples.len() > max_samples {
                return Err(AudioCodecError::DurationExceeded {
                    duration_secs: samples.len() as f64 / sample_rate as f64,
                });
            }
        }

        if samples.is_empty() {
            return Err(AudioCodecError::DecodingFailed(
                "no audio samples decoded".to_string(),
            ));
        }

        let audio = DecodedAudio {
            samples,
            sample_rate,
        };

        tracing::debug!(
            sample_rate,
            duration_secs = audio.duration_secs(),
            "Audio decoded to mono PCM"
        );

        Ok(audio)
    }

    fn encode_canonical(&self, audio: &DecodedAudio, dest: File) -> Result<(), AudioCodecError> {
        let resampled;
        let samples = if audio.sample_rate == CANONICAL_SAMPLE_RATE {
            audio.samples.as_slice()
        } else {
            resampled = resample(&audio.samples, audio.sample_rate, CANONICAL_SAMPLE_RATE)?;
            resampled.as_slice()
        };

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: CANONICAL_SAMPLE_RATE,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::new(BufWriter::new(dest), spec)
            .map_err(|e| AudioCodecError::EncodingFailed(format!("wav header: {}", e)))?;

        for &sample in samples {
            let pcm = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer
                .write_sample(pcm)
                .map_err(|e| AudioCodecError::EncodingFailed(format!("wav sample: {}", e)))?;
        }

        writer
            .finalize()
            .map_err(|e| AudioCodecError::EncodingFailed(format!("wav finalize: {}", e)))
    }
}

const RESAMPLE_CHUNK: usize = 1024;

/// Band-limited sinc resampling of a mono signal. The filter delay is
/// trimmed from the front and the tail is flushed through the filter, so the
/// result is aligned with the input and exactly `len * to / from` frames long.
fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>, AudioCodecError> {
    use rubato::{
        Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
    };

    let resample_err = |e: &dyn std::fmt::Display| AudioCodecError::EncodingFailed(format!("resample: {}", e));

    let ratio = to_rate as f64 / from_rate as f64;
    let target_len = (samples.len() as f64 * ratio).round() as usize;

    let mut resampler = SincFixedIn::<f32>::new(
        ratio,
        1.0,
        SincInterpolationParameters {
            sinc_len: 128,
            f_cutoff: 0.92,
            interpolation: SincInterpolationType::Cubic,
            oversampling_factor: 128,
            window: WindowFunction::Blackman2,
        },
        RESAMPLE_CHUNK,
        1,
    )
    .map_err(|e| resample_err(&e))?;

    let delay = resampler.output_delay();
    let wanted = delay + target_len;
    let mut output = Vec::with_capacity(wanted + resampler.output_frames_max());

    let mut chunks = samples.chunks_exact(RESAMPLE_CHUNK);
    for chunk in &mut chunks {
        let frames = resampler.process(&[chunk], None).map_err(|e| resample_err(&e))?;
        output.extend_from_slice(&frames[0]);
    }

    let tail = chunks.remainder();
    if !tail.is_empty() {
        let frames = resampler
            .process_partial(Some(&[tail][..]), None)
            .map_err(|e| resample_err(&e))?;
        output.extend_from_slice(&frames[0]);
    }

    while output.len() < wanted {
        let frames = resampler
            .process_partial(None::<&[&[f32]]>, None)
            .map_err(|e| resample_err(&e))?;
        if frames[0].is_empty() {
            break;
        }
        output.extend_from_slice(&frames[0]);
    }

    output.drain(..delay.min(output.len()));
    output.truncate(target_len);

    Ok(output)
}
