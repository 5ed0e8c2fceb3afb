use super::resample::{resample_linear, to_mono};
use crate::error::DecodeError;
use hound::WavReader;
use std::io::Cursor;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

/// Sample rate the speech pipeline expects.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Decoded audio, always mono.
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

/// Audio-decoding service.
pub trait AudioDecoder: Send + Sync {
    /// Decode container bytes into mono samples at the pipeline rate.
    fn decode(&self, bytes: &[u8]) -> Result<DecodedAudio, DecodeError>;
}

/// Default decoder: hound for RIFF/WAV bytes, symphonia probe for
/// everything else (M4A, MP3, FLAC, OGG, ...).
#[derive(Debug, Clone)]
pub struct SymphoniaDecoder {
    target_sample_rate: u32,
}

impl SymphoniaDecoder {
    pub fn new(target_sample_rate: u32) -> Self {
        Self { target_sample_rate }
    }
}

impl Default for SymphoniaDecoder {
    fn default() -> Self {
        Self::new(TARGET_SAMPLE_RATE)
    }
}

impl AudioDecoder for SymphoniaDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedAudio, DecodeError> {
        let (samples, sample_rate, channels) = if bytes.starts_with(b"RIFF") {
            decode_wav(bytes)?
        } else {
            decode_probed(bytes)?
        };

        debug!(
            "decoded {} samples at {}Hz, {} channel(s)",
            samples.len(),
            sample_rate,
            channels
        );

        let mono = to_mono(&samples, channels);
        let samples = resample_linear(&mono, sample_rate, self.target_sample_rate);

        Ok(DecodedAudio {
            samples,
            sample_rate: self.target_sample_rate,
        })
    }
}

fn decode_wav(bytes: &[u8]) -> Result<(Vec<f32>, u32, usize), DecodeError> {
    let reader =
        WavReader::new(Cursor::new(bytes)).map_err(|e| DecodeError::Format(e.to_string()))?;

    let spec = reader.spec();
    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DecodeError::Codec(e.to_string()))?,
        hound::SampleFormat::Int => {
            let max_val = (1u32 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| DecodeError::Codec(e.to_string()))?
        }
    };

    Ok((samples, spec.sample_rate, spec.channels as usize))
}

fn decode_probed(bytes: &[u8]) -> Result<(Vec<f32>, u32, usize), DecodeError> {
    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes.to_vec())), Default::default());

    let probed = symphonia::default::get_probe()
        .format(
            &Hint::new(),
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| DecodeError::Format(e.to_string()))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(DecodeError::NoAudioTrack)?;

    let track_id = track.id;
    let sample_rate = track.codec_params.sample_rate.unwrap_or(44_100);
    let channels = track.codec_params.channels.map(|c| c.count()).unwrap_or(1);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| DecodeError::Codec(e.to_string()))?;

    let mut samples = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(DecodeError::Codec(e.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder
            .decode(&packet)
            .map_err(|e| DecodeError::Codec(e.to_string()))?;
        let spec = *decoded.spec();

        let mut sample_buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);
        samples.extend_from_slice(sample_buf.samples());
    }

    Ok((samples, sample_rate, channels))
}
