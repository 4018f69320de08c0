// src/core/decoder.rs
//
// Audio decoding. WAV files go through hound so the original sample
// encoding survives for the normalizer; other containers go through
// Symphonia, which hands back float samples directly.

use std::fs::File;
use std::path::Path;

use log::debug;
use symphonia::core::audio::SampleBuffer as SymphoniaBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;

/// Fatal per-file decode failures. Batch mode records these and moves on.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read WAV data: {0}")]
    Wav(#[from] hound::Error),
    #[error("failed to open file: {0}")]
    Open(std::io::Error),
    #[error("failed to probe file format (corrupted or unsupported): {0}")]
    Probe(#[source] symphonia::core::errors::Error),
    #[error("no supported audio track found in file")]
    NoTrack,
    #[error("file does not specify a sample rate")]
    MissingSampleRate,
    #[error("file reports zero audio channels")]
    NoChannels,
    #[error("decoder error: {0}")]
    Codec(#[from] symphonia::core::errors::Error),
    #[error("no audio samples decoded from file")]
    Empty,
}

/// Declared encoding of the decoded samples, before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleEncoding {
    Int16,
    Int32,
    Float32,
    Float64,
    /// Integer width with no canonical scaling rule (e.g. 8- or 24-bit WAV)
    Other(u16),
}

impl std::fmt::Display for SampleEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleEncoding::Int16 => write!(f, "16-bit integer"),
            SampleEncoding::Int32 => write!(f, "32-bit integer"),
            SampleEncoding::Float32 => write!(f, "32-bit float"),
            SampleEncoding::Float64 => write!(f, "64-bit float"),
            SampleEncoding::Other(bits) => write!(f, "{}-bit integer", bits),
        }
    }
}

/// Decoded samples in their source encoding, interleaved by frame.
#[derive(Debug, Clone)]
pub enum RawSamples {
    I16(Vec<i16>),
    I32(Vec<i32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
    Other { bits: u16, data: Vec<i32> },
}

impl RawSamples {
    pub fn len(&self) -> usize {
        match self {
            RawSamples::I16(v) => v.len(),
            RawSamples::I32(v) => v.len(),
            RawSamples::F32(v) => v.len(),
            RawSamples::F64(v) => v.len(),
            RawSamples::Other { data, .. } => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Output of the decode stage: raw samples plus stream parameters.
#[derive(Debug, Clone)]
pub struct RawAudio {
    pub samples: RawSamples,
    /// Number of audio channels (>= 1)
    pub channels: usize,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl RawAudio {
    pub fn encoding(&self) -> SampleEncoding {
        match &self.samples {
            RawSamples::I16(_) => SampleEncoding::Int16,
            RawSamples::I32(_) => SampleEncoding::Int32,
            RawSamples::F32(_) => SampleEncoding::Float32,
            RawSamples::F64(_) => SampleEncoding::Float64,
            RawSamples::Other { bits, .. } => SampleEncoding::Other(*bits),
        }
    }
}

/// Decode an audio file into raw interleaved samples.
pub fn decode_audio(path: &Path) -> Result<RawAudio, DecodeError> {
    let is_wav = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("wav"))
        .unwrap_or(false);

    if is_wav {
        decode_wav(path)
    } else {
        decode_with_symphonia(path)
    }
}

fn decode_wav(path: &Path) -> Result<RawAudio, DecodeError> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    if spec.channels == 0 {
        return Err(DecodeError::NoChannels);
    }
    if spec.sample_rate == 0 {
        return Err(DecodeError::MissingSampleRate);
    }

    let samples = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Float, _) => {
            let data: Result<Vec<f32>, _> = reader.samples::<f32>().collect();
            RawSamples::F32(data?)
        }
        (hound::SampleFormat::Int, 16) => {
            let data: Result<Vec<i16>, _> = reader.samples::<i16>().collect();
            RawSamples::I16(data?)
        }
        (hound::SampleFormat::Int, 32) => {
            let data: Result<Vec<i32>, _> = reader.samples::<i32>().collect();
            RawSamples::I32(data?)
        }
        (hound::SampleFormat::Int, bits) => {
            // 8- and 24-bit WAV come out as widened i32 values; let the
            // normalizer flag them rather than guessing a scale here.
            let data: Result<Vec<i32>, _> = reader.samples::<i32>().collect();
            RawSamples::Other { bits, data: data? }
        }
    };

    if samples.is_empty() {
        return Err(DecodeError::Empty);
    }

    debug!(
        "decoded WAV {}: {} Hz, {} ch, {} samples, {} bit",
        path.display(),
        spec.sample_rate,
        spec.channels,
        samples.len(),
        spec.bits_per_sample
    );

    Ok(RawAudio {
        samples,
        channels: spec.channels as usize,
        sample_rate: spec.sample_rate,
    })
}

fn decode_with_symphonia(path: &Path) -> Result<RawAudio, DecodeError> {
    let file = File::open(path).map_err(DecodeError::Open)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension() {
        hint.with_extension(ext.to_str().unwrap_or(""));
    }

    let meta_opts = MetadataOptions::default();
    let fmt_opts = FormatOptions::default();

    let mut probed = symphonia::default::get_probe()
        .format(&hint, mss, &fmt_opts, &meta_opts)
        .map_err(DecodeError::Probe)?;

    let track = probed
        .format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(DecodeError::NoTrack)?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or(DecodeError::MissingSampleRate)?;

    let channels = track.codec_params.channels.map(|c| c.count()).unwrap_or(2);
    if channels == 0 {
        return Err(DecodeError::NoChannels);
    }

    let dec_opts = DecoderOptions::default();
    let mut decoder = symphonia::default::get_codecs().make(&track.codec_params, &dec_opts)?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SymphoniaBuffer<f32>> = None;

    loop {
        let packet = match probed.format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break
            }
            Err(symphonia::core::errors::Error::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(buf) => buf,
            Err(symphonia::core::errors::Error::DecodeError(_)) => continue,
            Err(e) => return Err(e.into()),
        };

        if sample_buf.is_none() {
            let spec = *decoded.spec();
            let capacity = decoded.capacity() as u64;
            sample_buf = Some(SymphoniaBuffer::new(capacity, spec));
        }

        if let Some(ref mut buf) = sample_buf {
            buf.copy_interleaved_ref(decoded);
            samples.extend_from_slice(buf.samples());
        }
    }

    if samples.is_empty() {
        return Err(DecodeError::Empty);
    }

    debug!(
        "decoded {}: {} Hz, {} ch, {} samples (float)",
        path.display(),
        sample_rate,
        channels,
        samples.len()
    );

    Ok(RawAudio {
        samples: RawSamples::F32(samples),
        channels,
        sample_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_tags() {
        let audio = RawAudio {
            samples: RawSamples::I16(vec![0, 1]),
            channels: 1,
            sample_rate: 44100,
        };
        assert_eq!(audio.encoding(), SampleEncoding::Int16);

        let audio = RawAudio {
            samples: RawSamples::Other {
                bits: 24,
                data: vec![0],
            },
            channels: 1,
            sample_rate: 44100,
        };
        assert_eq!(audio.encoding(), SampleEncoding::Other(24));
        assert_eq!(audio.encoding().to_string(), "24-bit integer");
    }

    #[test]
    fn test_decode_missing_file() {
        let result = decode_audio(Path::new("/nonexistent/file.wav"));
        assert!(result.is_err());
    }
}
