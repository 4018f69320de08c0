// src/core/normalize.rs
//
// Amplitude normalization: map raw decoded samples into [-1.0, 1.0].

use log::warn;

use super::buffer::SampleBuffer;
use super::decoder::{RawAudio, RawSamples};

/// Normalize raw decoded samples to canonical [-1.0, 1.0] doubles.
///
/// Scaling rules: 16-bit integers divide by 32768, 32-bit integers by
/// 2147483648, floats pass through unchanged. Any other encoding passes
/// through unscaled and returns a warning; amplitudes may then land
/// outside [-1, 1], which downstream stages report as clipping rather
/// than clamp.
///
/// Never fails.
pub fn normalize(raw: RawAudio) -> (SampleBuffer, Option<String>) {
    let encoding = raw.encoding();
    let mut warning = None;

    let samples: Vec<f64> = match raw.samples {
        RawSamples::I16(data) => data.into_iter().map(|s| s as f64 / 32768.0).collect(),
        RawSamples::I32(data) => data.into_iter().map(|s| s as f64 / 2147483648.0).collect(),
        RawSamples::F32(data) => data.into_iter().map(|s| s as f64).collect(),
        RawSamples::F64(data) => data,
        RawSamples::Other { data, .. } => {
            warn!("unusual sample encoding: {}", encoding);
            warning = Some(format!("Unusual sample encoding: {}", encoding));
            data.into_iter().map(|s| s as f64).collect()
        }
    };

    (
        SampleBuffer::new(samples, raw.channels, raw.sample_rate),
        warning,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(samples: RawSamples, channels: usize) -> RawAudio {
        RawAudio {
            samples,
            channels,
            sample_rate: 44100,
        }
    }

    #[test]
    fn test_normalize_i16() {
        let (buf, warning) = normalize(raw(RawSamples::I16(vec![i16::MIN, 0, 16384]), 1));
        assert!(warning.is_none());
        assert!((buf.samples[0] - -1.0).abs() < 1e-12);
        assert_eq!(buf.samples[1], 0.0);
        assert!((buf.samples[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_i32() {
        let (buf, warning) = normalize(raw(RawSamples::I32(vec![i32::MIN, 1 << 30]), 1));
        assert!(warning.is_none());
        assert!((buf.samples[0] - -1.0).abs() < 1e-12);
        assert!((buf.samples[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_float_passthrough() {
        let (buf, warning) = normalize(raw(RawSamples::F32(vec![0.25, -0.75]), 1));
        assert!(warning.is_none());
        assert!((buf.samples[0] - 0.25).abs() < 1e-7);
        assert!((buf.samples[1] - -0.75).abs() < 1e-7);
    }

    #[test]
    fn test_unusual_encoding_warns_but_passes_through() {
        let (buf, warning) = normalize(raw(
            RawSamples::Other {
                bits: 24,
                data: vec![1 << 22],
            },
            1,
        ));
        let warning = warning.expect("24-bit input should warn");
        assert!(warning.contains("24-bit"));
        // Unscaled: way outside [-1, 1], reported instead of clamped
        assert!(buf.samples[0] > 1.0);
    }
}
