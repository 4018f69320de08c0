// src/core/analysis/loudness.rs
//
// RMS, peak, and derived dB metrics over all samples and channels.

use serde::Serialize;

use crate::core::buffer::SampleBuffer;

/// Offset subtracted from RMS dB to approximate perceived loudness.
///
/// This is a deliberate simplification, not a standards-compliant loudness
/// measurement (no frequency weighting is applied). The offset is part of
/// the tool's contract; do not tune it.
pub const LOUDNESS_OFFSET_DB: f64 = 3.0;

/// Loudness measurements for a whole buffer, in dBFS where noted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoudnessMetrics {
    /// RMS level; -inf for an all-zero signal
    pub rms_db: f64,
    /// Peak level; -inf for an all-zero signal
    pub peak_db: f64,
    /// Peak absolute amplitude, linear
    pub peak_amplitude: f64,
    /// Approximate loudness: rms_db minus a fixed offset
    pub loudness_estimate: f64,
    /// Crest factor peak_db - rms_db; +inf when rms is zero but peak is
    /// not, -inf for an all-zero signal
    pub dynamic_range: f64,
}

/// Convert a linear amplitude to dB relative to full scale.
/// Non-positive amplitudes map to negative infinity; never panics.
pub fn db_from_amplitude(amplitude: f64) -> f64 {
    if amplitude > 0.0 {
        20.0 * amplitude.log10()
    } else {
        f64::NEG_INFINITY
    }
}

/// Root-mean-square amplitude; 0 for an empty slice.
pub fn rms(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f64).sqrt()
}

/// Maximum absolute amplitude; 0 for an empty slice.
pub fn peak_amplitude(samples: &[f64]) -> f64 {
    samples.iter().map(|s| s.abs()).fold(0.0f64, f64::max)
}

/// Measure loudness over all samples and channels combined.
pub fn measure_loudness(buffer: &SampleBuffer) -> LoudnessMetrics {
    let rms = rms(&buffer.samples);
    let rms_db = db_from_amplitude(rms);

    let peak = peak_amplitude(&buffer.samples);
    let peak_db = db_from_amplitude(peak);

    let loudness_estimate = if rms > 0.0 {
        rms_db - LOUDNESS_OFFSET_DB
    } else {
        f64::NEG_INFINITY
    };

    // All-zero signals get -inf, distinct from the +inf case where only
    // the RMS is zero.
    let dynamic_range = if rms > 0.0 {
        peak_db - rms_db
    } else if peak > 0.0 {
        f64::INFINITY
    } else {
        f64::NEG_INFINITY
    };

    LoudnessMetrics {
        rms_db,
        peak_db,
        peak_amplitude: peak,
        loudness_estimate,
        dynamic_range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_conversion() {
        assert!((db_from_amplitude(1.0) - 0.0).abs() < 1e-12);
        assert!((db_from_amplitude(0.5) - -6.0206).abs() < 0.001);
        assert!((db_from_amplitude(0.1) - -20.0).abs() < 1e-9);
        assert_eq!(db_from_amplitude(0.0), f64::NEG_INFINITY);
        assert_eq!(db_from_amplitude(-0.5), f64::NEG_INFINITY);
    }

    #[test]
    fn test_rms_square_wave() {
        let samples = vec![1.0, -1.0, 1.0, -1.0];
        assert!((rms(&samples) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_all_zero_buffer_sentinels() {
        let buf = SampleBuffer::new(vec![0.0; 1000], 1, 44100);
        let m = measure_loudness(&buf);
        assert_eq!(m.rms_db, f64::NEG_INFINITY);
        assert_eq!(m.peak_db, f64::NEG_INFINITY);
        assert_eq!(m.peak_amplitude, 0.0);
        assert_eq!(m.loudness_estimate, f64::NEG_INFINITY);
        assert_eq!(m.dynamic_range, f64::NEG_INFINITY);
    }

    #[test]
    fn test_constant_half_amplitude() {
        let buf = SampleBuffer::new(vec![0.5; 1000], 1, 44100);
        let m = measure_loudness(&buf);
        // Constant signal: rms == peak, so crest factor is 0
        assert!((m.rms_db - m.peak_db).abs() < 1e-9);
        assert!(m.dynamic_range.abs() < 1e-9);
        assert!((m.peak_db - -6.0206).abs() < 0.001);
        assert!((m.loudness_estimate - (m.rms_db - 3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_loudness_offset_is_fixed() {
        let buf = SampleBuffer::new(vec![0.1, -0.1, 0.1, -0.1], 1, 44100);
        let m = measure_loudness(&buf);
        assert!((m.loudness_estimate - (m.rms_db - 3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_empty_buffer() {
        let buf = SampleBuffer::new(Vec::new(), 1, 44100);
        let m = measure_loudness(&buf);
        assert_eq!(m.rms_db, f64::NEG_INFINITY);
        assert_eq!(m.dynamic_range, f64::NEG_INFINITY);
    }
}
