// src/core/analysis/clipping.rs
//
// Clipping detection: samples at or beyond a near-full-scale amplitude.

use log::debug;
use serde::Serialize;

use super::runs::detect_runs;
use crate::core::buffer::SampleBuffer;

/// Amplitude at or above which a sample counts as clipped.
pub const CLIPPING_THRESHOLD: f64 = 0.99;

/// One contiguous clipped region, in seconds. No minimum length: even a
/// single clipped sample is reported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClippingInterval {
    pub start_time: f64,
    pub end_time: f64,
}

/// Clipping statistics for a whole buffer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClippingSummary {
    pub clipped_samples: usize,
    pub total_samples: usize,
    /// clipped / total; 0 for an empty buffer
    pub clip_ratio: f64,
    /// Time-ordered, non-overlapping clipped regions
    pub intervals: Vec<ClippingInterval>,
}

/// Count clipped frames and locate clipped regions.
///
/// A frame is clipped when any channel reaches the threshold (max fold
/// across channels); counts are per frame, not per channel sample.
pub fn detect_clipping(buffer: &SampleBuffer, threshold: f64) -> ClippingSummary {
    let levels = buffer.fold_max();
    let rate = buffer.sample_rate as f64;

    let total_samples = levels.len();
    let clipped_samples = levels.iter().filter(|&&l| l >= threshold).count();

    let intervals: Vec<ClippingInterval> = detect_runs(&levels, |level| level >= threshold)
        .into_iter()
        .map(|run| ClippingInterval {
            start_time: run.start as f64 / rate,
            end_time: run.end as f64 / rate,
        })
        .collect();

    if clipped_samples > 0 {
        debug!(
            "clipping scan: {} of {} frames at >= {:.2}, {} region(s)",
            clipped_samples,
            total_samples,
            threshold,
            intervals.len()
        );
    }

    ClippingSummary {
        clipped_samples,
        total_samples,
        clip_ratio: if total_samples > 0 {
            clipped_samples as f64 / total_samples as f64
        } else {
            0.0
        },
        intervals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mono(samples: Vec<f64>, rate: u32) -> SampleBuffer {
        SampleBuffer::new(samples, 1, rate)
    }

    #[test]
    fn test_clean_signal() {
        let samples: Vec<f64> = (0..1000).map(|i| (i as f64 / 50.0).sin() * 0.5).collect();
        let summary = detect_clipping(&mono(samples, 44100), CLIPPING_THRESHOLD);
        assert_eq!(summary.clipped_samples, 0);
        assert_eq!(summary.clip_ratio, 0.0);
        assert!(summary.intervals.is_empty());
    }

    #[test]
    fn test_fully_clipped_buffer() {
        let rate = 1000;
        let summary = detect_clipping(&mono(vec![1.0; 2000], rate), CLIPPING_THRESHOLD);
        assert_eq!(summary.clip_ratio, 1.0);
        assert_eq!(summary.intervals.len(), 1);
        assert_eq!(summary.intervals[0].start_time, 0.0);
        assert!((summary.intervals[0].end_time - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_sample_clip_reported() {
        let mut samples = vec![0.1; 1000];
        samples[500] = 1.0;
        let summary = detect_clipping(&mono(samples, 1000), CLIPPING_THRESHOLD);
        assert_eq!(summary.clipped_samples, 1);
        assert_eq!(summary.intervals.len(), 1);
        assert!((summary.intervals[0].start_time - 0.5).abs() < 1e-9);
        assert!((summary.intervals[0].end_time - 0.501).abs() < 1e-9);
    }

    #[test]
    fn test_negative_clipping_counts() {
        let samples = vec![-1.0; 100];
        let summary = detect_clipping(&mono(samples, 1000), CLIPPING_THRESHOLD);
        assert_eq!(summary.clip_ratio, 1.0);
    }

    #[test]
    fn test_empty_buffer_zero_ratio() {
        let summary = detect_clipping(&mono(Vec::new(), 44100), CLIPPING_THRESHOLD);
        assert_eq!(summary.total_samples, 0);
        assert_eq!(summary.clip_ratio, 0.0);
        assert!(summary.intervals.is_empty());
    }
}
