// src/core/buffer.rs
//
// Normalized sample storage shared by every analysis stage.

/// Decoded audio normalized to [-1.0, 1.0], interleaved by frame.
///
/// Immutable once built by the normalizer; every analysis stage reads from
/// the same buffer and none of them mutate it.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    /// Interleaved samples, `frames * channels` long
    pub samples: Vec<f64>,
    /// Number of audio channels (>= 1)
    pub channels: usize,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl SampleBuffer {
    pub fn new(samples: Vec<f64>, channels: usize, sample_rate: u32) -> Self {
        debug_assert!(channels >= 1);
        Self {
            samples,
            channels,
            sample_rate,
        }
    }

    /// Number of sample frames (one per channel per frame)
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Per-frame maximum absolute amplitude across channels.
    ///
    /// This is the fold used by run detection: a frame is silent only if
    /// every channel is below threshold, and clipped if any channel is
    /// at or above it.
    pub fn fold_max(&self) -> Vec<f64> {
        self.samples
            .chunks(self.channels)
            .map(|frame| frame.iter().fold(0.0f64, |acc, s| acc.max(s.abs())))
            .collect()
    }

    /// Per-frame unweighted mean across channels (mono fold for spectral
    /// analysis; intentionally distinct from `fold_max`).
    pub fn fold_mean(&self) -> Vec<f64> {
        self.samples
            .chunks(self.channels)
            .map(|frame| frame.iter().sum::<f64>() / self.channels as f64)
            .collect()
    }
}
