// src/core/assess.rs
//
// Quality assessment: combine stage outputs into a structured result plus
// advisory warnings from fixed threshold rules.

use std::path::PathBuf;

use serde::Serialize;

use super::analysis::{ClippingSummary, LoudnessMetrics, SilenceEvent};

/// Silence longer than this is flagged, in seconds.
pub const LONG_SILENCE_SEC: f64 = 2.0;

/// Peak level above this is flagged as near 0 dB.
pub const NEAR_CLIP_PEAK_DB: f64 = -0.5;

/// Clip ratio above this (0.1%) is flagged.
pub const CLIP_RATIO_WARN: f64 = 0.001;

/// Dynamic range bounds, in dB.
pub const LOW_DYNAMIC_RANGE_DB: f64 = 3.0;
pub const HIGH_DYNAMIC_RANGE_DB: f64 = 25.0;

/// Loudness estimate bounds.
pub const QUIET_LOUDNESS_DB: f64 = -30.0;
pub const LOUD_LOUDNESS_DB: f64 = -6.0;

/// Complete analysis result for a single file. Built once, never mutated
/// by the engine; the reporter and batch summary consume it.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub filename: String,
    pub sample_rate: u32,
    /// Duration in seconds
    pub duration: f64,
    pub channels: usize,
    pub silence_events: Vec<SilenceEvent>,
    pub loudness: LoudnessMetrics,
    pub clipping: ClippingSummary,
    /// Path of the rendered analysis image, when one was produced
    pub spectrum_path: Option<PathBuf>,
    /// Advisory warnings in fixed rule order
    pub warnings: Vec<String>,
}

/// File identity handed to the assessor alongside the stage outputs.
#[derive(Debug, Clone)]
pub struct FileInfo {
    pub filename: String,
    pub sample_rate: u32,
    pub duration: f64,
    pub channels: usize,
}

/// Run the fixed heuristic rules and assemble the final result.
///
/// Every rule is evaluated; none raises. Warnings appear in rule order,
/// after any normalization warning from the decode stage.
pub fn assess(
    info: FileInfo,
    silence_events: Vec<SilenceEvent>,
    loudness: LoudnessMetrics,
    clipping: ClippingSummary,
    encoding_warning: Option<String>,
) -> AnalysisResult {
    let mut warnings = Vec::new();

    if let Some(w) = encoding_warning {
        warnings.push(w);
    }

    let max_silence = silence_events
        .iter()
        .map(|e| e.duration)
        .fold(0.0f64, f64::max);
    if max_silence > LONG_SILENCE_SEC {
        warnings.push(format!("Long silence detected: {:.1}s", max_silence));
    }

    if loudness.peak_db > NEAR_CLIP_PEAK_DB {
        warnings.push("Audio is very close to 0dB (potential clipping)".to_string());
    }

    if clipping.clip_ratio > CLIP_RATIO_WARN {
        warnings.push(format!(
            "Clipping detected: {:.2}% of samples",
            clipping.clip_ratio * 100.0
        ));
    }

    // Infinite dynamic range (digital silence aside from isolated peaks)
    // trips the upper threshold.
    if loudness.dynamic_range < LOW_DYNAMIC_RANGE_DB {
        warnings.push("Low dynamic range (over-compressed?)".to_string());
    } else if loudness.dynamic_range > HIGH_DYNAMIC_RANGE_DB {
        warnings.push("High dynamic range (may need compression)".to_string());
    }

    if loudness.loudness_estimate < QUIET_LOUDNESS_DB {
        warnings.push("Audio is very quiet".to_string());
    } else if loudness.loudness_estimate > LOUD_LOUDNESS_DB {
        warnings.push("Audio is very loud".to_string());
    }

    AnalysisResult {
        filename: info.filename,
        sample_rate: info.sample_rate,
        duration: info.duration,
        channels: info.channels,
        silence_events,
        loudness,
        clipping,
        spectrum_path: None,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> FileInfo {
        FileInfo {
            filename: "test.wav".to_string(),
            sample_rate: 44100,
            duration: 1.0,
            channels: 1,
        }
    }

    fn quiet_metrics() -> LoudnessMetrics {
        LoudnessMetrics {
            rms_db: -12.0,
            peak_db: -6.0,
            peak_amplitude: 0.5,
            loudness_estimate: -15.0,
            dynamic_range: 6.0,
        }
    }

    fn no_clipping() -> ClippingSummary {
        ClippingSummary {
            clipped_samples: 0,
            total_samples: 44100,
            clip_ratio: 0.0,
            intervals: Vec::new(),
        }
    }

    #[test]
    fn test_clean_result_has_no_warnings() {
        let result = assess(info(), Vec::new(), quiet_metrics(), no_clipping(), None);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_long_silence_warning() {
        let events = vec![SilenceEvent {
            start_time: 0.0,
            end_time: 2.5,
            duration: 2.5,
        }];
        let result = assess(info(), events, quiet_metrics(), no_clipping(), None);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("Long silence"));
        assert!(result.warnings[0].contains("2.5s"));
    }

    #[test]
    fn test_silence_below_two_seconds_not_flagged() {
        let events = vec![SilenceEvent {
            start_time: 0.0,
            end_time: 0.6,
            duration: 0.6,
        }];
        let result = assess(info(), events, quiet_metrics(), no_clipping(), None);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_clip_ratio_warning_with_percentage() {
        let clipping = ClippingSummary {
            clipped_samples: 100,
            total_samples: 50000,
            clip_ratio: 0.002,
            intervals: Vec::new(),
        };
        let result = assess(info(), Vec::new(), quiet_metrics(), clipping, None);
        assert!(result.warnings.iter().any(|w| w.contains("Clipping detected")));
        assert!(result.warnings.iter().any(|w| w.contains("0.20%")));
    }

    #[test]
    fn test_infinite_dynamic_range_trips_upper_threshold() {
        let metrics = LoudnessMetrics {
            dynamic_range: f64::INFINITY,
            ..quiet_metrics()
        };
        let result = assess(info(), Vec::new(), metrics, no_clipping(), None);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("High dynamic range")));
    }

    #[test]
    fn test_loudness_extremes() {
        let quiet = LoudnessMetrics {
            loudness_estimate: -40.0,
            ..quiet_metrics()
        };
        let result = assess(info(), Vec::new(), quiet, no_clipping(), None);
        assert!(result.warnings.iter().any(|w| w.contains("very quiet")));

        let loud = LoudnessMetrics {
            loudness_estimate: -3.0,
            ..quiet_metrics()
        };
        let result = assess(info(), Vec::new(), loud, no_clipping(), None);
        assert!(result.warnings.iter().any(|w| w.contains("very loud")));
    }

    #[test]
    fn test_encoding_warning_comes_first() {
        let clipping = ClippingSummary {
            clipped_samples: 500,
            total_samples: 50000,
            clip_ratio: 0.01,
            intervals: Vec::new(),
        };
        let result = assess(
            info(),
            Vec::new(),
            quiet_metrics(),
            clipping,
            Some("Unusual sample encoding: 24-bit integer".to_string()),
        );
        assert!(result.warnings[0].contains("Unusual sample encoding"));
        assert!(result.warnings[1].contains("Clipping detected"));
    }
}
