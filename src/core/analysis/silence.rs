// src/core/analysis/silence.rs
//
// Silence detection over max-folded frames.

use log::debug;
use serde::Serialize;

use super::runs::detect_runs;
use crate::core::buffer::SampleBuffer;

/// Default level below which a frame counts as silent, in dBFS.
pub const SILENCE_THRESHOLD_DB: f64 = -60.0;

/// Default minimum silence duration worth reporting, in seconds.
pub const MIN_SILENCE_DURATION_SEC: f64 = 0.5;

/// A detected continuous silence period, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SilenceEvent {
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
}

/// Find silence periods at least `min_duration` seconds long.
///
/// A frame is silent only when every channel is strictly below the
/// threshold amplitude (max fold across channels).
pub fn detect_silence(
    buffer: &SampleBuffer,
    threshold_db: f64,
    min_duration: f64,
) -> Vec<SilenceEvent> {
    let threshold_amp = 10.0_f64.powf(threshold_db / 20.0);
    let levels = buffer.fold_max();
    let rate = buffer.sample_rate as f64;

    let events: Vec<SilenceEvent> = detect_runs(&levels, |level| level < threshold_amp)
        .into_iter()
        .filter_map(|run| {
            let duration = run.len() as f64 / rate;
            (duration >= min_duration).then(|| SilenceEvent {
                start_time: run.start as f64 / rate,
                end_time: run.end as f64 / rate,
                duration,
            })
        })
        .collect();

    debug!(
        "silence scan: {} event(s) >= {:.2}s below {:.0} dBFS",
        events.len(),
        min_duration,
        threshold_db
    );

    events
}
