// src/core/analysis/spectral.rs
//
// Spectral series for visualization: a short-window power surface, a
// single-window frequency spectrum, and the per-sample level series.
// Pure functions of the mean-folded mono signal; nothing downstream of
// the quality assessment reads these.

use rustfft::{num_complex::Complex, FftPlanner};
use std::f64::consts::PI;

/// Analysis window length for the power surface, in samples.
pub const SPECTROGRAM_WINDOW: usize = 2048;

/// Hop between windows (50% overlap).
pub const SPECTROGRAM_HOP: usize = SPECTROGRAM_WINDOW / 2;

/// Cap on the single-window spectrum transform length.
pub const SPECTRUM_MAX_SAMPLES: usize = 65536;

/// Additive floor so dB conversion never takes log of zero.
const DB_FLOOR: f64 = 1e-10;

/// Time-frequency power surface in dB.
#[derive(Debug, Clone)]
pub struct PowerSurface {
    /// Window-center times in seconds, one per frame
    pub times: Vec<f64>,
    /// Bin frequencies in Hz
    pub freqs: Vec<f64>,
    /// power_db[frame][bin]
    pub power_db: Vec<Vec<f64>>,
}

/// Single-window frequency-magnitude curve in dB.
#[derive(Debug, Clone)]
pub struct SpectrumCurve {
    /// Bin frequencies in Hz
    pub freqs: Vec<f64>,
    pub magnitude_db: Vec<f64>,
}

fn hann_window(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f64 / size as f64).cos()))
        .collect()
}

/// Compute the short-window power surface over the mono signal, Hann
/// windowed at 50% overlap. Signals shorter than one window yield an
/// empty surface.
pub fn power_surface(mono: &[f64], sample_rate: u32) -> PowerSurface {
    let freqs: Vec<f64> = (0..SPECTROGRAM_WINDOW / 2)
        .map(|i| i as f64 * sample_rate as f64 / SPECTROGRAM_WINDOW as f64)
        .collect();

    if mono.len() < SPECTROGRAM_WINDOW {
        return PowerSurface {
            times: Vec::new(),
            freqs,
            power_db: Vec::new(),
        };
    }

    let num_frames = (mono.len() - SPECTROGRAM_WINDOW) / SPECTROGRAM_HOP + 1;
    let window = hann_window(SPECTROGRAM_WINDOW);

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(SPECTROGRAM_WINDOW);

    let mut times = Vec::with_capacity(num_frames);
    let mut power_db = Vec::with_capacity(num_frames);

    for frame in 0..num_frames {
        let start = frame * SPECTROGRAM_HOP;
        times.push((start + SPECTROGRAM_WINDOW / 2) as f64 / sample_rate as f64);

        let mut buffer: Vec<Complex<f64>> = mono[start..start + SPECTROGRAM_WINDOW]
            .iter()
            .zip(&window)
            .map(|(&s, &w)| Complex::new(s * w, 0.0))
            .collect();

        fft.process(&mut buffer);

        let row: Vec<f64> = buffer[..SPECTROGRAM_WINDOW / 2]
            .iter()
            .map(|c| {
                let power = c.re * c.re + c.im * c.im;
                10.0 * (power + DB_FLOOR).log10()
            })
            .collect();
        power_db.push(row);
    }

    PowerSurface {
        times,
        freqs,
        power_db,
    }
}

/// Compute the frequency spectrum of the first min(len, 65536) samples.
pub fn spectrum_curve(mono: &[f64], sample_rate: u32) -> SpectrumCurve {
    let n = mono.len().min(SPECTRUM_MAX_SAMPLES);
    if n == 0 {
        return SpectrumCurve {
            freqs: Vec::new(),
            magnitude_db: Vec::new(),
        };
    }

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);

    let mut buffer: Vec<Complex<f64>> =
        mono[..n].iter().map(|&s| Complex::new(s, 0.0)).collect();
    fft.process(&mut buffer);

    // Real-input transform: keep the non-negative frequencies only
    let bins = n / 2 + 1;
    let freqs: Vec<f64> = (0..bins)
        .map(|i| i as f64 * sample_rate as f64 / n as f64)
        .collect();
    let magnitude_db: Vec<f64> = buffer[..bins]
        .iter()
        .map(|c| 20.0 * (c.norm() + DB_FLOOR).log10())
        .collect();

    SpectrumCurve {
        freqs,
        magnitude_db,
    }
}

/// Per-sample level in dBFS, for the level-distribution histogram.
pub fn level_series(mono: &[f64]) -> Vec<f64> {
    mono.iter()
        .map(|&s| 20.0 * (s.abs() + DB_FLOOR).log10())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_empty_for_short_signal() {
        let surface = power_surface(&vec![0.1; 100], 44100);
        assert!(surface.power_db.is_empty());
        assert!(surface.times.is_empty());
        assert_eq!(surface.freqs.len(), SPECTROGRAM_WINDOW / 2);
    }

    #[test]
    fn test_surface_frame_count_and_shape() {
        let mono = vec![0.0; SPECTROGRAM_WINDOW + 3 * SPECTROGRAM_HOP];
        let surface = power_surface(&mono, 44100);
        assert_eq!(surface.power_db.len(), 4);
        assert_eq!(surface.times.len(), 4);
        assert_eq!(surface.power_db[0].len(), SPECTROGRAM_WINDOW / 2);
    }

    #[test]
    fn test_sine_peak_lands_in_right_bin() {
        // 1 kHz tone sampled at 32768 Hz: bin resolution is sr/n = 1 Hz
        let rate = 32768u32;
        let mono: Vec<f64> = (0..rate as usize)
            .map(|i| (2.0 * PI * 1000.0 * i as f64 / rate as f64).sin())
            .collect();
        let curve = spectrum_curve(&mono, rate);

        let peak_bin = curve
            .magnitude_db
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert!((curve.freqs[peak_bin] - 1000.0).abs() < 2.0);
    }

    #[test]
    fn test_spectrum_respects_sample_cap() {
        let mono = vec![0.1; SPECTRUM_MAX_SAMPLES * 2];
        let curve = spectrum_curve(&mono, 44100);
        assert_eq!(curve.freqs.len(), SPECTRUM_MAX_SAMPLES / 2 + 1);
    }

    #[test]
    fn test_level_series_floor() {
        let levels = level_series(&[0.0, 1.0]);
        // Zero amplitude hits the additive floor, not -inf
        assert!(levels[0] <= -199.0 && levels[0].is_finite());
        assert!(levels[1].abs() < 1e-6);
    }

    #[test]
    fn test_empty_signal() {
        let curve = spectrum_curve(&[], 44100);
        assert!(curve.freqs.is_empty());
        assert!(level_series(&[]).is_empty());
    }
}
