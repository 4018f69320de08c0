// src/core/analyzer.rs
//
// Per-file pipeline orchestration: decode -> normalize -> analysis
// stages -> assessment, with an optional plot-rendering hook.

use anyhow::{Context, Result};
use log::debug;
use std::path::{Path, PathBuf};

use super::analysis::{
    detect_clipping, detect_silence, level_series, measure_loudness, power_surface,
    spectrum_curve, CLIPPING_THRESHOLD, MIN_SILENCE_DURATION_SEC, SILENCE_THRESHOLD_DB,
};
use super::assess::{assess, AnalysisResult, FileInfo};
use super::buffer::SampleBuffer;
use super::decoder::decode_audio;
use super::normalize::normalize;
use super::visualization::{render_analysis_image, PlotSeries};

/// Tunable analysis thresholds.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisConfig {
    /// Level below which a frame counts as silent, in dBFS
    pub silence_threshold_db: f64,
    /// Minimum silence duration worth reporting, in seconds
    pub min_silence_duration: f64,
    /// Amplitude at or above which a sample counts as clipped
    pub clip_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            silence_threshold_db: SILENCE_THRESHOLD_DB,
            min_silence_duration: MIN_SILENCE_DURATION_SEC,
            clip_threshold: CLIPPING_THRESHOLD,
        }
    }
}

/// Analyzer for a single decoded file.
///
/// Holds the normalized buffer so analysis and plot rendering can share
/// one decode. The buffer is immutable; `analyze` can be called any
/// number of times with identical results.
pub struct AudioAnalyzer {
    path: PathBuf,
    buffer: SampleBuffer,
    encoding_warning: Option<String>,
}

impl AudioAnalyzer {
    /// Decode and normalize a file. Decode failures are fatal per file.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = decode_audio(path)
            .with_context(|| format!("failed to decode {}", path.display()))?;
        let (buffer, encoding_warning) = normalize(raw);
        Ok(Self {
            path: path.to_path_buf(),
            buffer,
            encoding_warning,
        })
    }

    /// Run every analysis stage and assemble the assessed result.
    pub fn analyze(&self, config: &AnalysisConfig) -> AnalysisResult {
        debug!(
            "analyzing {}: {} Hz, {} ch, {:.2}s",
            self.path.display(),
            self.buffer.sample_rate,
            self.buffer.channels,
            self.buffer.duration()
        );

        let silence_events = detect_silence(
            &self.buffer,
            config.silence_threshold_db,
            config.min_silence_duration,
        );
        let loudness = measure_loudness(&self.buffer);
        let clipping = detect_clipping(&self.buffer, config.clip_threshold);

        let filename = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());

        assess(
            FileInfo {
                filename,
                sample_rate: self.buffer.sample_rate,
                duration: self.buffer.duration(),
                channels: self.buffer.channels,
            },
            silence_events,
            loudness,
            clipping,
            self.encoding_warning.clone(),
        )
    }

    /// Render the four-panel analysis image into `output_dir` and return
    /// the written path.
    pub fn render_plots(&self, output_dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("failed to create {}", output_dir.display()))?;

        let mono = self.buffer.fold_mean();
        let surface = power_surface(&mono, self.buffer.sample_rate);
        let spectrum = spectrum_curve(&mono, self.buffer.sample_rate);
        let levels_db = level_series(&mono);

        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".to_string());
        let output_path = output_dir.join(format!("{}_analysis.png", stem));

        render_analysis_image(
            &PlotSeries {
                waveform: &mono,
                sample_rate: self.buffer.sample_rate,
                surface: &surface,
                spectrum: &spectrum,
                levels_db: &levels_db,
            },
            &output_path,
        )?;

        Ok(output_path)
    }

    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Convenience wrapper used by the CLI: decode, analyze, and optionally
/// render plots for one file.
pub fn analyze_file(
    path: &Path,
    config: &AnalysisConfig,
    plot_dir: Option<&Path>,
) -> Result<AnalysisResult> {
    let analyzer = AudioAnalyzer::new(path)?;
    let mut result = analyzer.analyze(config);

    if let Some(dir) = plot_dir {
        let plot_path = analyzer
            .render_plots(dir)
            .with_context(|| format!("failed to render plots for {}", path.display()))?;
        result.spectrum_path = Some(plot_path);
    }

    Ok(result)
}
