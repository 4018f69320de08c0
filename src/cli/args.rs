//! CLI argument parsing

use clap::Parser;
use std::path::PathBuf;

use crate::core::AnalysisConfig;

#[derive(Parser, Debug)]
#[command(name = "wavecheck")]
#[command(about = "Analyze audio files for silence, clipping, and loudness issues")]
pub struct Args {
    /// Audio file or directory to analyze
    pub input: PathBuf,

    /// Generate analysis plot images (waveform, spectrogram, spectrum, levels)
    #[arg(short, long)]
    pub plot: bool,

    /// Output directory for analysis plots
    #[arg(short, long, default_value = "analysis")]
    pub output: PathBuf,

    /// Silence threshold in dBFS
    #[arg(long, default_value_t = -60.0, allow_negative_numbers = true)]
    pub silence_db: f64,

    /// Minimum silence duration to report, in seconds
    #[arg(long, default_value_t = 0.5)]
    pub min_silence: f64,

    /// Amplitude at or above which a sample counts as clipped
    #[arg(long, default_value_t = 0.99)]
    pub clip_threshold: f64,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Minimal output (warnings and summary only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose output (list every silence event and clipped region)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            silence_threshold_db: self.silence_db,
            min_silence_duration: self.min_silence,
            clip_threshold: self.clip_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["wavecheck", "track.wav"]);
        let config = args.analysis_config();
        assert!((config.silence_threshold_db - -60.0).abs() < 1e-9);
        assert!((config.min_silence_duration - 0.5).abs() < 1e-9);
        assert!((config.clip_threshold - 0.99).abs() < 1e-9);
        assert!(!args.plot);
        assert!(!args.json);
    }

    #[test]
    fn test_threshold_overrides() {
        let args = Args::parse_from([
            "wavecheck",
            "--silence-db=-50",
            "--min-silence",
            "1.0",
            "--clip-threshold",
            "0.95",
            "track.wav",
        ]);
        let config = args.analysis_config();
        assert!((config.silence_threshold_db - -50.0).abs() < 1e-9);
        assert!((config.min_silence_duration - 1.0).abs() < 1e-9);
        assert!((config.clip_threshold - 0.95).abs() < 1e-9);
    }
}
