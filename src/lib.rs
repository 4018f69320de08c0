//! wavecheck - Batch audio quality analysis
//!
//! Inspects recorded audio and reports quality signals worth knowing
//! before a track ships: silence periods, loudness and dynamic range,
//! digital clipping, and the spectral content behind the analysis plots.
//!
//! ## Features
//!
//! - **Silence detection**: continuous periods below a dBFS threshold
//! - **Loudness metrics**: RMS, peak, an approximate loudness estimate,
//!   and dynamic range (crest factor)
//! - **Clipping detection**: clipped-sample ratio plus every clipped
//!   region, down to single samples
//! - **Analysis plots**: waveform, spectrogram, frequency spectrum, and
//!   level histogram rendered to one PNG per file
//! - **Batch mode**: analyzes directories in parallel, keeps going past
//!   per-file failures, and ranks results by loudness
//!
//! The loudness estimate is deliberately approximate: RMS level minus a
//! fixed 3 dB offset, with no frequency weighting. It is not a
//! standards-compliant loudness measurement and is not meant to be.
//!
//! ## Module Structure
//!
//! - `core` - decoding, normalization, analysis stages, assessment
//! - `cli` - command-line interface and report formatting
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wavecheck::core::{AnalysisConfig, AudioAnalyzer};
//!
//! let analyzer = AudioAnalyzer::new("track.wav")?;
//! let result = analyzer.analyze(&AnalysisConfig::default());
//!
//! for warning in &result.warnings {
//!     println!("{}", warning);
//! }
//! ```

// Core analysis functionality
pub mod core;

// Command-line interface
pub mod cli;

// Re-export commonly used types at crate root for convenience
pub use crate::core::{
    analyze_file, AnalysisConfig, AnalysisResult, AudioAnalyzer, ClippingInterval,
    ClippingSummary, DecodeError, LoudnessMetrics, SampleBuffer, SampleEncoding, SilenceEvent,
};
