//! Core analysis engine: decoding, normalization, analysis stages,
//! assessment, and plot rendering.

pub mod analysis;
pub mod analyzer;
pub mod assess;
pub mod buffer;
pub mod decoder;
pub mod normalize;
pub mod visualization;

pub use analysis::{
    ClippingInterval, ClippingSummary, LoudnessMetrics, SilenceEvent,
};
pub use analyzer::{analyze_file, AnalysisConfig, AudioAnalyzer};
pub use assess::AnalysisResult;
pub use buffer::SampleBuffer;
pub use decoder::{decode_audio, DecodeError, RawAudio, RawSamples, SampleEncoding};
pub use normalize::normalize;
