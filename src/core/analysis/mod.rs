//! Analysis stages of the engine.
//!
//! Each stage consumes only the normalized [`SampleBuffer`] and its sample
//! rate; none of them depend on each other.
//!
//! [`SampleBuffer`]: crate::core::buffer::SampleBuffer

pub mod clipping;
pub mod loudness;
pub mod runs;
pub mod silence;
pub mod spectral;

pub use clipping::{detect_clipping, ClippingInterval, ClippingSummary, CLIPPING_THRESHOLD};
pub use loudness::{db_from_amplitude, measure_loudness, LoudnessMetrics};
pub use silence::{
    detect_silence, SilenceEvent, MIN_SILENCE_DURATION_SEC, SILENCE_THRESHOLD_DB,
};
pub use spectral::{level_series, power_surface, spectrum_curve, PowerSurface, SpectrumCurve};
