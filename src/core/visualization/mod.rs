//! Rendering of analysis plots to image files.
//!
//! The renderer is a stateless collaborator: it takes the numeric series
//! produced by the engine plus an output path, and owns layout and pixel
//! encoding. Nothing here feeds back into the analysis.

mod plot;

pub use plot::{render_analysis_image, PlotSeries};
