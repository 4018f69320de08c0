// src/core/visualization/plot.rs
//
// Four-panel analysis image: waveform, spectrogram, frequency spectrum,
// and level histogram, drawn pixel-wise into one PNG.

use anyhow::{Context, Result};
use image::{ImageBuffer, Rgb};
use std::path::Path;

use crate::core::analysis::{PowerSurface, SpectrumCurve};

const PANEL_W: u32 = 700;
const PANEL_H: u32 = 450;
const MARGIN: u32 = 24;

const SPECTRO_MIN_DB: f64 = -90.0;
const SPECTRO_MAX_DB: f64 = 0.0;

/// Histogram range in dBFS, 100 bins.
const HIST_MIN_DB: f64 = -100.0;
const HIST_MAX_DB: f64 = 0.0;
const HIST_BINS: usize = 100;

const BACKGROUND: Rgb<u8> = Rgb([250, 250, 250]);
const BORDER: Rgb<u8> = Rgb([160, 160, 160]);
const WAVE_COLOR: Rgb<u8> = Rgb([70, 130, 180]);
const CURVE_COLOR: Rgb<u8> = Rgb([60, 90, 170]);
const BAR_COLOR: Rgb<u8> = Rgb([70, 130, 180]);

/// Numeric series handed over by the engine. The renderer fixes layout
/// and pixels; the engine fixes the numbers.
pub struct PlotSeries<'a> {
    /// Mean-folded mono waveform
    pub waveform: &'a [f64],
    pub sample_rate: u32,
    pub surface: &'a PowerSurface,
    pub spectrum: &'a SpectrumCurve,
    /// Per-sample level in dBFS
    pub levels_db: &'a [f64],
}

/// Render the composite analysis image and write it to `output_path`.
pub fn render_analysis_image(series: &PlotSeries, output_path: &Path) -> Result<()> {
    let width = PANEL_W * 2;
    let height = PANEL_H * 2;
    let mut img: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_pixel(width, height, BACKGROUND);

    draw_waveform(&mut img, Panel::new(0, 0), series.waveform);
    draw_spectrogram(&mut img, Panel::new(PANEL_W, 0), series.surface);
    draw_spectrum(&mut img, Panel::new(0, PANEL_H), series.spectrum);
    draw_histogram(&mut img, Panel::new(PANEL_W, PANEL_H), series.levels_db);

    img.save(output_path)
        .with_context(|| format!("failed to write {}", output_path.display()))?;
    Ok(())
}

/// One quadrant of the composite image, with inner margins applied.
#[derive(Clone, Copy)]
struct Panel {
    x0: u32,
    y0: u32,
    w: u32,
    h: u32,
}

impl Panel {
    fn new(x0: u32, y0: u32) -> Self {
        Self {
            x0: x0 + MARGIN,
            y0: y0 + MARGIN,
            w: PANEL_W - 2 * MARGIN,
            h: PANEL_H - 2 * MARGIN,
        }
    }

    fn border(&self, img: &mut ImageBuffer<Rgb<u8>, Vec<u8>>) {
        for x in self.x0..self.x0 + self.w {
            img.put_pixel(x, self.y0, BORDER);
            img.put_pixel(x, self.y0 + self.h - 1, BORDER);
        }
        for y in self.y0..self.y0 + self.h {
            img.put_pixel(self.x0, y, BORDER);
            img.put_pixel(self.x0 + self.w - 1, y, BORDER);
        }
    }

    fn vline(&self, img: &mut ImageBuffer<Rgb<u8>, Vec<u8>>, x: u32, y_top: u32, y_bot: u32, color: Rgb<u8>) {
        for y in y_top..=y_bot.min(self.y0 + self.h - 1) {
            img.put_pixel(x, y, color);
        }
    }
}

/// Min/max envelope per pixel column.
fn draw_waveform(img: &mut ImageBuffer<Rgb<u8>, Vec<u8>>, panel: Panel, waveform: &[f64]) {
    panel.border(img);
    if waveform.is_empty() {
        return;
    }

    let mid = panel.y0 + panel.h / 2;
    let half = (panel.h / 2).saturating_sub(1) as f64;
    let per_col = waveform.len() as f64 / panel.w as f64;

    for col in 0..panel.w {
        let start = (col as f64 * per_col) as usize;
        let end = (((col + 1) as f64 * per_col) as usize).max(start + 1).min(waveform.len());
        if start >= waveform.len() {
            break;
        }

        let slice = &waveform[start..end];
        let lo = slice.iter().cloned().fold(f64::INFINITY, f64::min).clamp(-1.0, 1.0);
        let hi = slice.iter().cloned().fold(f64::NEG_INFINITY, f64::max).clamp(-1.0, 1.0);

        let y_top = (mid as f64 - hi * half) as u32;
        let y_bot = (mid as f64 - lo * half) as u32;
        panel.vline(img, panel.x0 + col, y_top.max(panel.y0), y_bot, WAVE_COLOR);
    }
}

/// Heatmap of the power surface: time left to right, low frequencies at
/// the bottom, dB clamped to [-90, 0].
fn draw_spectrogram(img: &mut ImageBuffer<Rgb<u8>, Vec<u8>>, panel: Panel, surface: &PowerSurface) {
    panel.border(img);
    let num_frames = surface.power_db.len();
    if num_frames == 0 {
        return;
    }
    let freq_bins = surface.power_db[0].len();

    let x_scale = num_frames as f64 / panel.w as f64;
    let y_scale = freq_bins as f64 / panel.h as f64;

    for y in 0..panel.h {
        for x in 0..panel.w {
            let frame_idx = ((x as f64 * x_scale) as usize).min(num_frames - 1);
            let bin_idx = (((panel.h - 1 - y) as f64 * y_scale) as usize).min(freq_bins - 1);

            let db = surface.power_db[frame_idx][bin_idx].clamp(SPECTRO_MIN_DB, SPECTRO_MAX_DB);
            let normalized = (db - SPECTRO_MIN_DB) / (SPECTRO_MAX_DB - SPECTRO_MIN_DB);
            img.put_pixel(panel.x0 + x, panel.y0 + y, db_to_color(normalized));
        }
    }
}

/// Magnitude curve on a log frequency axis from 20 Hz to Nyquist.
fn draw_spectrum(img: &mut ImageBuffer<Rgb<u8>, Vec<u8>>, panel: Panel, spectrum: &SpectrumCurve) {
    panel.border(img);
    if spectrum.freqs.len() < 2 {
        return;
    }

    let nyquist = *spectrum.freqs.last().unwrap();
    if nyquist <= 20.0 {
        return;
    }
    let log_min = 20.0f64.log10();
    let log_span = nyquist.log10() - log_min;

    let db_max = spectrum
        .magnitude_db
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);
    let db_min = db_max - 120.0;

    let mut prev_y: Option<u32> = None;
    for x in 0..panel.w {
        // Pixel column -> frequency on the log axis -> nearest bin
        let freq = 10.0f64.powf(log_min + x as f64 / (panel.w - 1) as f64 * log_span);
        let bin = ((freq / nyquist) * (spectrum.freqs.len() - 1) as f64) as usize;
        let db = spectrum.magnitude_db[bin.min(spectrum.magnitude_db.len() - 1)]
            .clamp(db_min, db_max);

        let t = (db - db_min) / (db_max - db_min);
        let y = panel.y0 + panel.h - 2 - (t * (panel.h - 3) as f64) as u32;

        let (top, bot) = match prev_y {
            Some(p) if p < y => (p, y),
            Some(p) => (y, p),
            None => (y, y),
        };
        panel.vline(img, panel.x0 + x, top.max(panel.y0), bot, CURVE_COLOR);
        prev_y = Some(y);
    }
}

/// Level-distribution histogram: 100 bins over [-100, 0] dBFS.
fn draw_histogram(img: &mut ImageBuffer<Rgb<u8>, Vec<u8>>, panel: Panel, levels_db: &[f64]) {
    panel.border(img);
    if levels_db.is_empty() {
        return;
    }

    let mut counts = [0usize; HIST_BINS];
    let bin_width = (HIST_MAX_DB - HIST_MIN_DB) / HIST_BINS as f64;
    for &level in levels_db {
        if level < HIST_MIN_DB || level > HIST_MAX_DB {
            continue;
        }
        let bin = (((level - HIST_MIN_DB) / bin_width) as usize).min(HIST_BINS - 1);
        counts[bin] += 1;
    }

    let max_count = counts.iter().copied().max().unwrap_or(0);
    if max_count == 0 {
        return;
    }

    let bar_w = (panel.w / HIST_BINS as u32).max(1);
    for (bin, &count) in counts.iter().enumerate() {
        let bar_h = ((count as f64 / max_count as f64) * (panel.h - 2) as f64) as u32;
        if bar_h == 0 {
            continue;
        }
        let x_base = panel.x0 + bin as u32 * bar_w;
        let y_top = panel.y0 + panel.h - 1 - bar_h;
        for dx in 0..bar_w {
            let x = x_base + dx;
            if x >= panel.x0 + panel.w {
                break;
            }
            panel.vline(img, x, y_top, panel.y0 + panel.h - 2, BAR_COLOR);
        }
    }
}

fn db_to_color(value: f64) -> Rgb<u8> {
    // Viridis-like colormap
    let v = value.clamp(0.0, 1.0);

    let r = (68.0 + v * (235.0 - 68.0)) as u8;
    let g = (1.0 + v * (237.0 - 1.0)) as u8;
    let b = (84.0 + v * (32.0 - 84.0 + (1.0 - v) * 150.0)) as u8;

    Rgb([r, g, b])
}
