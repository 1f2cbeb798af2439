//! Chart rendering for the analysis outputs.
//!
//! Charts are drawn with [`plotters`] on the bitmap backend and saved as PNG files:
//!
//! - [`draw_grouped_boxplot`]: one box per category label, whiskers clamped to the data
//! - [`draw_density_overlay`]: normalised histogram with fitted probability density curves
//!
//! The data preparation (binning, axis range, density grids) lives here as plain functions so
//! it can be checked without rendering.

use ndarray::Array1;
use thiserror::Error;

mod boxplot;
mod density;

pub use boxplot::{BoxStats, WHISKER_REACH, draw_grouped_boxplot};
pub use density::{DensityCurve, draw_density_overlay};

/// Width and height of every saved chart, in pixels.
pub const CHART_SIZE: (u32, u32) = (800, 500);

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to save plot to file: {0}")]
    FileSave(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = core::result::Result<T, PlotError>;

/// Equal-width histogram normalised to unit area.
#[derive(Debug, Clone)]
pub struct Histogram {
    /// `bins + 1` bin edges, ascending
    pub edges: Array1<f64>,
    /// Observations per bin
    pub counts: Vec<usize>,
    /// `count / (n * bin_width)` per bin
    pub density: Array1<f64>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins spanning `[min, max]`.
    ///
    /// The last bin is closed on the right. A constant sample is binned over
    /// `[value - 0.5, value + 0.5]`.
    pub fn new(values: &[f64], bins: usize) -> Result<Self> {
        if values.is_empty() {
            return Err(PlotError::InvalidData("Histogram data cannot be empty".to_string()));
        }
        if bins == 0 {
            return Err(PlotError::InvalidData("Histogram needs at least one bin".to_string()));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(PlotError::InvalidData(
                "Histogram data must be finite".to_string(),
            ));
        }

        let (mut lo, mut hi) = data_range(values);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let edges = Array1::linspace(lo, hi, bins + 1);
        let width = (hi - lo) / bins as f64;

        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        let norm = values.len() as f64 * width;
        let density = counts.iter().map(|&c| c as f64 / norm).collect();

        Ok(Histogram {
            edges,
            counts,
            density,
        })
    }

    /// `(left edge, right edge, density)` for every bin.
    pub fn bars(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.edges
            .windows(2)
            .into_iter()
            .zip(self.density.iter())
            .map(|(w, &d)| (w[0], w[1], d))
    }

    pub fn max_density(&self) -> f64 {
        self.density.iter().copied().fold(0.0, f64::max)
    }
}

/// Smallest and largest value of a non-empty sample.
pub fn data_range(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Axis limits covering `[lo, hi]` with a 5% margin on each side.
pub fn padded_range(lo: f64, hi: f64) -> (f64, f64) {
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 0.5 };
    (lo - pad, hi + pad)
}

/// `points` evenly spaced x-values over `[lo, hi]` paired with `pdf(x)`.
pub fn density_grid<F>(lo: f64, hi: f64, points: usize, pdf: F) -> Vec<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    let xs = Array1::linspace(lo, hi, points);
    let ys = xs.mapv(&pdf);
    xs.into_iter().zip(ys).collect()
}
