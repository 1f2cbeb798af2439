use super::{CHART_SIZE, Histogram, PlotError, Result};
use plotters::prelude::*;
use std::path::Path;

/// A labelled density curve to draw over a histogram.
#[derive(Debug, Clone)]
pub struct DensityCurve {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub color: RGBColor,
}

impl DensityCurve {
    pub fn new(label: &str, points: Vec<(f64, f64)>, color: RGBColor) -> Self {
        DensityCurve {
            label: label.to_string(),
            points,
            color,
        }
    }
}

/// Draws a density histogram with fitted curves on top and saves it as a PNG file.
///
/// The x-axis spans `x_range`; the y-axis starts at 0 and leaves headroom above the tallest
/// bar or curve. Each curve gets a legend entry.
///
/// # Arguments
/// * `histogram` - Binned sample, normalised to unit area
/// * `curves` - Density curves evaluated over `x_range`
/// * `x_range` - Visible x-range `(min, max)`
/// * `title` - Chart title displayed at the top of the plot
/// * `x_label` - Label for the X-axis
/// * `y_label` - Label for the Y-axis
/// * `output_path` - Path where the PNG file should be saved
pub fn draw_density_overlay(
    histogram: &Histogram,
    curves: &[DensityCurve],
    x_range: (f64, f64),
    title: &str,
    x_label: &str,
    y_label: &str,
    output_path: &Path,
) -> Result<()> {
    let (x_min, x_max) = x_range;
    if !(x_min < x_max) {
        return Err(PlotError::InvalidData(format!(
            "Invalid x-range [{}, {}]",
            x_min, x_max
        )));
    }

    let curve_max = curves
        .iter()
        .flat_map(|c| c.points.iter().map(|&(_, y)| y))
        .filter(|y| y.is_finite())
        .fold(0.0, f64::max);
    let y_max = histogram.max_density().max(curve_max) * 1.05;
    let y_max = if y_max > 0.0 { y_max } else { 1.0 };

    let drawing_area = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    drawing_area
        .fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&drawing_area)
        .caption(title, ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .axis_desc_style(("sans-serif", 16))
        .y_label_formatter(&|y| format!("{:.3}", y))
        .draw()
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    // Filled bars, then black outlines on top
    chart
        .draw_series(histogram.bars().map(|(lo, hi, d)| {
            Rectangle::new([(lo, 0.0), (hi, d)], BLUE.mix(0.6).filled())
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    chart
        .draw_series(
            histogram
                .bars()
                .map(|(lo, hi, d)| Rectangle::new([(lo, 0.0), (hi, d)], BLACK.stroke_width(1))),
        )
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    for curve in curves {
        let style = curve.color.stroke_width(2);
        chart
            .draw_series(LineSeries::new(
                curve.points.iter().copied().filter(|(_, y)| y.is_finite()),
                style,
            ))
            .map_err(|e| PlotError::Drawing(e.to_string()))?
            .label(curve.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    drawing_area
        .present()
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    Ok(())
}
