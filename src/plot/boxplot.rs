use super::{CHART_SIZE, PlotError, Result, data_range, padded_range};
use crate::estimation::percentile_sorted;
use plotters::prelude::*;
use std::path::Path;

/// Whiskers reach at most this many IQRs beyond the quartiles.
pub const WHISKER_REACH: f64 = 1.5;

const BOX_WIDTH: u32 = 40;
const CAP_WIDTH: u32 = 20;
const MEDIAN_COLOR: RGBColor = RGBColor(255, 127, 14);

/// Five-number summary of one box.
///
/// Quartiles interpolate linearly between order statistics. Each whisker ends at the most
/// extreme observation still inside its `1.5 * IQR` fence, so whiskers never extend past the
/// data. Observations beyond the fences are reported as outliers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// `None` when `values` holds no finite observation.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let q1 = percentile_sorted(&sorted, 25.0)?;
        let median = percentile_sorted(&sorted, 50.0)?;
        let q3 = percentile_sorted(&sorted, 75.0)?;

        let reach = WHISKER_REACH * (q3 - q1);
        let fences = (q1 - reach)..=(q3 + reach);

        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|v| fences.contains(v))
            .map_or(q1, |v| v.min(q1));
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|v| fences.contains(v))
            .map_or(q3, |v| v.max(q3));
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| !fences.contains(v))
            .collect();

        Some(BoxStats {
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

/// Draws one vertical box per `(label, values)` group and saves the chart as a PNG file.
///
/// Boxes follow the order of `groups` and are summarised by [`BoxStats`]. No grid lines are
/// drawn.
///
/// # Arguments
/// * `groups` - Label and observations of every group; no group may be empty
/// * `title` - Chart title displayed at the top of the plot
/// * `x_label` - Label for the category axis
/// * `y_label` - Label for the value axis
/// * `output_path` - Path where the PNG file should be saved
pub fn draw_grouped_boxplot(
    groups: &[(String, Vec<f64>)],
    title: &str,
    x_label: &str,
    y_label: &str,
    output_path: &Path,
) -> Result<()> {
    if groups.is_empty() {
        return Err(PlotError::InvalidData("No groups to plot".to_string()));
    }
    let stats = groups
        .iter()
        .map(|(label, values)| {
            BoxStats::from_values(values)
                .ok_or_else(|| PlotError::InvalidData(format!("Group '{}' is empty", label)))
        })
        .collect::<Result<Vec<_>>>()?;

    let all_values: Vec<f64> = groups.iter().flat_map(|(_, v)| v.iter().copied()).collect();
    let (lo, hi) = data_range(&all_values);
    let (y_min, y_max) = padded_range(lo, hi);

    let labels: Vec<String> = groups.iter().map(|(label, _)| label.clone()).collect();

    let drawing_area = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    drawing_area
        .fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&drawing_area)
        .caption(title, ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(labels[..].into_segmented(), y_min..y_max)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .axis_desc_style(("sans-serif", 16))
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(label) | SegmentValue::Exact(label) => label.to_string(),
            SegmentValue::Last => String::new(),
        })
        .draw()
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    // Insets are in pixels, measured from the edges of each category segment
    let (plot_width, _) = chart.plotting_area().dim_in_pixel();
    let segment = plot_width / labels.len() as u32;
    let box_inset = segment.saturating_sub(BOX_WIDTH) / 2;
    let cap_inset = segment.saturating_sub(CAP_WIDTH) / 2;

    for (i, (label, stats)) in labels.iter().zip(&stats).enumerate() {
        let left = SegmentValue::Exact(label);
        let right = labels.get(i + 1).map_or(SegmentValue::Last, SegmentValue::Exact);
        let center = SegmentValue::CenterOf(label);

        let span = |lower: f64, upper: f64, inset: u32, style: ShapeStyle| {
            let mut rect = Rectangle::new([(left.clone(), lower), (right.clone(), upper)], style);
            rect.set_margin(0, 0, inset, inset);
            rect
        };

        chart
            .draw_series([
                span(stats.q1, stats.q3, box_inset, BLUE.mix(0.2).filled()),
                span(stats.q1, stats.q3, box_inset, BLUE.stroke_width(2)),
                span(stats.median, stats.median, box_inset, MEDIAN_COLOR.stroke_width(2)),
                span(stats.lower_whisker, stats.lower_whisker, cap_inset, BLUE.stroke_width(2)),
                span(stats.upper_whisker, stats.upper_whisker, cap_inset, BLUE.stroke_width(2)),
            ])
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        chart
            .draw_series([
                PathElement::new(
                    vec![(center.clone(), stats.lower_whisker), (center.clone(), stats.q1)],
                    BLUE.stroke_width(2),
                ),
                PathElement::new(
                    vec![(center.clone(), stats.q3), (center.clone(), stats.upper_whisker)],
                    BLUE.stroke_width(2),
                ),
            ])
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        chart
            .draw_series(
                stats
                    .outliers
                    .iter()
                    .map(|&y| Circle::new((center.clone(), y), 3, BLUE.stroke_width(1))),
            )
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    drawing_area
        .present()
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    Ok(())
}
