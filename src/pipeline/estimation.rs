//! Normal and Gamma fits of resting heart rate.

use super::{Artifacts, DEFAULT_OUTPUT_DIR};
use crate::data::Dataset;
use crate::estimation::{
    BootstrapConfig, GammaBootstrap, GammaFit, NormalFit, bootstrap_gamma, fit_gamma, fit_normal,
};
use crate::plot::{DensityCurve, Histogram, data_range, density_grid, draw_density_overlay, padded_range};
use crate::report::{EstimationReport, write_report};
use plotters::style::{GREEN, RED};
use statrs::distribution::Continuous;
use std::path::PathBuf;
use tracing::info;

pub const DEFAULT_DATA_PATH: &str = "data/student_health_data.csv";
pub const RESULTS_FILE_NAME: &str = "ParameterEstimation.txt";
pub const PLOT_FILE_NAME: &str = "ParameterEstimation.png";

#[derive(Debug, Clone)]
pub struct EstimationConfig {
    pub data_path: PathBuf,
    pub output_dir: PathBuf,
    pub column: String,
    pub confidence: f64,
    pub bootstrap: BootstrapConfig,
    pub histogram_bins: usize,
    pub grid_points: usize,
}

impl Default for EstimationConfig {
    fn default() -> Self {
        EstimationConfig {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            column: "Heart_Rate".to_string(),
            confidence: 0.95,
            bootstrap: BootstrapConfig::default(),
            histogram_bins: 30,
            grid_points: 200,
        }
    }
}

impl EstimationConfig {
    pub fn artifacts(&self) -> Artifacts {
        Artifacts {
            results_file: self.output_dir.join(RESULTS_FILE_NAME),
            plot_file: self.output_dir.join(PLOT_FILE_NAME),
        }
    }

    pub fn load(&self) -> anyhow::Result<Dataset> {
        let dataset = Dataset::from_path(&self.data_path)?;
        info!(path = %self.data_path.display(), rows = dataset.n_rows(), "Loaded health data");
        Ok(dataset)
    }
}

/// Sample and fitted parameters of one estimation run.
#[derive(Debug, Clone)]
pub struct EstimationAnalysis {
    /// Non-missing values of the configured column, in row order
    pub sample: Vec<f64>,
    pub normal: NormalFit,
    pub gamma: GammaFit,
    pub bootstrap: GammaBootstrap,
    pub report: EstimationReport,
}

/// Extract the sample, fit both distributions and bootstrap the Gamma intervals.
pub fn analyze(config: &EstimationConfig, dataset: &Dataset) -> anyhow::Result<EstimationAnalysis> {
    let sample = dataset
        .drop_missing(&[config.column.as_str()])?
        .numeric_column(&config.column)?;
    info!(n = sample.len(), column = %config.column, "Extracted sample");

    let normal = fit_normal(&sample, config.confidence)?;
    let gamma = fit_gamma(&sample)?;
    let bootstrap_config = BootstrapConfig {
        confidence: config.confidence,
        ..config.bootstrap
    };
    let bootstrap = bootstrap_gamma(&sample, &bootstrap_config)?;

    info!(
        mu = normal.mean,
        sigma = normal.std_dev,
        shape = gamma.shape,
        scale = gamma.scale,
        "Distributions fitted"
    );

    let report = EstimationReport::new(&normal, &gamma, &bootstrap);
    Ok(EstimationAnalysis {
        sample,
        normal,
        gamma,
        bootstrap,
        report,
    })
}

/// Histogram of the sample and the two fitted densities over the visible x-range.
pub fn density_curves(
    config: &EstimationConfig,
    analysis: &EstimationAnalysis,
) -> anyhow::Result<(Histogram, (f64, f64), Vec<DensityCurve>)> {
    let histogram = Histogram::new(&analysis.sample, config.histogram_bins)?;
    let (lo, hi) = data_range(&analysis.sample);
    let x_range = padded_range(lo, hi);

    let normal = analysis.normal.distribution()?;
    let gamma = analysis.gamma.distribution()?;

    let curves = vec![
        DensityCurve::new(
            "Normal Fit",
            density_grid(x_range.0, x_range.1, config.grid_points, |x| normal.pdf(x)),
            RED,
        ),
        DensityCurve::new(
            "Gamma Fit",
            density_grid(x_range.0, x_range.1, config.grid_points, |x| {
                if x > 0.0 { gamma.ln_pdf(x).exp() } else { 0.0 }
            }),
            GREEN,
        ),
    ];

    Ok((histogram, x_range, curves))
}

/// Render the histogram with both fitted densities.
pub fn write_plot(
    config: &EstimationConfig,
    analysis: &EstimationAnalysis,
) -> anyhow::Result<PathBuf> {
    let path = config.artifacts().plot_file;
    std::fs::create_dir_all(&config.output_dir)?;

    let (histogram, x_range, curves) = density_curves(config, analysis)?;
    draw_density_overlay(
        &histogram,
        &curves,
        x_range,
        "Resting Heart Rate Distribution with Fitted PDFs",
        "Resting Heart Rate (bpm)",
        "Density",
        &path,
    )?;

    info!(path = %path.display(), "Density plot written");
    Ok(path)
}

/// Write the text report.
pub fn write_results(
    config: &EstimationConfig,
    analysis: &EstimationAnalysis,
) -> anyhow::Result<PathBuf> {
    let path = config.artifacts().results_file;
    write_report(&path, &analysis.report)?;
    Ok(path)
}

/// Full run on an already loaded dataset: fit, render the chart, write the report.
pub fn run(
    config: &EstimationConfig,
    dataset: &Dataset,
) -> anyhow::Result<(EstimationAnalysis, Artifacts)> {
    let analysis = analyze(config, dataset)?;
    let plot_file = write_plot(config, &analysis)?;
    let results_file = write_results(config, &analysis)?;
    Ok((
        analysis,
        Artifacts {
            results_file,
            plot_file,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const HEALTH: &str = "\
Student_ID,Age,Heart_Rate
1,20,62
2,21,70
3,22,
4,23,75
5,24,68
6,25,80
7,26,72
8,27,66
9,28,NA
10,29,77
11,30,71
12,31,69
";

    fn config() -> EstimationConfig {
        EstimationConfig {
            bootstrap: BootstrapConfig::default().with_iterations(200).with_seed(11),
            ..EstimationConfig::default()
        }
    }

    #[test]
    fn test_analyze_drops_missing_heart_rates() {
        let dataset = Dataset::from_reader(HEALTH.as_bytes()).unwrap();
        let analysis = analyze(&config(), &dataset).unwrap();
        assert_eq!(analysis.sample.len(), 10);
        assert_relative_eq!(analysis.normal.mean, 71.0, epsilon = 1e-12);
        assert_relative_eq!(analysis.gamma.shape, 198.31168629527304, max_relative = 1e-8);
    }

    #[test]
    fn test_density_curves_cover_padded_range() {
        let dataset = Dataset::from_reader(HEALTH.as_bytes()).unwrap();
        let cfg = config();
        let analysis = analyze(&cfg, &dataset).unwrap();
        let (histogram, x_range, curves) = density_curves(&cfg, &analysis).unwrap();

        assert_eq!(histogram.counts.len(), 30);
        assert_relative_eq!(x_range.0, 61.1, epsilon = 1e-9);
        assert_relative_eq!(x_range.1, 80.9, epsilon = 1e-9);
        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0].label, "Normal Fit");
        assert_eq!(curves[1].label, "Gamma Fit");
        for curve in &curves {
            assert_eq!(curve.points.len(), 200);
            assert!(curve.points.iter().all(|&(_, y)| y >= 0.0 && y.is_finite()));
        }
    }

    #[test]
    fn test_missing_column_fails() {
        let dataset = Dataset::from_reader("Age\n20\n".as_bytes()).unwrap();
        assert!(analyze(&config(), &dataset).is_err());
    }

    #[test]
    fn test_artifact_names() {
        let artifacts = EstimationConfig::default().artifacts();
        assert_eq!(artifacts.results_file, PathBuf::from("output/ParameterEstimation.txt"));
        assert_eq!(artifacts.plot_file, PathBuf::from("output/ParameterEstimation.png"));
    }
}
