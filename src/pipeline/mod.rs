//! End-to-end analysis procedures.
//!
//! Each pipeline is strictly linear: load the CSV file, compute the statistics, write the text
//! report and render the chart into the output directory. Configuration defaults reproduce the
//! fixed input paths, column names and output file names.

pub mod anova;
pub mod estimation;

pub use anova::{AnovaAnalysis, AnovaConfig};
pub use estimation::{EstimationAnalysis, EstimationConfig};

/// Directory every report and chart is written to.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Locations of the files written by one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    pub results_file: std::path::PathBuf,
    pub plot_file: std::path::PathBuf,
}
