//! One-way ANOVA of self-reported stress across physical activity levels.

use super::{Artifacts, DEFAULT_OUTPUT_DIR};
use crate::data::Dataset;
use crate::plot::draw_grouped_boxplot;
use crate::report::{AnovaReport, write_report};
use crate::testing::inference::GroupStatTests;
use crate::testing::{DEFAULT_ALPHA, TestResult};
use std::path::PathBuf;
use tracing::{debug, info};

pub const DEFAULT_DATA_PATH: &str = "data/students_mental_health_survey.csv";
pub const RESULTS_FILE_NAME: &str = "ANOVA_Stress_PhysicalActivity.txt";
pub const PLOT_FILE_NAME: &str = "ANOVA_Stress_PhysicalActivity.png";

#[derive(Debug, Clone)]
pub struct AnovaConfig {
    pub data_path: PathBuf,
    pub output_dir: PathBuf,
    /// Numeric outcome
    pub value_column: String,
    /// Categorical grouping
    pub group_column: String,
    /// Labels compared by the test, in report order
    pub levels: Vec<String>,
    pub alpha: f64,
}

impl Default for AnovaConfig {
    fn default() -> Self {
        AnovaConfig {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            value_column: "Stress_Level".to_string(),
            group_column: "Physical_Activity".to_string(),
            levels: vec!["High".to_string(), "Moderate".to_string(), "Low".to_string()],
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl AnovaConfig {
    pub fn artifacts(&self) -> Artifacts {
        Artifacts {
            results_file: self.output_dir.join(RESULTS_FILE_NAME),
            plot_file: self.output_dir.join(PLOT_FILE_NAME),
        }
    }

    pub fn load(&self) -> anyhow::Result<Dataset> {
        let dataset = Dataset::from_path(&self.data_path)?;
        info!(path = %self.data_path.display(), rows = dataset.n_rows(), "Loaded survey data");
        Ok(dataset)
    }
}

/// Filtered data and test outcome of one ANOVA run.
#[derive(Debug, Clone)]
pub struct AnovaAnalysis {
    /// Rows with both the outcome and the grouping label present
    pub clean: Dataset,
    /// Outcome values per configured level
    pub groups: Vec<Vec<f64>>,
    pub result: TestResult<f64>,
    pub report: AnovaReport,
}

/// Drop rows missing either column, split the outcome by level and run the test.
pub fn analyze(config: &AnovaConfig, dataset: &Dataset) -> anyhow::Result<AnovaAnalysis> {
    let clean = dataset.drop_missing(&[config.value_column.as_str(), config.group_column.as_str()])?;

    let levels: Vec<&str> = config.levels.iter().map(|l| l.as_str()).collect();
    let groups = clean.partition_by_label(&config.group_column, &config.value_column, &levels)?;
    for (level, values) in levels.iter().zip(&groups) {
        debug!(level = *level, size = values.len(), "Group sample");
    }

    let result = groups.one_way_anova()?;
    let report = AnovaReport::new(&config.levels, &result).with_alpha(config.alpha);

    info!(
        f_statistic = result.statistic,
        p_value = result.p_value,
        df_between = ?result.degrees_of_freedom,
        df_within = ?result.metadata_value("df_within"),
        significant = report.is_significant(),
        "ANOVA complete"
    );

    Ok(AnovaAnalysis {
        clean,
        groups,
        result,
        report,
    })
}

/// Write the text report.
pub fn write_results(config: &AnovaConfig, analysis: &AnovaAnalysis) -> anyhow::Result<PathBuf> {
    let path = config.artifacts().results_file;
    write_report(&path, &analysis.report)?;
    Ok(path)
}

/// Render the boxplot of the outcome grouped by every label present in the filtered data.
pub fn write_plot(config: &AnovaConfig, analysis: &AnovaAnalysis) -> anyhow::Result<PathBuf> {
    let path = config.artifacts().plot_file;
    std::fs::create_dir_all(&config.output_dir)?;

    let groups = analysis
        .clean
        .group_by_label(&config.group_column, &config.value_column)?;
    draw_grouped_boxplot(
        &groups,
        "Stress Level by Physical Activity",
        "Physical Activity Level",
        "Self-Reported Stress Score",
        &path,
    )?;

    info!(path = %path.display(), "Boxplot written");
    Ok(path)
}

/// Full run on an already loaded dataset: analyse, write the report, render the chart.
pub fn run(config: &AnovaConfig, dataset: &Dataset) -> anyhow::Result<(AnovaAnalysis, Artifacts)> {
    let analysis = analyze(config, dataset)?;
    let results_file = write_results(config, &analysis)?;
    let plot_file = write_plot(config, &analysis)?;
    Ok((
        analysis,
        Artifacts {
            results_file,
            plot_file,
        },
    ))
}
