//! Plain-text reports for the two analyses.
//!
//! Each report is a [`std::fmt::Display`] type with a fixed line layout; every numeric value is
//! printed with four digits after the decimal point.

use crate::estimation::{ConfidenceInterval, GammaBootstrap, GammaFit, NormalFit};
use crate::testing::{DEFAULT_ALPHA, TestResult};
use anyhow::Context;
use std::fmt;
use std::path::Path;
use tracing::info;

/// Summary of the one-way ANOVA of stress by physical activity.
#[derive(Debug, Clone)]
pub struct AnovaReport {
    pub levels: Vec<String>,
    pub f_statistic: f64,
    pub p_value: f64,
    pub alpha: f64,
}

impl AnovaReport {
    pub fn new(levels: &[String], result: &TestResult<f64>) -> Self {
        AnovaReport {
            levels: levels.to_vec(),
            f_statistic: result.statistic,
            p_value: result.p_value,
            alpha: DEFAULT_ALPHA,
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn is_significant(&self) -> bool {
        self.p_value < self.alpha
    }
}

impl fmt::Display for AnovaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "One-Way ANOVA: Stress by Physical Activity Level")?;
        writeln!(f, "Groups tested: {}", format_label_list(&self.levels))?;
        writeln!(f, "F-statistic = {:.4}", self.f_statistic)?;
        writeln!(f, "p-value     = {:.4}", self.p_value)?;
        if self.is_significant() {
            writeln!(
                f,
                "Result: Statistically significant differences between groups (p < {})",
                self.alpha
            )
        } else {
            writeln!(
                f,
                "Result: No statistically significant differences between groups (p >= {})",
                self.alpha
            )
        }
    }
}

/// Normal and Gamma fits of the resting heart rate sample.
#[derive(Debug, Clone)]
pub struct EstimationReport {
    pub normal: NormalFit,
    pub gamma: GammaFit,
    pub shape_ci: ConfidenceInterval,
    pub scale_ci: ConfidenceInterval,
}

impl EstimationReport {
    pub fn new(normal: &NormalFit, gamma: &GammaFit, bootstrap: &GammaBootstrap) -> Self {
        EstimationReport {
            normal: normal.clone(),
            gamma: *gamma,
            shape_ci: bootstrap.shape_ci,
            scale_ci: bootstrap.scale_ci,
        }
    }
}

impl fmt::Display for EstimationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = (self.normal.confidence * 100.0).round();

        writeln!(f, "Normal Distribution MLE:")?;
        writeln!(f, "  mu (mean) = {:.4}", self.normal.mean)?;
        writeln!(f, "  sigma (std)  = {:.4}", self.normal.std_dev)?;
        writeln!(f, "  {}% CI for mean: {}", level, Interval(&self.normal.mean_ci))?;
        writeln!(
            f,
            "  {}% CI for variance: {}",
            level,
            Interval(&self.normal.variance_ci)
        )?;
        writeln!(f)?;
        writeln!(f, "Gamma Distribution MLE:")?;
        writeln!(f, "  shape (k) = {:.4}", self.gamma.shape)?;
        writeln!(f, "  scale (theta) = {:.4}", self.gamma.scale)?;
        writeln!(f, "  {}% CI for shape: {}", level, Interval(&self.shape_ci))?;
        writeln!(f, "  {}% CI for scale: {}", level, Interval(&self.scale_ci))
    }
}

struct Interval<'a>(&'a ConfidenceInterval);

impl fmt::Display for Interval<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.4}, {:.4}]", self.0.lower, self.0.upper)
    }
}

/// Quoted, comma-separated list in brackets: `['High', 'Moderate', 'Low']`
pub fn format_label_list(labels: &[String]) -> String {
    let quoted: Vec<String> = labels.iter().map(|l| format!("'{}'", l)).collect();
    format!("[{}]", quoted.join(", "))
}

/// Write a report to `path`, creating parent directories and replacing any existing file.
pub fn write_report<P, R>(path: P, report: &R) -> anyhow::Result<()>
where
    P: AsRef<Path>,
    R: fmt::Display,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, report.to_string())
        .with_context(|| format!("Failed to write report {}", path.display()))?;
    info!(path = %path.display(), "Report written");
    Ok(())
}
