//! Conducts a one-way ANOVA of self-reported stress across High, Moderate and Low physical
//! activity levels and saves the report and boxplot under the output directory.

use anyhow::Result;
use clap::Parser;
use survey_statistics::logging;
use survey_statistics::pipeline::{AnovaConfig, anova};
use survey_statistics::report::format_label_list;

/// Reads `data/students_mental_health_survey.csv` and writes to `output/`.
#[derive(Parser)]
#[command(name = "anova_stress_activity")]
#[command(about = "One-way ANOVA of stress by physical activity level", long_about = None)]
struct Cli {}

fn main() -> Result<()> {
    logging::init();
    Cli::parse();

    let config = AnovaConfig::default();
    let dataset = config.load()?;
    println!("Columns in dataset: {}", format_label_list(dataset.column_names()));

    let (_, artifacts) = anova::run(&config, &dataset)?;

    println!("Results saved to: {}", artifacts.results_file.display());
    println!("Boxplot saved to: {}", artifacts.plot_file.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_without_arguments() {
        assert!(Cli::try_parse_from(["anova_stress_activity"]).is_ok());
    }

    #[test]
    fn test_paths_are_not_arguments() {
        assert!(Cli::try_parse_from(["anova_stress_activity", "--data", "x.csv"]).is_err());
        assert!(Cli::try_parse_from(["anova_stress_activity", "--output-dir", "out"]).is_err());
    }
}
