//! # survey-statistics
//!
//! Statistical analysis of student survey datasets.
//!
//! This crate runs two self-contained analyses over CSV survey data, each producing a text
//! report and a chart:
//!
//! - **Stress by physical activity**: a one-way ANOVA comparing self-reported stress across the
//!   `High`, `Moderate` and `Low` activity levels, with a boxplot of the groups
//! - **Resting heart rate**: maximum likelihood fits of Normal and Gamma distributions with 95%
//!   confidence intervals (analytic for the Normal, bootstrap for the Gamma), with a density
//!   histogram overlaid by both fitted curves
//!
//! ## Module Organization
//!
//! - **[`data`]**: CSV loading, missing-value filtering and grouping by label
//! - **[`testing`]**: Hypothesis tests (one-way ANOVA) and their results
//! - **[`estimation`]**: Distribution fitting, confidence intervals and bootstrap resampling
//! - **[`report`]**: Fixed-format text reports
//! - **[`plot`]**: PNG charts
//! - **[`pipeline`]**: The two end-to-end procedures and their configuration
//! - **[`logging`]**: Subscriber setup shared by the binaries

pub mod data;
pub mod estimation;
pub mod logging;
pub mod pipeline;
pub mod plot;
pub mod report;
pub mod testing;
