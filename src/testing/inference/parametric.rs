//! Parametric statistical tests over independent group samples.
//!
//! This module implements the classical one-way analysis of variance. Group data is reduced to
//! per-group summaries (size, mean, centered sum of squares) first, and the F-test is computed
//! from those summaries, so callers that already hold aggregated statistics can skip the raw
//! values entirely.

use crate::testing::TestResult;
use single_utilities::traits::FloatOps;
use statrs::distribution::{ContinuousCDF, FisherSnedecor};
use tracing::debug;

/// Size, mean and centered sum of squares of one group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupSummary {
    pub n: f64,
    pub mean: f64,
    pub sum_squares: f64,
}

impl GroupSummary {
    /// Summarise a sample in two passes (mean, then squared deviations).
    pub fn from_values<T>(values: &[T]) -> Self
    where
        T: FloatOps,
    {
        let n = values.len() as f64;
        if values.is_empty() {
            return GroupSummary {
                n,
                mean: f64::NAN,
                sum_squares: 0.0,
            };
        }

        let mut sum = T::zero();
        for &val in values {
            sum += val;
        }
        let mean = sum.to_f64().unwrap_or(f64::NAN) / n;

        let sum_squares = values
            .iter()
            .map(|v| {
                let d = v.to_f64().unwrap_or(f64::NAN) - mean;
                d * d
            })
            .sum();

        GroupSummary {
            n,
            mean,
            sum_squares,
        }
    }
}

/// Perform a one-way ANOVA across independent groups.
///
/// Tests the null hypothesis that all groups share the same mean, assuming normally
/// distributed residuals with equal variance across groups.
///
/// # Arguments
///
/// * `groups` - One sample per group; at least two groups, none of them empty
///
/// # Returns
///
/// `TestResult` holding the F-statistic and its p-value. The between-group degrees of freedom
/// are stored in `degrees_of_freedom`; `df_within`, `ss_between` and `ss_within` are stored
/// as metadata.
pub fn one_way_anova<T>(groups: &[&[T]]) -> anyhow::Result<TestResult<f64>>
where
    T: FloatOps,
{
    if let Some(i) = groups.iter().position(|g| g.is_empty()) {
        return Err(anyhow::anyhow!("Group {} has no observations", i));
    }

    let summaries: Vec<GroupSummary> = groups
        .iter()
        .map(|&g| GroupSummary::from_values(g))
        .collect();

    anova_from_summaries(&summaries)
}

/// Perform a one-way ANOVA using precomputed group summaries.
///
/// `F = (SS_between / (k - 1)) / (SS_within / (N - k))`, with the p-value taken from the upper
/// tail of the F distribution with `(k - 1, N - k)` degrees of freedom.
pub fn anova_from_summaries(summaries: &[GroupSummary]) -> anyhow::Result<TestResult<f64>> {
    let k = summaries.len();
    if k < 2 {
        return Err(anyhow::anyhow!(
            "At least two groups are required for ANOVA, got {}",
            k
        ));
    }
    if summaries.iter().any(|s| s.n < 1.0) {
        return Err(anyhow::anyhow!("Group summaries cannot be empty"));
    }

    let n_total: f64 = summaries.iter().map(|s| s.n).sum();
    let grand_mean = summaries.iter().map(|s| s.n * s.mean).sum::<f64>() / n_total;

    let ss_between: f64 = summaries
        .iter()
        .map(|s| s.n * (s.mean - grand_mean).powi(2))
        .sum();
    let ss_within: f64 = summaries.iter().map(|s| s.sum_squares).sum();

    let df_between = (k - 1) as f64;
    let df_within = n_total - k as f64;

    if df_within <= 0.0 {
        return Err(anyhow::anyhow!(
            "ANOVA needs more observations than groups ({} observations, {} groups)",
            n_total,
            k
        ));
    }
    if ss_within <= 0.0 || !ss_within.is_finite() {
        return Err(anyhow::anyhow!(
            "Within-group variance is zero; the F-statistic is undefined"
        ));
    }

    let f_stat = (ss_between / df_between) / (ss_within / df_within);
    let p_value = f_test_p_value(f_stat, df_between, df_within)?;

    debug!(
        f_stat,
        p_value, df_between, df_within, ss_between, ss_within, "One-way ANOVA"
    );

    Ok(TestResult::new(f_stat, p_value)
        .with_degrees_of_freedom(df_between)
        .with_metadata("df_within", df_within)
        .with_metadata("ss_between", ss_between)
        .with_metadata("ss_within", ss_within))
}

/// Upper-tail probability of an F-statistic.
pub fn f_test_p_value(f_stat: f64, df1: f64, df2: f64) -> anyhow::Result<f64> {
    if f_stat.is_nan() {
        return Err(anyhow::anyhow!("F-statistic is NaN"));
    }
    if f_stat <= 0.0 {
        return Ok(1.0);
    }
    let dist = FisherSnedecor::new(df1, df2)?;
    Ok(dist.sf(f_stat).clamp(0.0, 1.0))
}
