//! Normal distribution maximum likelihood fit with analytic confidence intervals.

use super::{ConfidenceInterval, mean, population_variance};
use statrs::distribution::{ChiSquared, ContinuousCDF, Normal};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct NormalFit {
    /// Sample size
    pub n: usize,
    /// MLE of the mean
    pub mean: f64,
    /// MLE of the standard deviation (population convention, divisor `n`)
    pub std_dev: f64,
    /// Confidence level used for the intervals, e.g. 0.95
    pub confidence: f64,
    /// `mean ± z * std_dev / sqrt(n)`
    pub mean_ci: ConfidenceInterval,
    /// `n * variance / chi2(1 - alpha/2, n)` to `n * variance / chi2(alpha/2, n)`
    pub variance_ci: ConfidenceInterval,
}

impl NormalFit {
    pub fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }

    /// The fitted distribution, for density evaluation.
    pub fn distribution(&self) -> anyhow::Result<Normal> {
        Ok(Normal::new(self.mean, self.std_dev)?)
    }
}

/// Fit a Normal distribution by maximum likelihood.
///
/// The standard deviation is the population standard deviation, and the variance interval uses
/// `n` degrees of freedom to stay consistent with it.
///
/// # Arguments
///
/// * `sample` - Observations; must not be empty
/// * `confidence` - Confidence level in (0, 1)
pub fn fit_normal(sample: &[f64], confidence: f64) -> anyhow::Result<NormalFit> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(anyhow::anyhow!(
            "Confidence level must be in (0, 1), got {}",
            confidence
        ));
    }
    let mu = mean(sample).ok_or_else(|| anyhow::anyhow!("Cannot fit a Normal to an empty sample"))?;
    let var = population_variance(sample)
        .ok_or_else(|| anyhow::anyhow!("Cannot fit a Normal to an empty sample"))?;
    let sigma = var.sqrt();
    let n = sample.len();
    let n_f = n as f64;

    let alpha = 1.0 - confidence;
    let z = Normal::new(0.0, 1.0)?.inverse_cdf(1.0 - alpha / 2.0);
    let se_mu = sigma / n_f.sqrt();
    let mean_ci = ConfidenceInterval::new(mu - z * se_mu, mu + z * se_mu);

    let chi2 = ChiSquared::new(n_f)?;
    let variance_ci = ConfidenceInterval::new(
        n_f * var / chi2.inverse_cdf(1.0 - alpha / 2.0),
        n_f * var / chi2.inverse_cdf(alpha / 2.0),
    );

    debug!(n, mu, sigma, z, "Normal MLE");

    Ok(NormalFit {
        n,
        mean: mu,
        std_dev: sigma,
        confidence,
        mean_ci,
        variance_ci,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const HEART_RATES: [f64; 10] = [62.0, 70.0, 75.0, 68.0, 80.0, 72.0, 66.0, 77.0, 71.0, 69.0];

    #[test]
    fn test_reference_values() {
        let fit = fit_normal(&HEART_RATES, 0.95).unwrap();
        assert_eq!(fit.n, 10);
        assert_relative_eq!(fit.mean, 71.0, epsilon = 1e-12);
        assert_relative_eq!(fit.std_dev, 5.039841267341661, epsilon = 1e-12);
        assert_relative_eq!(fit.mean_ci.lower, 67.87633141889811, epsilon = 1e-6);
        assert_relative_eq!(fit.mean_ci.upper, 74.12366858110189, epsilon = 1e-6);
        assert_relative_eq!(fit.variance_ci.lower, 12.400419898233608, max_relative = 1e-6);
        assert_relative_eq!(fit.variance_ci.upper, 78.22671059825537, max_relative = 1e-6);
    }

    #[test]
    fn test_variance_interval_brackets_estimate() {
        let fit = fit_normal(&HEART_RATES, 0.95).unwrap();
        assert!(fit.variance_ci.contains(fit.variance()));
        assert!(fit.mean_ci.contains(fit.mean));
    }

    #[test]
    fn test_single_observation() {
        let fit = fit_normal(&[70.0], 0.95).unwrap();
        assert_relative_eq!(fit.std_dev, 0.0);
        assert_relative_eq!(fit.mean_ci.lower, fit.mean_ci.upper);
    }

    #[test]
    fn test_empty_sample_is_an_error() {
        assert!(fit_normal(&[], 0.95).is_err());
    }

    #[test]
    fn test_invalid_confidence_is_an_error() {
        assert!(fit_normal(&HEART_RATES, 1.0).is_err());
        assert!(fit_normal(&HEART_RATES, 0.0).is_err());
    }
}
