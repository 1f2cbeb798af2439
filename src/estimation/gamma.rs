//! Gamma distribution maximum likelihood fit with the location fixed at zero.
//!
//! With `loc = 0` the profile likelihood of the shape `k` reduces to the single equation
//! `ln k - ψ(k) = ln(mean(x)) - mean(ln x)`, which is solved by Newton iteration. The scale
//! follows as `mean(x) / k`.

use statrs::distribution::Gamma;
use statrs::function::gamma::digamma;
use tracing::debug;

const MAX_ITERATIONS: usize = 100;
const TOLERANCE: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GammaFit {
    /// Shape parameter k
    pub shape: f64,
    /// Scale parameter theta
    pub scale: f64,
    /// Newton iterations used for the shape
    pub iterations: usize,
}

impl GammaFit {
    /// The fitted distribution, for density evaluation.
    pub fn distribution(&self) -> anyhow::Result<Gamma> {
        // statrs parameterises by rate
        Ok(Gamma::new(self.shape, 1.0 / self.scale)?)
    }
}

/// Fit shape and scale by maximum likelihood, location fixed at 0.
///
/// Every observation must be strictly positive and the sample must not be constant.
pub fn fit_gamma(sample: &[f64]) -> anyhow::Result<GammaFit> {
    if sample.is_empty() {
        return Err(anyhow::anyhow!("Cannot fit a Gamma to an empty sample"));
    }
    if let Some(bad) = sample.iter().find(|&&x| !(x > 0.0 && x.is_finite())) {
        return Err(anyhow::anyhow!(
            "Gamma fitting requires positive finite values, found {}",
            bad
        ));
    }

    let n = sample.len() as f64;
    let mean = sample.iter().sum::<f64>() / n;
    let mean_log = sample.iter().map(|x| x.ln()).sum::<f64>() / n;
    let s = mean.ln() - mean_log;

    if !(s > 0.0) {
        return Err(anyhow::anyhow!(
            "Gamma fitting requires a sample with spread (log-mean gap is {})",
            s
        ));
    }

    let (shape, iterations) = solve_shape(s)?;
    let scale = mean / shape;

    debug!(shape, scale, iterations, "Gamma MLE");

    Ok(GammaFit {
        shape,
        scale,
        iterations,
    })
}

/// Solve `ln k - ψ(k) = s` for `k > 0`.
fn solve_shape(s: f64) -> anyhow::Result<(f64, usize)> {
    // Closed-form approximation, accurate to a few percent
    let mut k = (3.0 - s + ((s - 3.0).powi(2) + 24.0 * s).sqrt()) / (12.0 * s);

    for iteration in 1..=MAX_ITERATIONS {
        let g = k.ln() - digamma(k) - s;
        // Residual is at rounding level of ln k; further steps only chase noise
        if g.abs() <= 8.0 * f64::EPSILON * k.ln().abs().max(1.0) {
            return Ok((k, iteration));
        }
        let dg = 1.0 / k - trigamma(k);
        let mut next = k - g / dg;
        if !(next > 0.0) || !next.is_finite() {
            next = k / 2.0;
        }

        if ((next - k) / k).abs() < TOLERANCE {
            return Ok((next, iteration));
        }
        k = next;
    }

    Err(anyhow::anyhow!(
        "Gamma shape did not converge after {} iterations",
        MAX_ITERATIONS
    ))
}

/// Trigamma function ψ'(x) for x > 0.
///
/// Shifts the argument above 12 with ψ'(x) = ψ'(x + 1) + 1/x², then applies the asymptotic
/// series.
fn trigamma(x: f64) -> f64 {
    let mut x = x;
    let mut result = 0.0;
    while x < 12.0 {
        result += 1.0 / (x * x);
        x += 1.0;
    }

    let inv = 1.0 / x;
    let inv2 = inv * inv;
    result
        + inv
        + inv2 / 2.0
        + inv * inv2 * (1.0 / 6.0 - inv2 * (1.0 / 30.0 - inv2 * (1.0 / 42.0 - inv2 / 30.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_trigamma_known_values() {
        // ψ'(1) = π²/6, ψ'(0.5) = π²/2
        let pi2 = std::f64::consts::PI * std::f64::consts::PI;
        assert_relative_eq!(trigamma(1.0), pi2 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(trigamma(0.5), pi2 / 2.0, epsilon = 1e-12);
        assert_relative_eq!(trigamma(50.0), 0.020201333226697126, epsilon = 1e-12);
    }

    #[test]
    fn test_small_shape_reference() {
        let sample = [1.2, 0.5, 3.4, 2.2, 0.9, 1.7, 4.1, 0.3, 2.8, 1.5];
        let fit = fit_gamma(&sample).unwrap();
        assert_relative_eq!(fit.shape, 2.0471298768245973, max_relative = 1e-9);
        assert_relative_eq!(fit.scale, 0.9085891525774302, max_relative = 1e-9);
        assert_relative_eq!(fit.shape * fit.scale, 1.86, epsilon = 1e-9);
    }

    #[test]
    fn test_large_shape_reference() {
        let sample = [62.0, 70.0, 75.0, 68.0, 80.0, 72.0, 66.0, 77.0, 71.0, 69.0];
        let fit = fit_gamma(&sample).unwrap();
        assert_relative_eq!(fit.shape, 198.31168629527304, max_relative = 1e-8);
        assert_relative_eq!(fit.scale, 0.35802226952115003, max_relative = 1e-8);
    }

    #[test]
    fn test_distribution_matches_fit() {
        let sample = [1.2, 0.5, 3.4, 2.2, 0.9, 1.7, 4.1, 0.3, 2.8, 1.5];
        let fit = fit_gamma(&sample).unwrap();
        let dist = fit.distribution().unwrap();
        assert_relative_eq!(dist.shape(), fit.shape);
        assert_relative_eq!(dist.rate(), 1.0 / fit.scale);
    }

    #[test]
    fn test_non_positive_values_are_rejected() {
        assert!(fit_gamma(&[1.0, 0.0, 2.0]).is_err());
        assert!(fit_gamma(&[1.0, -3.0, 2.0]).is_err());
    }

    #[test]
    fn test_constant_sample_is_rejected() {
        assert!(fit_gamma(&[5.0, 5.0, 5.0]).is_err());
    }

    #[test]
    fn test_empty_sample_is_rejected() {
        assert!(fit_gamma(&[]).is_err());
    }
}
