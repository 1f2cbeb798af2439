//! Parameter estimation for continuous distributions.
//!
//! Fits Normal and Gamma distributions to a univariate sample by maximum likelihood and
//! attaches 95% confidence intervals to every parameter:
//!
//! - **Normal** (`normal`): closed-form MLE with analytic intervals (z-based for the mean,
//!   chi-squared based for the variance)
//! - **Gamma** (`gamma`): MLE of shape and scale with the location fixed at 0
//! - **Bootstrap** (`bootstrap`): percentile intervals for the Gamma parameters from resamples
//!   drawn with replacement

use num_traits::Float;

pub mod bootstrap;
pub mod gamma;
pub mod normal;

pub use bootstrap::{BootstrapConfig, GammaBootstrap, bootstrap_gamma};
pub use gamma::{GammaFit, fit_gamma};
pub use normal::{NormalFit, fit_normal};

/// A two-sided confidence interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    pub fn new(lower: f64, upper: f64) -> Self {
        ConfidenceInterval { lower, upper }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Arithmetic mean. `None` for an empty sample.
pub fn mean<T: Float>(values: &[T]) -> Option<T> {
    if values.is_empty() {
        return None;
    }
    let n = T::from(values.len())?;
    Some(values.iter().fold(T::zero(), |acc, &v| acc + v) / n)
}

/// Population variance (divisor `n`). `None` for an empty sample.
pub fn population_variance<T: Float>(values: &[T]) -> Option<T> {
    let m = mean(values)?;
    let n = T::from(values.len())?;
    Some(
        values
            .iter()
            .fold(T::zero(), |acc, &v| acc + (v - m) * (v - m))
            / n,
    )
}

/// Percentile `q` (0..=100) of data sorted ascending, interpolating linearly between the two
/// nearest order statistics at rank `q / 100 * (n - 1)`.
pub fn percentile_sorted<T: Float>(sorted: &[T], q: f64) -> Option<T> {
    if sorted.is_empty() || !(0.0..=100.0).contains(&q) {
        return None;
    }
    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = T::from(rank - lo as f64)?;
    Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}
