//! Nonparametric bootstrap intervals for the Gamma parameters.
//!
//! Each replicate draws `n` observations with replacement from the original sample and refits
//! shape and scale with the location fixed at 0. The interval bounds are the lower and upper
//! `(1 - confidence) / 2` percentiles of the replicate estimates, taken independently for the
//! shape and for the scale.
//!
//! Replicates run in parallel. Their RNG seeds are drawn serially from a single master
//! generator, so a fixed [`BootstrapConfig::seed`] gives the same intervals on any number of
//! threads. Without a seed the master generator is seeded from OS entropy.

use super::gamma::fit_gamma;
use super::{ConfidenceInterval, percentile_sorted};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};

/// Default number of bootstrap resamples
pub const DEFAULT_BOOTSTRAP_ITERATIONS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BootstrapConfig {
    /// Number of resamples
    pub n_boot: usize,
    /// Confidence level of the percentile intervals
    pub confidence: f64,
    /// Master seed; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        BootstrapConfig {
            n_boot: DEFAULT_BOOTSTRAP_ITERATIONS,
            confidence: 0.95,
            seed: None,
        }
    }
}

impl BootstrapConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_iterations(mut self, n_boot: usize) -> Self {
        self.n_boot = n_boot;
        self
    }
}

#[derive(Debug, Clone)]
pub struct GammaBootstrap {
    pub shape_ci: ConfidenceInterval,
    pub scale_ci: ConfidenceInterval,
    /// Shape estimate of every replicate, in replicate order
    pub shapes: Vec<f64>,
    /// Scale estimate of every replicate, in replicate order
    pub scales: Vec<f64>,
}

/// Bootstrap percentile intervals for Gamma shape and scale.
///
/// Fails if the sample is empty, if `n_boot` is zero, or if any replicate cannot be fitted
/// (for instance a resample made of a single repeated value).
pub fn bootstrap_gamma(sample: &[f64], config: &BootstrapConfig) -> anyhow::Result<GammaBootstrap> {
    if sample.is_empty() {
        return Err(anyhow::anyhow!("Cannot bootstrap an empty sample"));
    }
    if config.n_boot == 0 {
        return Err(anyhow::anyhow!("Bootstrap needs at least one resample"));
    }
    if !(config.confidence > 0.0 && config.confidence < 1.0) {
        return Err(anyhow::anyhow!(
            "Confidence level must be in (0, 1), got {}",
            config.confidence
        ));
    }

    let mut master = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let seeds: Vec<u64> = (0..config.n_boot).map(|_| master.random()).collect();

    let n = sample.len();
    let fits = seeds
        .into_par_iter()
        .map(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let resample: Vec<f64> = (0..n).map(|_| sample[rng.random_range(0..n)]).collect();
            fit_gamma(&resample)
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let shapes: Vec<f64> = fits.iter().map(|f| f.shape).collect();
    let scales: Vec<f64> = fits.iter().map(|f| f.scale).collect();

    let shape_ci = percentile_interval(&shapes, config.confidence)?;
    let scale_ci = percentile_interval(&scales, config.confidence)?;

    info!(
        n_boot = config.n_boot,
        seeded = config.seed.is_some(),
        "Bootstrap finished"
    );
    debug!(?shape_ci, ?scale_ci, "Bootstrap percentile intervals");

    Ok(GammaBootstrap {
        shape_ci,
        scale_ci,
        shapes,
        scales,
    })
}

/// Equal-tailed percentile interval of replicate estimates.
pub fn percentile_interval(estimates: &[f64], confidence: f64) -> anyhow::Result<ConfidenceInterval> {
    let mut sorted = estimates.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let tail = (1.0 - confidence) / 2.0 * 100.0;
    let lower = percentile_sorted(&sorted, tail);
    let upper = percentile_sorted(&sorted, 100.0 - tail);
    match (lower, upper) {
        (Some(lower), Some(upper)) => Ok(ConfidenceInterval::new(lower, upper)),
        _ => Err(anyhow::anyhow!("No estimates to take percentiles from")),
    }
}
