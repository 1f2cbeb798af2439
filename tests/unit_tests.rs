use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statrs::distribution::{ContinuousCDF, Normal};
use survey_statistics::estimation::{BootstrapConfig, bootstrap_gamma, fit_gamma, fit_normal};
use survey_statistics::testing::inference::GroupStatTests;
use survey_statistics::testing::inference::parametric::one_way_anova;
use survey_statistics::testing::{DEFAULT_ALPHA, TestResult};

/// Draw `n` values from N(mean, sd) by inverting the CDF of uniform draws.
fn normal_sample(rng: &mut StdRng, n: usize, mean: f64, sd: f64) -> Vec<f64> {
    let dist = Normal::new(mean, sd).unwrap();
    (0..n)
        .map(|_| dist.inverse_cdf(rng.random_range(1e-12..1.0)))
        .collect()
}

#[cfg(test)]
mod anova_tests {
    use super::*;

    #[test]
    fn check_large_effect_is_significant() {
        // Low activity group shifted far above the other two
        let high = vec![4.0, 5.0, 3.0, 4.0, 5.0, 4.0];
        let moderate = vec![5.0, 4.0, 4.0, 6.0, 5.0, 5.0];
        let low = vec![12.0, 13.0, 11.0, 12.0, 14.0, 13.0];

        let result: TestResult<f64> = vec![high, moderate, low].one_way_anova().unwrap();

        println!("=== ANOVA RESULTS ===");
        println!("F-statistic: {}", result.statistic);
        println!("P-value: {}", result.p_value);

        assert!(result.statistic.is_finite() && result.statistic > 0.0);
        assert!(result.is_significant(DEFAULT_ALPHA));
    }

    #[test]
    fn check_equal_distributions_are_rarely_significant() {
        let mut rng = StdRng::seed_from_u64(2024);
        let trials = 50;
        let mut not_significant = 0;

        for _ in 0..trials {
            let groups: Vec<Vec<f64>> = (0..3).map(|_| normal_sample(&mut rng, 30, 5.0, 1.5)).collect();
            let result = groups.one_way_anova().unwrap();
            assert!(result.statistic >= 0.0 && result.statistic.is_finite());
            assert!((0.0..=1.0).contains(&result.p_value));
            if !result.is_significant(DEFAULT_ALPHA) {
                not_significant += 1;
            }
        }

        println!("Non-significant trials: {}/{}", not_significant, trials);
        assert!(not_significant >= 40);
    }

    #[test]
    fn check_order_independence() {
        let high = [5.0, 6.0, 7.5, 4.0];
        let moderate = [3.0, 4.0, 2.5];
        let low = [8.0, 9.0, 7.0, 10.0, 8.5];
        let original = one_way_anova(&[&high[..], &moderate[..], &low[..]]).unwrap();

        let high_rev = [4.0, 7.5, 6.0, 5.0];
        let moderate_rev = [2.5, 3.0, 4.0];
        let low_rev = [8.5, 10.0, 7.0, 9.0, 8.0];
        let permuted = one_way_anova(&[&high_rev[..], &moderate_rev[..], &low_rev[..]]).unwrap();

        assert!((original.statistic - permuted.statistic).abs() < 1e-10);
        assert!((original.p_value - permuted.p_value).abs() < 1e-12);
    }

    #[test]
    fn check_empty_group_fails() {
        let groups = vec![vec![1.0, 2.0], vec![3.0, 4.0], Vec::new()];
        assert!(groups.one_way_anova().is_err());
    }
}

#[cfg(test)]
mod estimation_tests {
    use super::*;

    #[test]
    fn check_normal_std_uses_population_divisor() {
        let sample = [60.0, 65.0, 70.0, 75.0, 80.0];
        let fit = fit_normal(&sample, 0.95).unwrap();
        // Deviations 10, 5, 0, 5, 10 -> sum of squares 250, divided by n = 5
        assert!((fit.std_dev - 50.0f64.sqrt()).abs() < 1e-12);
        assert!((fit.variance() - 50.0).abs() < 1e-10);
    }

    #[test]
    fn check_normal_mean_interval_coverage() {
        let mut rng = StdRng::seed_from_u64(17);
        let true_mean = 72.0;
        let trials = 400;
        let mut covered = 0;

        for _ in 0..trials {
            let sample = normal_sample(&mut rng, 50, true_mean, 8.0);
            let fit = fit_normal(&sample, 0.95).unwrap();
            if fit.mean_ci.contains(true_mean) {
                covered += 1;
            }
        }

        let coverage = covered as f64 / trials as f64;
        println!("Mean CI coverage: {:.3}", coverage);
        assert!(coverage >= 0.90, "coverage too low: {}", coverage);
    }

    #[test]
    fn check_bootstrap_brackets_point_estimate() {
        let mut rng = StdRng::seed_from_u64(99);
        let sample = normal_sample(&mut rng, 200, 70.0, 9.0);

        let fit = fit_gamma(&sample).unwrap();
        let config = BootstrapConfig::default().with_iterations(300).with_seed(5);
        let boot = bootstrap_gamma(&sample, &config).unwrap();

        println!("shape {} in {:?}", fit.shape, boot.shape_ci);
        println!("scale {} in {:?}", fit.scale, boot.scale_ci);

        assert!(boot.shape_ci.lower <= boot.shape_ci.upper);
        assert!(boot.shape_ci.lower * 0.9 <= fit.shape && fit.shape <= boot.shape_ci.upper * 1.1);
        assert!(boot.scale_ci.lower * 0.9 <= fit.scale && fit.scale <= boot.scale_ci.upper * 1.1);
    }

    #[test]
    fn check_seeded_bootstrap_is_reproducible() {
        let sample = [62.0, 70.0, 75.0, 68.0, 80.0, 72.0, 66.0, 77.0, 71.0, 69.0];
        let config = BootstrapConfig::default().with_seed(123);
        let first = bootstrap_gamma(&sample, &config).unwrap();
        let second = bootstrap_gamma(&sample, &config).unwrap();
        assert_eq!(first.shape_ci, second.shape_ci);
        assert_eq!(first.scale_ci, second.scale_ci);
        assert_eq!(first.shapes.len(), 1000);
    }
}
