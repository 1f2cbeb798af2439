use single_utilities::traits::FloatOps;
use std::collections::HashMap;

pub mod inference;

pub mod utils;

/// Significance level used for the verdict of a test.
pub const DEFAULT_ALPHA: f64 = 0.05;

#[derive(Debug, Clone)]
pub struct TestResult<T> {
    /// The test statistic value (e.g., F-statistic)
    pub statistic: T,
    /// The p-value of the test
    pub p_value: T,
    /// Degrees of freedom of the numerator (for parametric inference)
    pub degrees_of_freedom: Option<T>,
    /// Additional test-specific information
    pub metadata: HashMap<String, T>,
}

impl<T> TestResult<T>
where
    T: FloatOps,
{
    /// Create a new test result with minimal information
    pub fn new(statistic: T, p_value: T) -> Self {
        TestResult {
            statistic,
            p_value,
            degrees_of_freedom: None,
            metadata: HashMap::new(),
        }
    }

    /// Add degrees of freedom to the result
    pub fn with_degrees_of_freedom(mut self, df: T) -> Self {
        self.degrees_of_freedom = Some(df);
        self
    }

    /// Add additional metadata
    pub fn with_metadata(mut self, key: &str, value: T) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }

    /// Look up a metadata entry by key
    pub fn metadata_value(&self, key: &str) -> Option<T> {
        self.metadata.get(key).copied()
    }

    /// Check if the result is statistically significant at the given threshold.
    ///
    /// The comparison is strict: a p-value equal to `alpha` is not significant.
    pub fn is_significant(&self, alpha: T) -> bool {
        self.p_value < alpha
    }
}
