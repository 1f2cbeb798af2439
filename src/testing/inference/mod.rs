use crate::testing::TestResult;
use single_utilities::traits::FloatOps;

pub mod parametric;

/// Statistical tests over a collection of independent group samples.
pub trait GroupStatTests<T>
where
    T: FloatOps,
{
    /// One-way ANOVA across all groups.
    fn one_way_anova(&self) -> anyhow::Result<TestResult<f64>>;
}

impl<T> GroupStatTests<T> for [Vec<T>]
where
    T: FloatOps,
{
    fn one_way_anova(&self) -> anyhow::Result<TestResult<f64>> {
        let groups: Vec<&[T]> = self.iter().map(|g| g.as_slice()).collect();
        parametric::one_way_anova(&groups)
    }
}
