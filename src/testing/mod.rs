//! Statistical tests for two-phenotype expression data.
//!
//! The analytic counterpart to the permutation engine: per-gene two-sample
//! t-tests between the reference and contrast phenotype groups, assembled
//! into a min–max normalized [`SignificanceTable`].

use crate::dataset::Gene;

pub mod parametric;
pub mod significance;

pub use significance::SignificanceScorer;

#[derive(Debug, Clone, Copy)]
pub enum TTestType {
    Student, // Equal variance
    Welch,   // Unequal variance
}

/// Outcome of a single two-sample test.
#[derive(Debug, Clone)]
pub struct TestResult {
    /// The test statistic value
    pub statistic: f64,
    /// The p-value of the test
    pub p_value: f64,
    /// Degrees of freedom (for parametric inference)
    pub degrees_of_freedom: Option<f64>,
}

impl TestResult {
    /// Create a new test result with minimal information
    pub fn new(statistic: f64, p_value: f64) -> Self {
        TestResult {
            statistic,
            p_value,
            degrees_of_freedom: None,
        }
    }

    /// Add degrees of freedom to the result
    pub fn with_degrees_of_freedom(mut self, df: f64) -> Self {
        self.degrees_of_freedom = Some(df);
        self
    }
}

/// Per-gene significance scores, min–max normalized to [0,1] per column and
/// sorted ascending by statistic.
///
/// Row order is a presentation convenience only; the gene identifier carried
/// in `genes` is the row identity, and consumers must not rely on position.
#[derive(Debug, Clone)]
pub struct SignificanceTable {
    /// Gene identifier of each row
    pub genes: Vec<Gene>,
    /// Normalized test statistics, ascending
    pub statistics: Vec<f64>,
    /// Normalized p-values, aligned with `genes`
    pub p_values: Vec<f64>,
}

impl SignificanceTable {
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Get the top n genes by normalized p-value
    pub fn top_genes(&self, n: usize) -> Vec<&Gene> {
        let mut indices: Vec<usize> = (0..self.p_values.len()).collect();
        indices.sort_by(|&a, &b| self.p_values[a].total_cmp(&self.p_values[b]));
        indices.truncate(n);
        indices.into_iter().map(|i| &self.genes[i]).collect()
    }
}
