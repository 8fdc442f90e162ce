//! Analytic significance scoring for two-phenotype datasets.
//!
//! Runs an independent two-sample t-test per gene between the reference and
//! contrast phenotype groups, then min–max normalizes the statistic and
//! p-value columns to [0,1]. The reference group is picked by a naming
//! heuristic: a label containing a wild-type or control marker token is
//! treated as the reference.

use log::debug;

use crate::dataset::{ExpressionDataset, Gene};
use crate::error::{Result, StatError};
use crate::testing::parametric::t_test_from_sums;
use crate::testing::{SignificanceTable, TTestType};

/// Substring tokens (lowercased) that mark a phenotype label as the
/// reference group.
const REFERENCE_MARKERS: [&str; 2] = ["wt", "ctrl"];

/// Per-gene two-sample significance scorer.
///
/// Produces a [`SignificanceTable`] with each column independently min–max
/// normalized and rows sorted ascending by statistic. Student's t-test is the
/// default; Welch's is available for unequal group variances.
#[derive(Debug, Clone, Copy)]
pub struct SignificanceScorer {
    pub test_type: TTestType,
}

impl Default for SignificanceScorer {
    fn default() -> Self {
        SignificanceScorer {
            test_type: TTestType::Student,
        }
    }
}

impl SignificanceScorer {
    pub fn new(test_type: TTestType) -> Self {
        SignificanceScorer { test_type }
    }

    /// Score every gene in the dataset.
    ///
    /// # Errors
    ///
    /// Fails with [`StatError::AmbiguousGroup`] when both phenotype labels
    /// match the reference-naming heuristic, and with
    /// [`StatError::DegenerateInput`] when a gene's statistic is undefined
    /// (zero within-group variance) or an output column is constant.
    pub fn score(&self, dataset: &ExpressionDataset) -> Result<SignificanceTable> {
        let (reference, contrast) = split_reference_contrast(dataset)?;
        debug!("significance scoring: reference '{reference}', contrast '{contrast}'");

        let reference_values = dataset.group_matrix(&reference)?;
        let contrast_values = dataset.group_matrix(&contrast)?;
        let n_ref = reference_values.ncols() as f64;
        let n_con = contrast_values.ncols() as f64;

        let mut rows: Vec<(Gene, f64, f64)> = Vec::with_capacity(dataset.gene_count());
        for (idx, gene) in dataset.genes().iter().enumerate() {
            let (mut sum_r, mut sum_sq_r) = (0.0, 0.0);
            for &level in reference_values.row(idx) {
                sum_r += level;
                sum_sq_r += level * level;
            }
            let (mut sum_c, mut sum_sq_c) = (0.0, 0.0);
            for &level in contrast_values.row(idx) {
                sum_c += level;
                sum_sq_c += level * level;
            }

            let result =
                t_test_from_sums(sum_r, sum_sq_r, n_ref, sum_c, sum_sq_c, n_con, self.test_type);
            if !result.statistic.is_finite() {
                return Err(StatError::DegenerateInput(format!(
                    "t-statistic undefined for gene '{gene}' (zero within-group variance)"
                )));
            }
            rows.push((gene.clone(), result.statistic, result.p_value));
        }

        rows.sort_by(|a, b| a.1.total_cmp(&b.1));

        let genes: Vec<Gene> = rows.iter().map(|r| r.0.clone()).collect();
        let mut statistics: Vec<f64> = rows.iter().map(|r| r.1).collect();
        let mut p_values: Vec<f64> = rows.iter().map(|r| r.2).collect();
        min_max_normalize(&mut statistics, "statistic")?;
        min_max_normalize(&mut p_values, "p-value")?;

        Ok(SignificanceTable {
            genes,
            statistics,
            p_values,
        })
    }
}

/// Pick the reference and contrast phenotype labels.
///
/// A label containing one of [`REFERENCE_MARKERS`] (case-insensitive) is the
/// reference; when neither matches, the first-encountered label is the
/// reference by elimination. Both labels matching cannot be disambiguated.
fn split_reference_contrast(dataset: &ExpressionDataset) -> Result<(String, String)> {
    let labels = dataset.phenotype_labels();
    let matches_marker = |label: &str| {
        let lowered = label.to_lowercase();
        REFERENCE_MARKERS.iter().any(|m| lowered.contains(m))
    };

    let marked: Vec<&str> = labels.iter().copied().filter(|l| matches_marker(l)).collect();
    let reference = match marked.len() {
        2 => {
            return Err(StatError::AmbiguousGroup(format!(
                "both phenotype labels match a reference marker: '{}', '{}'",
                labels[0], labels[1]
            )));
        }
        1 => marked[0],
        _ => labels[0],
    };
    let contrast = if labels[0] == reference {
        labels[1]
    } else {
        labels[0]
    };
    Ok((reference.to_string(), contrast.to_string()))
}

/// Scale a column to [0,1] in place via `(x − min) / (max − min)`.
fn min_max_normalize(column: &mut [f64], name: &str) -> Result<()> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &x in column.iter() {
        min = min.min(x);
        max = max.max(x);
    }
    let range = max - min;
    if range == 0.0 {
        return Err(StatError::DegenerateInput(format!(
            "{name} column is constant ({min}); min-max normalization is undefined"
        )));
    }
    for x in column.iter_mut() {
        *x = (*x - min) / range;
    }
    Ok(())
}
