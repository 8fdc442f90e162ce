//! Permutation-based null distribution for a per-gene group-difference
//! statistic.
//!
//! The engine repeatedly permutes the sample-to-group assignment of an
//! expression matrix and recomputes, for every gene, a Welch-style
//! standardized mean difference between the two phenotype groups. Shuffling
//! reassigns whole samples: the same permutation applies across all genes
//! within an iteration, so each sample's gene-correlation structure survives
//! while the group labeling is destroyed. The resulting score matrix is the
//! empirical null against which the observed (unshuffled) column is judged.

use log::debug;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::dataset::{ExpressionDataset, Gene};
use crate::error::{Result, StatError};

/// Observed statistic plus the permuted score matrix from one engine run.
///
/// Column 0 of `permutations` is the observed (unshuffled) assignment;
/// columns 1.. are the shuffled-null draws. Produced fresh per invocation and
/// never mutated after return.
#[derive(Debug, Clone)]
pub struct PermutationResult {
    /// Gene identifier of each row
    pub genes: Vec<Gene>,
    /// Observed statistic per gene (a copy of column 0)
    pub observed: Array1<f64>,
    /// Genes × permutations score matrix
    pub permutations: Array2<f64>,
}

impl PermutationResult {
    pub fn gene_count(&self) -> usize {
        self.permutations.nrows()
    }

    pub fn permutation_count(&self) -> usize {
        self.permutations.ncols()
    }
}

/// Seeded permutation estimator for the per-gene group-difference statistic.
///
/// Iterations beyond the observed one are independent: each draws its sample
/// ordering from a stream seeded by the engine seed and the iteration index,
/// so batches run in parallel and concatenate deterministically. Equal seed
/// and input produce bit-identical output.
#[derive(Debug, Clone, Copy)]
pub struct PermutationEngine {
    permutations: usize,
    seed: u64,
}

impl Default for PermutationEngine {
    fn default() -> Self {
        PermutationEngine {
            permutations: 1000,
            seed: 0,
        }
    }
}

impl PermutationEngine {
    pub fn new(permutations: usize) -> Self {
        PermutationEngine {
            permutations,
            seed: 0,
        }
    }

    /// Set the seed for the permutation streams
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn permutations(&self) -> usize {
        self.permutations
    }

    /// Estimate the observed statistic and its empirical null distribution.
    ///
    /// The engine works on its own copy of the expression matrix; the
    /// caller's dataset is never mutated.
    ///
    /// # Errors
    ///
    /// Fails with [`StatError::Dimension`] when the permutation count is not
    /// positive or the phenotype group sizes do not add up to the matrix's
    /// sample count, and with [`StatError::DegenerateInput`] when a gene's
    /// statistic is undefined (zero variance in both groups of a split).
    pub fn estimate(&self, dataset: &ExpressionDataset) -> Result<PermutationResult> {
        if self.permutations < 1 {
            return Err(StatError::Dimension(
                "permutation count must be at least 1".into(),
            ));
        }

        let matrix = dataset.matrix();
        let sizes = dataset.phenotype_group_sizes();
        let (leading_label, _) = matrix.leading_group();
        let n_leading = sizes.get(leading_label).copied().unwrap_or(0);
        let n_total: usize = sizes.values().sum();
        if n_total != matrix.sample_count() {
            return Err(StatError::Dimension(format!(
                "phenotype group sizes sum to {} but the matrix has {} samples",
                n_total,
                matrix.sample_count()
            )));
        }

        debug!(
            "permutation null: {} genes, {} samples ({} '{}' vs {} contrast), {} iterations",
            matrix.gene_count(),
            n_total,
            n_leading,
            leading_label,
            n_total - n_leading,
            self.permutations
        );

        let values = matrix.values();
        let genes = matrix.genes();
        let identity: Vec<usize> = (0..n_total).collect();

        // Iteration 0: the true assignment. Scored before any shuffle.
        let observed = group_difference_scores(values, genes, &identity, n_leading)?;

        let shuffled: Vec<Vec<f64>> = (1..self.permutations)
            .into_par_iter()
            .map(|iteration| {
                let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(iteration as u64));
                let mut order = identity.clone();
                order.shuffle(&mut rng);
                group_difference_scores(values, genes, &order, n_leading)
            })
            .collect::<Result<_>>()?;

        let mut scores = Array2::zeros((matrix.gene_count(), self.permutations));
        for (row, &score) in observed.iter().enumerate() {
            scores[[row, 0]] = score;
        }
        for (offset, column) in shuffled.iter().enumerate() {
            for (row, &score) in column.iter().enumerate() {
                scores[[row, offset + 1]] = score;
            }
        }

        Ok(PermutationResult {
            genes: genes.to_vec(),
            observed: Array1::from(observed),
            permutations: scores,
        })
    }
}

/// Per-gene standardized mean difference for one sample ordering.
///
/// The first `n_leading` entries of `order` select group A's columns, the
/// rest group B's. Variances are population (uncorrected), matching the
/// Welch-style standardization `|mean_A − mean_B| / sqrt(var_A/n_A +
/// var_B/n_B)`. An undefined 0/0 score is a `DegenerateInput` error; an
/// infinite score (perfect separation) is legal.
fn group_difference_scores(
    values: &Array2<f64>,
    genes: &[Gene],
    order: &[usize],
    n_leading: usize,
) -> Result<Vec<f64>> {
    let n_a = n_leading as f64;
    let n_b = (order.len() - n_leading) as f64;

    let mut scores = Vec::with_capacity(values.nrows());
    for row in 0..values.nrows() {
        let (mut sum_a, mut sum_sq_a) = (0.0, 0.0);
        for &col in &order[..n_leading] {
            let level = values[[row, col]];
            sum_a += level;
            sum_sq_a += level * level;
        }
        let (mut sum_b, mut sum_sq_b) = (0.0, 0.0);
        for &col in &order[n_leading..] {
            let level = values[[row, col]];
            sum_b += level;
            sum_sq_b += level * level;
        }

        let mean_a = sum_a / n_a;
        let mean_b = sum_b / n_b;
        let var_a = (sum_sq_a / n_a - mean_a * mean_a).max(0.0);
        let var_b = (sum_sq_b / n_b - mean_b * mean_b).max(0.0);

        let score = ((mean_a - mean_b) / (var_a / n_a + var_b / n_b).sqrt()).abs();
        if score.is_nan() {
            return Err(StatError::DegenerateInput(format!(
                "group-difference statistic undefined for gene '{}' (zero variance in both groups)",
                genes[row]
            )));
        }
        scores.push(score);
    }
    Ok(scores)
}
