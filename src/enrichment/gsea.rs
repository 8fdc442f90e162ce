//! Query-set annotation and the running enrichment walk.
//!
//! [`annotate_query_set`] converts a permutation run into a hit/non-hit
//! weight matrix: query genes keep their full permutation-score rows, all
//! other genes collapse to a uniform non-hit filler. [`enrichment_curve`]
//! walks genes ranked by observed differential-expression strength and
//! accumulates hit weights against a constant miss penalty, the classic
//! running enrichment statistic.

use ndarray::Array2;

use crate::dataset::{ExpressionDataset, Gene, GeneSet};
use crate::enrichment::permutation::{PermutationEngine, PermutationResult};
use crate::error::{Result, StatError};

/// Annotate a permutation run with query-set membership.
///
/// Per gene: its full permutation-score row when the gene is in
/// `query_gene_set`, otherwise a uniform filler of `1 / gene_count`
/// replicated across all permutation columns. Query genes absent from the
/// result simply never match.
///
/// # Errors
///
/// Fails with [`StatError::EmptyQuery`] when the query set is empty.
pub fn annotate_query_set(
    result: &PermutationResult,
    query_gene_set: &GeneSet,
) -> Result<Array2<f64>> {
    if query_gene_set.is_empty() {
        return Err(StatError::EmptyQuery);
    }

    let filler = 1.0 / result.gene_count() as f64;
    let mut annotated = result.permutations.clone();
    for (row, gene) in result.genes.iter().enumerate() {
        if !query_gene_set.contains(gene) {
            annotated.row_mut(row).fill(filler);
        }
    }
    Ok(annotated)
}

/// A running enrichment statistic walked across ranked genes.
#[derive(Debug, Clone)]
pub struct EnrichmentCurve {
    /// Genes ranked by observed statistic, descending
    pub genes: Vec<Gene>,
    /// Cumulative enrichment score after each gene
    pub running_score: Vec<f64>,
}

impl EnrichmentCurve {
    /// Rank position and value of the maximum-magnitude excursion.
    pub fn peak(&self) -> Option<(usize, f64)> {
        self.running_score
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
    }
}

/// Walk the running enrichment statistic over a permutation run.
///
/// Genes are ranked by observed statistic, descending. A query hit adds its
/// observed statistic to the running sum; a miss subtracts the uniform
/// non-hit weight `1 / |query|`.
///
/// # Errors
///
/// Fails with [`StatError::EmptyQuery`] when the query set is empty.
pub fn enrichment_curve(
    result: &PermutationResult,
    query_gene_set: &GeneSet,
) -> Result<EnrichmentCurve> {
    if query_gene_set.is_empty() {
        return Err(StatError::EmptyQuery);
    }

    let mut ranked: Vec<usize> = (0..result.gene_count()).collect();
    ranked.sort_by(|&a, &b| result.observed[b].total_cmp(&result.observed[a]));

    let miss_weight = 1.0 / query_gene_set.len() as f64;
    let mut genes = Vec::with_capacity(ranked.len());
    let mut running_score = Vec::with_capacity(ranked.len());
    let mut cumulative = 0.0;
    for &row in &ranked {
        let gene = &result.genes[row];
        if query_gene_set.contains(gene) {
            cumulative += result.observed[row];
        } else {
            cumulative -= miss_weight;
        }
        genes.push(gene.clone());
        running_score.push(cumulative);
    }

    Ok(EnrichmentCurve {
        genes,
        running_score,
    })
}

/// One-call gene set enrichment analysis: permutation estimate, ranking, and
/// the running enrichment walk.
#[derive(Debug, Clone)]
pub struct GseaAnalysis {
    pub query_gene_set: GeneSet,
    pub engine: PermutationEngine,
}

impl GseaAnalysis {
    /// Analysis with the default engine (1000 permutations, seed 0)
    pub fn new(query_gene_set: GeneSet) -> Self {
        GseaAnalysis {
            query_gene_set,
            engine: PermutationEngine::default(),
        }
    }

    /// Replace the permutation engine
    pub fn with_engine(mut self, engine: PermutationEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Estimate the null distribution and walk the enrichment curve for the
    /// query set.
    pub fn find_differentially_expressed(
        &self,
        dataset: &ExpressionDataset,
    ) -> Result<EnrichmentCurve> {
        let result = self.engine.estimate(dataset)?;
        enrichment_curve(&result, &self.query_gene_set)
    }
}
