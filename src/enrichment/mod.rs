//! Gene set enrichment analysis for two-phenotype expression data.
//!
//! Enrichment here is permutation-based: the [`permutation`] module estimates
//! an empirical null distribution for a per-gene group-difference statistic by
//! repeatedly destroying the sample-to-phenotype assignment, and the [`gsea`]
//! module turns that output plus a query gene set into hit/non-hit weight
//! rows and a running enrichment curve.
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use expression_statistics::dataset::{ExpressionDataset, GeneSet};
//! use expression_statistics::enrichment::{GseaAnalysis, PermutationEngine};
//!
//! # fn run(dataset: &ExpressionDataset, query: GeneSet) -> expression_statistics::Result<()> {
//! let engine = PermutationEngine::new(1000).with_seed(7);
//! let curve = GseaAnalysis::new(query)
//!     .with_engine(engine)
//!     .find_differentially_expressed(dataset)?;
//! # Ok(())
//! # }
//! ```

mod gsea;
mod permutation;

pub use gsea::{annotate_query_set, enrichment_curve, EnrichmentCurve, GseaAnalysis};
pub use permutation::{PermutationEngine, PermutationResult};
