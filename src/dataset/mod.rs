//! In-memory data model for two-phenotype expression datasets.
//!
//! An [`ExpressionDataset`] maps sample identifiers to expression profiles,
//! each carrying one of exactly two phenotype labels. The dataset is built
//! once by an external loading layer and treated as immutable here; the
//! scoring engines only ever take read-only views.
//!
//! The central export is [`ExpressionDataset::matrix`], which re-expresses the
//! dataset as a dense genes × samples array with samples grouped contiguously
//! by phenotype. Every group statistic downstream slices that array with fixed
//! group sizes rather than boolean masks, so contiguity is an invariant, not a
//! convenience.

use std::collections::{HashMap, HashSet};
use std::fmt;

use ndarray::Array2;

use crate::error::{Result, StatError};

/// An opaque gene identifier with value equality and hashing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Gene(String);

impl Gene {
    pub fn new(name: impl Into<String>) -> Self {
        Gene(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Gene {
    fn from(name: &str) -> Self {
        Gene(name.to_string())
    }
}

impl From<String> for Gene {
    fn from(name: String) -> Self {
        Gene(name)
    }
}

/// A set of genes used purely as a membership filter.
pub type GeneSet = HashSet<Gene>;

/// A single sample: identifier, expression vector, and phenotype label.
///
/// The expression vector is aligned to the owning dataset's gene list: entry
/// `i` is the expression level of gene `i`.
#[derive(Debug, Clone)]
pub struct Sample {
    pub id: String,
    pub phenotype: String,
    pub expression: Vec<f64>,
}

impl Sample {
    pub fn new(
        id: impl Into<String>,
        phenotype: impl Into<String>,
        expression: Vec<f64>,
    ) -> Self {
        Sample {
            id: id.into(),
            phenotype: phenotype.into(),
            expression,
        }
    }
}

/// A validated two-phenotype expression dataset.
///
/// Construction enforces the invariants the scoring engines rely on: exactly
/// two distinct phenotype labels, unique gene and sample identifiers, and one
/// expression value per gene in every sample. Violations are usage errors and
/// fail fast with [`StatError::Validation`].
#[derive(Debug, Clone)]
pub struct ExpressionDataset {
    genes: Vec<Gene>,
    samples: Vec<Sample>,
    by_id: HashMap<String, usize>,
}

impl ExpressionDataset {
    /// Build a dataset from a gene list and a collection of samples.
    ///
    /// # Arguments
    ///
    /// * `genes` - Gene identifiers, one per row of every expression vector
    /// * `samples` - Samples in load order; this order defines which
    ///   phenotype label counts as "first-encountered"
    ///
    /// # Errors
    ///
    /// Fails with [`StatError::Validation`] when the gene list is empty or
    /// contains duplicates, when a sample's expression vector length differs
    /// from the gene count, when sample identifiers collide, or when the
    /// samples do not carry exactly two distinct phenotype labels.
    pub fn new(genes: Vec<Gene>, samples: impl IntoIterator<Item = Sample>) -> Result<Self> {
        if genes.is_empty() {
            return Err(StatError::Validation("gene list is empty".into()));
        }
        let mut seen_genes = HashSet::with_capacity(genes.len());
        for gene in &genes {
            if !seen_genes.insert(gene) {
                return Err(StatError::Validation(format!(
                    "duplicate gene identifier '{gene}'"
                )));
            }
        }

        let samples: Vec<Sample> = samples.into_iter().collect();
        if samples.is_empty() {
            return Err(StatError::Validation("dataset has no samples".into()));
        }

        let mut by_id = HashMap::with_capacity(samples.len());
        let mut labels: Vec<&str> = Vec::with_capacity(2);
        for (idx, sample) in samples.iter().enumerate() {
            if sample.expression.len() != genes.len() {
                return Err(StatError::Validation(format!(
                    "sample '{}' carries {} expression values for {} genes",
                    sample.id,
                    sample.expression.len(),
                    genes.len()
                )));
            }
            if by_id.insert(sample.id.clone(), idx).is_some() {
                return Err(StatError::Validation(format!(
                    "duplicate sample identifier '{}'",
                    sample.id
                )));
            }
            if !labels.contains(&sample.phenotype.as_str()) {
                labels.push(&sample.phenotype);
            }
        }
        if labels.len() != 2 {
            return Err(StatError::Validation(format!(
                "expected exactly two phenotype labels, found {}: {:?}",
                labels.len(),
                labels
            )));
        }

        Ok(ExpressionDataset {
            genes,
            samples,
            by_id,
        })
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    pub fn gene_count(&self) -> usize {
        self.genes.len()
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// All samples in load order.
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Look up a sample by identifier.
    pub fn sample(&self, id: &str) -> Option<&Sample> {
        self.by_id.get(id).map(|&idx| &self.samples[idx])
    }

    /// The two phenotype labels in first-encounter (load) order.
    pub fn phenotype_labels(&self) -> [&str; 2] {
        let first = self.samples[0].phenotype.as_str();
        let second = self
            .samples
            .iter()
            .map(|s| s.phenotype.as_str())
            .find(|&p| p != first)
            .expect("constructor guarantees two phenotype labels");
        [first, second]
    }

    /// Number of samples carrying each phenotype label.
    ///
    /// The counts equal the contiguous block widths of [`matrix`](Self::matrix);
    /// the permutation engine derives its fixed slice boundary from them.
    pub fn phenotype_group_sizes(&self) -> HashMap<String, usize> {
        let mut sizes = HashMap::with_capacity(2);
        for sample in &self.samples {
            *sizes.entry(sample.phenotype.clone()).or_insert(0) += 1;
        }
        sizes
    }

    /// The sub-collection of samples with the given phenotype label, in load
    /// order.
    pub fn select_phenotype(&self, label: &str) -> Vec<&Sample> {
        self.samples
            .iter()
            .filter(|s| s.phenotype == label)
            .collect()
    }

    /// Dense genes × group-samples array for one phenotype group.
    ///
    /// # Errors
    ///
    /// Fails with [`StatError::Validation`] when no sample carries `label`.
    pub fn group_matrix(&self, label: &str) -> Result<Array2<f64>> {
        let members = self.select_phenotype(label);
        if members.is_empty() {
            return Err(StatError::Validation(format!(
                "no samples with phenotype label '{label}'"
            )));
        }
        let mut values = Array2::zeros((self.genes.len(), members.len()));
        for (col, sample) in members.iter().enumerate() {
            for (row, &level) in sample.expression.iter().enumerate() {
                values[[row, col]] = level;
            }
        }
        Ok(values)
    }

    /// Re-express the dataset as a genes × samples matrix with phenotype
    /// groups contiguous.
    ///
    /// Columns are ordered by a stable sort on the phenotype label
    /// (descending), so repeated calls on an unmodified dataset yield
    /// identical arrays and within-group sample order follows load order.
    pub fn matrix(&self) -> ExpressionMatrix {
        let mut order: Vec<usize> = (0..self.samples.len()).collect();
        order.sort_by(|&a, &b| self.samples[b].phenotype.cmp(&self.samples[a].phenotype));

        let mut values = Array2::zeros((self.genes.len(), self.samples.len()));
        let mut sample_ids = Vec::with_capacity(self.samples.len());
        let mut phenotypes = Vec::with_capacity(self.samples.len());
        for (col, &idx) in order.iter().enumerate() {
            let sample = &self.samples[idx];
            for (row, &level) in sample.expression.iter().enumerate() {
                values[[row, col]] = level;
            }
            sample_ids.push(sample.id.clone());
            phenotypes.push(sample.phenotype.clone());
        }

        ExpressionMatrix {
            genes: self.genes.clone(),
            sample_ids,
            phenotypes,
            values,
        }
    }
}

/// A dataset rendered as a dense genes × samples array with contiguous
/// phenotype groups.
///
/// The leading contiguous block of columns all carry
/// [`leading_group`](Self::leading_group)'s label; the remaining columns all
/// carry the other label.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionMatrix {
    genes: Vec<Gene>,
    sample_ids: Vec<String>,
    phenotypes: Vec<String>,
    values: Array2<f64>,
}

impl ExpressionMatrix {
    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    /// Sample identifiers in column order.
    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    /// Phenotype label of each column.
    pub fn column_phenotypes(&self) -> &[String] {
        &self.phenotypes
    }

    pub fn gene_count(&self) -> usize {
        self.values.nrows()
    }

    pub fn sample_count(&self) -> usize {
        self.values.ncols()
    }

    /// The genes × samples expression values.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Label and width of the leading contiguous phenotype block.
    pub fn leading_group(&self) -> (&str, usize) {
        let label = self.phenotypes[0].as_str();
        let width = self.phenotypes.iter().take_while(|p| *p == label).count();
        (label, width)
    }
}
