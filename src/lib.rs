//! # expression-statistics
//!
//! A specialized Rust library for differential expression scoring and gene set
//! enrichment analysis of two-phenotype expression datasets.
//!
//! This crate provides the statistical core for comparing gene expression between
//! two phenotype groups (e.g. disease vs. control): a permutation-based null
//! distribution for a per-gene group-difference statistic, an analytic two-sample
//! t-test scorer, and the query-set annotation step that turns per-gene scores
//! into an enrichment-ready profile. Data acquisition, parsing, and plotting are
//! deliberately outside this crate; it consumes an in-memory
//! [`dataset::ExpressionDataset`] built by whatever loading layer a caller uses.
//!
//! ## Core Features
//!
//! - **Permutation Null Distributions**: seeded, reproducible resampling of
//!   sample-to-group assignment with a Welch-style standardized mean difference
//! - **Analytic Significance Scoring**: per-gene two-sample t-tests with
//!   min–max normalized statistics and p-values
//! - **Gene Set Enrichment**: query-set annotation and a running enrichment walk
//!   over genes ranked by differential-expression strength
//!
//! ## Module Organization
//!
//! - **[`dataset`]**: The in-memory expression data model
//! - **[`testing`]**: Two-sample tests and the significance scorer
//! - **[`enrichment`]**: Permutation engine and gene set enrichment methods
//! - **[`error`]**: The crate-wide error taxonomy

pub mod dataset;
pub mod enrichment;
pub mod error;
pub mod testing;

pub use error::{Result, StatError};
