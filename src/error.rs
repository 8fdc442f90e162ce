//! Error taxonomy for the statistical scoring engine.
//!
//! Every failure is surfaced to the caller immediately; nothing is retried and
//! no partial results are returned. The variants distinguish bad input detected
//! up front ([`StatError::Validation`]), internal shape mismatches
//! ([`StatError::Dimension`]), data on which a numeric operation is undefined
//! ([`StatError::DegenerateInput`]), and group-selection failures
//! ([`StatError::AmbiguousGroup`], [`StatError::EmptyQuery`]).

use thiserror::Error;

/// Errors produced by dataset construction and the scoring engines.
#[derive(Debug, Error)]
pub enum StatError {
    /// Malformed input shape or phenotype cardinality, detected before any
    /// computation begins.
    #[error("invalid dataset: {0}")]
    Validation(String),

    /// Shape mismatch between declared group sizes and actual array
    /// dimensions, or a nonpositive resampling count.
    #[error("dimension mismatch: {0}")]
    Dimension(String),

    /// A numeric operation is undefined for the given data (zero variance,
    /// zero range).
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// The reference/contrast phenotype groups cannot be determined by the
    /// naming heuristic.
    #[error("ambiguous phenotype groups: {0}")]
    AmbiguousGroup(String),

    /// The query gene set is empty, so hit weights and any downstream
    /// ranking are degenerate.
    #[error("query gene set is empty")]
    EmptyQuery,
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, StatError>;
