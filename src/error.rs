//! Error taxonomy for structural and semantic validation failures.
//!
//! Every check in this crate distinguishes exactly two failure kinds: the
//! table does not have the shape we expect ([`StructureError`]), or it has
//! the shape but violates an interval invariant ([`SemanticError`]). A third
//! variant wraps [`PolarsError`] for faults inside the engine itself; those
//! never collapse to a boolean and always propagate to the caller.

use polars::prelude::{DataType, PolarsError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BedframeError {
    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error(transparent)]
    Semantic(#[from] SemanticError),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// Malformed structure: required columns absent or carrying unusable dtypes.
#[derive(Debug, Error)]
pub enum StructureError {
    #[error("missing columns: {missing:?}")]
    MissingColumns { missing: Vec<String> },

    #[error("column '{column}' has dtype {dtype}, expected {expected}")]
    BadDtype {
        column:   String,
        dtype:    DataType,
        expected: &'static str,
    },
}

/// Invariant violations on structurally valid tables.
#[derive(Debug, Error)]
pub enum SemanticError {
    #[error("starts exceed ends for {count} intervals")]
    InvertedIntervals { count: usize },

    #[error("intervals overlap: merged output covers {excess} fewer positions than the input total")]
    Overlapping { excess: i64 },

    #[error("duplicate region names: {duplicates:?}")]
    DuplicateNames { duplicates: Vec<String> },

    #[error("null values in column '{column}'")]
    NullValues { column: String },

    #[error("region labels missing from the view: {missing:?}")]
    Uncataloged { missing: Vec<String> },

    #[error("{count} intervals extend beyond their assigned view region")]
    NotContained { count: usize },

    #[error("view is not covered: {gaps} uncovered ranges remain")]
    NotCovering { gaps: usize },

    #[error("table rows are not in sorted order")]
    Unsorted,
}

impl BedframeError {
    /// True when the error describes a violated check rather than an
    /// engine fault.
    pub fn is_violation(&self) -> bool {
        !matches!(self, BedframeError::Polars(_))
    }
}
