//! The set-algebra engine: `sort`, `merge`, `complement` and `trim`.
//!
//! All four operations group rows by chromosome first; cross-chromosome
//! interactions never occur. Within a chromosome, intervals are treated as a
//! multiset of half-open integer ranges `[start, end)`. Inputs are validated
//! through [`crate::checks::check_bedframe`] before any sweep runs, so the
//! algorithms themselves assume `start <= end` throughout.
//!
//! Every operation is pure: it returns a fresh `DataFrame` and never mutates
//! its input.

mod complement;
mod merge;
mod sort;
mod trim;

pub use complement::complement;
pub use merge::merge;
pub use sort::sort_bedframe;
pub use trim::trim;

use itertools::izip;
use polars::prelude::*;

use crate::data_structs::ColumnSpec;
use crate::error::{
    BedframeError,
    SemanticError,
};

/// Extracts a chromosome column as owned strings, whatever its label dtype.
pub(crate) fn chrom_values(
    df: &DataFrame,
    name: &str,
) -> Result<Vec<String>, BedframeError> {
    let col = df.column(name)?.cast(&DataType::String)?;
    col.str()?
        .into_iter()
        .map(|v| {
            v.map(str::to_owned).ok_or_else(|| {
                SemanticError::NullValues {
                    column: name.to_owned(),
                }
                .into()
            })
        })
        .collect()
}

/// Extracts a coordinate column as `i64`, whatever its integer width.
pub(crate) fn int_values(
    df: &DataFrame,
    name: &str,
) -> Result<Vec<i64>, BedframeError> {
    let col = df.column(name)?.cast(&DataType::Int64)?;
    col.i64()?
        .into_iter()
        .map(|v| {
            v.ok_or_else(|| {
                SemanticError::NullValues {
                    column: name.to_owned(),
                }
                .into()
            })
        })
        .collect()
}

/// Extracts a nullable label column as optional strings.
pub(crate) fn opt_label_values(
    df: &DataFrame,
    name: &str,
) -> Result<Vec<Option<String>>, BedframeError> {
    let col = df.column(name)?.cast(&DataType::String)?;
    Ok(col
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_owned))
        .collect())
}

/// Total covered length: the sum of `end - start` over all rows.
pub(crate) fn total_length(
    df: &DataFrame,
    cols: &ColumnSpec,
) -> Result<i64, BedframeError> {
    let starts = int_values(df, &cols.start)?;
    let ends = int_values(df, &cols.end)?;
    Ok(izip!(starts, ends).map(|(s, e)| e - s).sum())
}
