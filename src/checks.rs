//! The validity predicate layer.
//!
//! Every predicate comes in two calling conventions built from the same
//! logic, per the crate-wide dual-mode contract:
//!
//! - `check_*` is the raising form: `Ok(())` when the property holds, a typed
//!   [`BedframeError`] naming the first violated invariant otherwise.
//! - `is_*` is the boolean form: structural and semantic violations collapse
//!   to `Ok(false)`, while engine faults ([`BedframeError::Polars`]) stay
//!   errors — a predicate never answers `false` for a condition it did not
//!   actually check.
//!
//! Predicates are read-only queries; none mutates its arguments.

use hashbrown::HashSet;
use itertools::{
    izip,
    Itertools,
};
use polars::prelude::*;

use crate::data_structs::colspec::{
    DEFAULT_NAME_COL,
    DEFAULT_VIEW_COL,
};
use crate::data_structs::{
    ColumnSpec,
    ViewFrame,
};
use crate::error::{
    BedframeError,
    SemanticError,
    StructureError,
};
use crate::ops::{
    self,
    chrom_values,
    int_values,
    opt_label_values,
};

/// Collapses a check result into the boolean calling convention.
fn collapse(res: Result<(), BedframeError>) -> PolarsResult<bool> {
    match res {
        Ok(()) => Ok(true),
        Err(BedframeError::Polars(err)) => Err(err),
        Err(_) => Ok(false),
    }
}

/// Verifies that every required column is present as a table header.
pub fn verify_columns(
    df: &DataFrame,
    required: &[&str],
) -> Result<(), BedframeError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|name| df.get_column_index(name).is_none())
        .map(|name| (*name).to_owned())
        .collect();
    if !missing.is_empty() {
        return Err(StructureError::MissingColumns { missing }.into());
    }
    Ok(())
}

/// Verifies that the column triple carries usable dtypes: any label-like
/// dtype for the chromosome, any integer width for start and end.
pub fn verify_dtypes(
    df: &DataFrame,
    cols: &ColumnSpec,
) -> Result<(), BedframeError> {
    let chrom_dtype = df.column(&cols.chrom)?.dtype();
    if !is_label_dtype(chrom_dtype) {
        return Err(StructureError::BadDtype {
            column:   cols.chrom.clone(),
            dtype:    chrom_dtype.clone(),
            expected: "string, categorical or enum",
        }
        .into());
    }
    for name in [&cols.start, &cols.end] {
        let dtype = df.column(name)?.dtype();
        if !is_integer_dtype(dtype) {
            return Err(StructureError::BadDtype {
                column:   name.clone(),
                dtype:    dtype.clone(),
                expected: "a signed or unsigned integer",
            }
            .into());
        }
    }
    Ok(())
}

fn is_label_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::String | DataType::Categorical(_, _) | DataType::Enum(_, _)
    )
}

fn is_integer_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Raising form of [`is_bedframe`]: columns present, dtypes valid, and every
/// row satisfying `start <= end`.
pub fn check_bedframe(
    df: &DataFrame,
    cols: Option<&ColumnSpec>,
) -> Result<(), BedframeError> {
    let cols = ColumnSpec::resolve(cols);
    verify_columns(df, &cols.triple())?;
    verify_dtypes(df, &cols)?;

    let starts = int_values(df, &cols.start)?;
    let ends = int_values(df, &cols.end)?;
    let count = izip!(starts, ends).filter(|(s, e)| s > e).count();
    if count > 0 {
        return Err(SemanticError::InvertedIntervals { count }.into());
    }
    Ok(())
}

pub fn is_bedframe(
    df: &DataFrame,
    cols: Option<&ColumnSpec>,
) -> PolarsResult<bool> {
    collapse(check_bedframe(df, cols))
}

/// Raising form of [`is_overlapping`]: fails when merging strictly shrinks
/// the total covered length, i.e. some pair of intervals shares positions.
pub fn check_overlapping(
    df: &DataFrame,
    cols: Option<&ColumnSpec>,
) -> Result<(), BedframeError> {
    let cols = ColumnSpec::resolve(cols);
    let merged = ops::merge(df, Some(&cols))?;
    let input_len = ops::total_length(df, &cols)?;
    let merged_len = ops::total_length(&merged, &cols)?;
    if input_len > merged_len {
        return Err(SemanticError::Overlapping {
            excess: input_len - merged_len,
        }
        .into());
    }
    Ok(())
}

pub fn is_overlapping(
    df: &DataFrame,
    cols: Option<&ColumnSpec>,
) -> PolarsResult<bool> {
    // Overlap is the property being asked for, so the polarity flips.
    match check_overlapping(df, cols) {
        Ok(()) => Ok(false),
        Err(BedframeError::Semantic(SemanticError::Overlapping { .. })) => {
            Ok(true)
        },
        Err(BedframeError::Polars(err)) => Err(err),
        Err(_) => Ok(false),
    }
}

/// Raising form of [`is_viewframe`]: bedframe validity plus a present,
/// unique, non-null name column, no nulls anywhere, and non-overlap.
pub fn check_viewframe(
    df: &DataFrame,
    view_name_col: Option<&str>,
    cols: Option<&ColumnSpec>,
) -> Result<(), BedframeError> {
    let cols = ColumnSpec::resolve(cols);
    let name_col = view_name_col.unwrap_or(DEFAULT_NAME_COL);
    verify_columns(df, &[
        cols.chrom.as_str(),
        cols.start.as_str(),
        cols.end.as_str(),
        name_col,
    ])?;
    check_bedframe(df, Some(&cols))?;

    for column in df.get_columns() {
        if column.null_count() > 0 {
            return Err(SemanticError::NullValues {
                column: column.name().to_string(),
            }
            .into());
        }
    }

    let names = chrom_values(df, name_col)?;
    let duplicates: Vec<String> =
        names.iter().duplicates().cloned().collect();
    if !duplicates.is_empty() {
        return Err(SemanticError::DuplicateNames { duplicates }.into());
    }

    check_overlapping(df, Some(&cols))?;
    Ok(())
}

pub fn is_viewframe(
    df: &DataFrame,
    view_name_col: Option<&str>,
    cols: Option<&ColumnSpec>,
) -> PolarsResult<bool> {
    collapse(check_viewframe(df, view_name_col, cols))
}

/// Raising form of [`is_sorted`]: the table must equal its own sorted image
/// row for row. The comparison sorts a defensive copy; the input is never
/// touched.
pub fn check_sorted(
    df: &DataFrame,
    view: Option<&ViewFrame>,
    df_view_col: Option<&str>,
    cols: Option<&ColumnSpec>,
) -> Result<(), BedframeError> {
    let sorted = ops::sort_bedframe(df, view, df_view_col, cols)?;
    // Same-position nulls in passthrough columns compare equal.
    if !df.equals_missing(&sorted) {
        return Err(SemanticError::Unsorted.into());
    }
    Ok(())
}

pub fn is_sorted(
    df: &DataFrame,
    view: Option<&ViewFrame>,
    df_view_col: Option<&str>,
    cols: Option<&ColumnSpec>,
) -> PolarsResult<bool> {
    collapse(check_sorted(df, view, df_view_col, cols))
}

/// Raising form of [`is_cataloged`]: every region label in the table must
/// name a region of the view. A subset test on label sets, not positional.
pub fn check_cataloged(
    df: &DataFrame,
    view: &ViewFrame,
    df_view_col: Option<&str>,
) -> Result<(), BedframeError> {
    let view_col = df_view_col.unwrap_or(DEFAULT_VIEW_COL);
    verify_columns(df, &[view_col])?;

    let labels = opt_label_values(df, view_col)?;
    if labels.iter().any(Option::is_none) {
        return Err(SemanticError::NullValues {
            column: view_col.to_owned(),
        }
        .into());
    }
    let catalog: HashSet<String> = view
        .regions()?
        .into_iter()
        .map(|region| region.name)
        .collect();
    let missing: Vec<String> = labels
        .into_iter()
        .flatten()
        .filter(|label| !catalog.contains(label))
        .unique()
        .sorted()
        .collect();
    if !missing.is_empty() {
        return Err(SemanticError::Uncataloged { missing }.into());
    }
    Ok(())
}

pub fn is_cataloged(
    df: &DataFrame,
    view: &ViewFrame,
    df_view_col: Option<&str>,
) -> PolarsResult<bool> {
    collapse(check_cataloged(df, view, df_view_col))
}

/// Raising form of [`is_contained`]: cataloged, and trimming to the assigned
/// regions changes no coordinate.
pub fn check_contained(
    df: &DataFrame,
    view: &ViewFrame,
    df_view_col: Option<&str>,
    cols: Option<&ColumnSpec>,
) -> Result<(), BedframeError> {
    let cols = ColumnSpec::resolve(cols);
    check_cataloged(df, view, df_view_col)?;

    let trimmed = ops::trim(df, view, df_view_col, Some(&cols))?;
    let count = izip!(
        int_values(df, &cols.start)?,
        int_values(df, &cols.end)?,
        int_values(&trimmed, &cols.start)?,
        int_values(&trimmed, &cols.end)?
    )
    .filter(|(s, e, ts, te)| s != ts || e != te)
    .count();
    if count > 0 {
        return Err(SemanticError::NotContained { count }.into());
    }
    Ok(())
}

pub fn is_contained(
    df: &DataFrame,
    view: &ViewFrame,
    df_view_col: Option<&str>,
    cols: Option<&ColumnSpec>,
) -> PolarsResult<bool> {
    collapse(check_contained(df, view, df_view_col, cols))
}

/// Raising form of [`is_covering`]: the complement against the view must be
/// empty. Region assignments on the table are irrelevant; the complement
/// re-derives them.
pub fn check_covering(
    df: &DataFrame,
    view: &ViewFrame,
    cols: Option<&ColumnSpec>,
) -> Result<(), BedframeError> {
    let comp = ops::complement(df, view, cols)?;
    if comp.height() > 0 {
        return Err(SemanticError::NotCovering {
            gaps: comp.height(),
        }
        .into());
    }
    Ok(())
}

pub fn is_covering(
    df: &DataFrame,
    view: &ViewFrame,
    cols: Option<&ColumnSpec>,
) -> PolarsResult<bool> {
    collapse(check_covering(df, view, cols))
}

/// Raising form of [`is_tiling`]: the reference table is first coerced into a
/// view, then the three conjuncts are evaluated in fixed order — overlap,
/// covering, containment — and the first violated one is reported.
///
/// The caller's `cols` threads through every nested check, including the view
/// coercion.
pub fn check_tiling(
    df: &DataFrame,
    view_df: &DataFrame,
    df_view_col: Option<&str>,
    view_name_col: Option<&str>,
    cols: Option<&ColumnSpec>,
) -> Result<(), BedframeError> {
    let cols = ColumnSpec::resolve(cols);
    let view = ViewFrame::from_df(view_df.clone(), view_name_col, Some(&cols))?;

    check_overlapping(df, Some(&cols))?;
    check_covering(df, &view, Some(&cols))?;
    check_contained(df, &view, df_view_col, Some(&cols))?;
    Ok(())
}

pub fn is_tiling(
    df: &DataFrame,
    view_df: &DataFrame,
    df_view_col: Option<&str>,
    view_name_col: Option<&str>,
    cols: Option<&ColumnSpec>,
) -> PolarsResult<bool> {
    collapse(check_tiling(df, view_df, df_view_col, view_name_col, cols))
}

#[cfg(test)]
mod tests {
    use polars::df;
    use rstest::rstest;

    use super::*;

    fn bed(rows: &[(&str, i64, i64)]) -> DataFrame {
        let chroms: Vec<&str> = rows.iter().map(|r| r.0).collect();
        let starts: Vec<i64> = rows.iter().map(|r| r.1).collect();
        let ends: Vec<i64> = rows.iter().map(|r| r.2).collect();
        df!(
            "chrom" => chroms,
            "start" => starts,
            "end" => ends,
        )
        .unwrap()
    }

    fn view_chr1_100() -> DataFrame {
        df!(
            "chrom" => ["chr1"],
            "start" => [0i64],
            "end" => [100i64],
            "name" => ["r1"],
        )
        .unwrap()
    }

    #[test]
    fn bedframe_accepts_valid_table() -> anyhow::Result<()> {
        assert!(is_bedframe(&bed(&[("chr1", 0, 10)]), None)?);
        Ok(())
    }

    #[test]
    fn bedframe_rejects_missing_columns() -> anyhow::Result<()> {
        let df = df!("chrom" => ["chr1"], "start" => [0i64])?;
        assert!(!is_bedframe(&df, None)?);
        let err = check_bedframe(&df, None).unwrap_err();
        assert!(matches!(
            err,
            BedframeError::Structure(StructureError::MissingColumns { .. })
        ));
        Ok(())
    }

    #[test]
    fn bedframe_rejects_float_coordinates() -> anyhow::Result<()> {
        let df = df!(
            "chrom" => ["chr1"],
            "start" => [0.0f64],
            "end" => [10.0f64],
        )?;
        assert!(!is_bedframe(&df, None)?);
        assert!(matches!(
            check_bedframe(&df, None).unwrap_err(),
            BedframeError::Structure(StructureError::BadDtype { .. })
        ));
        Ok(())
    }

    #[test]
    fn bedframe_counts_inverted_intervals() -> anyhow::Result<()> {
        let df = bed(&[("chr1", 10, 5), ("chr1", 0, 20)]);
        assert!(!is_bedframe(&df, None)?);
        match check_bedframe(&df, None).unwrap_err() {
            BedframeError::Semantic(SemanticError::InvertedIntervals {
                count,
            }) => assert_eq!(count, 1),
            other => panic!("unexpected error: {other}"),
        }
        Ok(())
    }

    #[rstest]
    #[case(&[("chr1", 0, 10), ("chr1", 5, 15)], true)]
    #[case(&[("chr1", 0, 5), ("chr1", 5, 10)], false)]
    #[case(&[("chr1", 0, 5), ("chr2", 0, 5)], false)]
    fn overlap_detection(
        #[case] rows: &[(&str, i64, i64)],
        #[case] expected: bool,
    ) -> anyhow::Result<()> {
        assert_eq!(is_overlapping(&bed(rows), None)?, expected);
        Ok(())
    }

    #[test]
    fn viewframe_requires_name_column() -> anyhow::Result<()> {
        assert!(!is_viewframe(&bed(&[("chr1", 0, 10)]), None, None)?);
        assert!(is_viewframe(&view_chr1_100(), None, None)?);
        Ok(())
    }

    #[test]
    fn viewframe_rejects_nulls_anywhere() -> anyhow::Result<()> {
        let df = df!(
            "chrom" => ["chr1", "chr1"],
            "start" => [0i64, 50],
            "end" => [50i64, 100],
            "name" => [Some("a"), None],
        )?;
        assert!(!is_viewframe(&df, None, None)?);
        assert!(matches!(
            check_viewframe(&df, None, None).unwrap_err(),
            BedframeError::Semantic(SemanticError::NullValues { .. })
        ));
        Ok(())
    }

    #[test]
    fn sorted_detection() -> anyhow::Result<()> {
        assert!(is_sorted(
            &bed(&[("chr1", 0, 5), ("chr1", 3, 8)]),
            None,
            None,
            None
        )?);
        assert!(!is_sorted(
            &bed(&[("chr1", 3, 8), ("chr1", 0, 5)]),
            None,
            None,
            None
        )?);
        Ok(())
    }

    #[test]
    fn sorted_accepts_nulls_in_passthrough_columns() -> anyhow::Result<()> {
        let df = df!(
            "chrom" => ["chr1", "chr1"],
            "start" => [0i64, 10],
            "end" => [5i64, 20],
            "view_region" => [Some("r1"), None],
        )?;
        assert!(is_sorted(&df, None, None, None)?);
        Ok(())
    }

    #[test]
    fn cataloged_reports_missing_labels() -> anyhow::Result<()> {
        let view = ViewFrame::from_df(view_chr1_100(), None, None)?;
        let df = df!(
            "chrom" => ["chr1", "chr1"],
            "start" => [0i64, 10],
            "end" => [10i64, 20],
            "view_region" => ["r1", "ghost"],
        )?;
        assert!(!is_cataloged(&df, &view, None)?);
        match check_cataloged(&df, &view, None).unwrap_err() {
            BedframeError::Semantic(SemanticError::Uncataloged { missing }) => {
                assert_eq!(missing, vec!["ghost"])
            },
            other => panic!("unexpected error: {other}"),
        }
        Ok(())
    }

    #[test]
    fn cataloged_requires_label_column() -> anyhow::Result<()> {
        let view = ViewFrame::from_df(view_chr1_100(), None, None)?;
        assert!(!is_cataloged(&bed(&[("chr1", 0, 10)]), &view, None)?);
        Ok(())
    }

    #[test]
    fn contained_fails_when_trim_would_clip() -> anyhow::Result<()> {
        let view = ViewFrame::from_df(view_chr1_100(), None, None)?;
        let inside = df!(
            "chrom" => ["chr1"],
            "start" => [10i64],
            "end" => [90i64],
            "view_region" => ["r1"],
        )?;
        assert!(is_contained(&inside, &view, None, None)?);

        let outside = df!(
            "chrom" => ["chr1"],
            "start" => [50i64],
            "end" => [150i64],
            "view_region" => ["r1"],
        )?;
        assert!(!is_contained(&outside, &view, None, None)?);
        match check_contained(&outside, &view, None, None).unwrap_err() {
            BedframeError::Semantic(SemanticError::NotContained { count }) => {
                assert_eq!(count, 1)
            },
            other => panic!("unexpected error: {other}"),
        }
        Ok(())
    }

    #[test]
    fn covering_means_empty_complement() -> anyhow::Result<()> {
        let view = ViewFrame::from_df(view_chr1_100(), None, None)?;
        assert!(is_covering(&bed(&[("chr1", 0, 100)]), &view, None)?);
        assert!(!is_covering(&bed(&[("chr1", 0, 50)]), &view, None)?);
        Ok(())
    }

    #[test]
    fn tiling_holds_for_a_perfect_partition() -> anyhow::Result<()> {
        let df = df!(
            "chrom" => ["chr1", "chr1"],
            "start" => [0i64, 40],
            "end" => [40i64, 100],
            "view_region" => ["r1", "r1"],
        )?;
        assert!(is_tiling(&df, &view_chr1_100(), None, None, None)?);
        Ok(())
    }

    #[test]
    fn tiling_reports_the_first_violated_conjunct() -> anyhow::Result<()> {
        let view = view_chr1_100();

        let overlapping = df!(
            "chrom" => ["chr1", "chr1"],
            "start" => [0i64, 30],
            "end" => [60i64, 100],
            "view_region" => ["r1", "r1"],
        )?;
        assert!(matches!(
            check_tiling(&overlapping, &view, None, None, None).unwrap_err(),
            BedframeError::Semantic(SemanticError::Overlapping { .. })
        ));

        let gapped = df!(
            "chrom" => ["chr1"],
            "start" => [0i64],
            "end" => [50i64],
            "view_region" => ["r1"],
        )?;
        assert!(matches!(
            check_tiling(&gapped, &view, None, None, None).unwrap_err(),
            BedframeError::Semantic(SemanticError::NotCovering { .. })
        ));

        let spilling = df!(
            "chrom" => ["chr1", "chr1"],
            "start" => [0i64, 40],
            "end" => [40i64, 120],
            "view_region" => ["r1", "r1"],
        )?;
        assert!(matches!(
            check_tiling(&spilling, &view, None, None, None).unwrap_err(),
            BedframeError::Semantic(SemanticError::NotContained { .. })
        ));
        Ok(())
    }

    #[test]
    fn tiling_threads_custom_columns_through_nested_checks(
    ) -> anyhow::Result<()> {
        // Renamed coordinate columns must reach the covering and containment
        // sub-checks, not silently fall back to the defaults.
        let cols = ColumnSpec::new("seq", "lo", "hi");
        let view = df!(
            "seq" => ["chr1"],
            "lo" => [0i64],
            "hi" => [100i64],
            "name" => ["r1"],
        )?;
        let df = df!(
            "seq" => ["chr1"],
            "lo" => [0i64],
            "hi" => [100i64],
            "view_region" => ["r1"],
        )?;
        assert!(is_tiling(&df, &view, None, None, Some(&cols))?);

        let gapped = df!(
            "seq" => ["chr1"],
            "lo" => [0i64],
            "hi" => [60i64],
            "view_region" => ["r1"],
        )?;
        assert!(!is_tiling(&gapped, &view, None, None, Some(&cols))?);
        Ok(())
    }
}
