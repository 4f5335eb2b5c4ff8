//! Clipping intervals to the bounds of their assigned view regions.

use itertools::izip;
use polars::prelude::*;

use super::{
    int_values,
    opt_label_values,
};
use crate::checks::{
    check_bedframe,
    verify_columns,
};
use crate::data_structs::colspec::DEFAULT_VIEW_COL;
use crate::data_structs::{
    ColumnSpec,
    ViewFrame,
};
use crate::error::BedframeError;
use crate::plsmallstr;

/// Clips each row's start/end to the bounds of its named view region.
///
/// A pure projection: row order and every other column are preserved, and
/// intervals only shrink or stay unchanged. Rows whose region label is null
/// or absent from the view pass through untouched; whether that is acceptable
/// is the caller's cataloging check, not trim's.
pub fn trim(
    df: &DataFrame,
    view: &ViewFrame,
    df_view_col: Option<&str>,
    cols: Option<&ColumnSpec>,
) -> Result<DataFrame, BedframeError> {
    let cols = ColumnSpec::resolve(cols);
    let view_col = df_view_col.unwrap_or(DEFAULT_VIEW_COL);
    check_bedframe(df, Some(&cols))?;
    verify_columns(df, &[view_col])?;

    let bounds = view.bounds_by_name()?;
    let labels = opt_label_values(df, view_col)?;
    let starts = int_values(df, &cols.start)?;
    let ends = int_values(df, &cols.end)?;

    let mut new_starts: Vec<i64> = Vec::with_capacity(starts.len());
    let mut new_ends: Vec<i64> = Vec::with_capacity(ends.len());
    for (label, start, end) in izip!(&labels, starts, ends) {
        match label.as_deref().and_then(|name| bounds.get(name)) {
            Some(&(region_start, region_end)) => {
                new_starts.push(start.clamp(region_start, region_end));
                new_ends.push(end.clamp(region_start, region_end));
            },
            None => {
                new_starts.push(start);
                new_ends.push(end);
            },
        }
    }

    let start_dtype = df.column(&cols.start)?.dtype().clone();
    let end_dtype = df.column(&cols.end)?.dtype().clone();

    let mut out = df.clone();
    out.replace(
        &cols.start,
        Series::new(plsmallstr!(cols.start.as_str()), new_starts)
            .cast(&start_dtype)?,
    )?;
    out.replace(
        &cols.end,
        Series::new(plsmallstr!(cols.end.as_str()), new_ends)
            .cast(&end_dtype)?,
    )?;
    Ok(out)
}
