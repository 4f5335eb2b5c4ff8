//! Gaps of a view left uncovered by a table.

use hashbrown::HashMap;
use itertools::izip;
use polars::prelude::*;

use super::{
    chrom_values,
    int_values,
    merge,
};
use crate::data_structs::colspec::DEFAULT_VIEW_COL;
use crate::data_structs::{
    ColumnSpec,
    ViewFrame,
};
use crate::error::BedframeError;
use crate::plsmallstr;

/// Emits, per view region, the maximal ranges not covered by the table.
///
/// The table is merged first, then each region walks its chromosome's merged
/// intervals clipped to the region bounds: gaps between consecutive intervals
/// and against the region's own ends become output rows. A fully covered
/// region contributes no rows; a region the table never touches contributes
/// exactly one row spanning the whole region.
///
/// Output columns are the (chrom, start, end) triple plus a `view_region`
/// label naming the region each gap belongs to. Rows follow view order;
/// coordinate dtypes follow the input table, the chrom dtype the view.
pub fn complement(
    df: &DataFrame,
    view: &ViewFrame,
    cols: Option<&ColumnSpec>,
) -> Result<DataFrame, BedframeError> {
    let cols = ColumnSpec::resolve(cols);
    let merged = merge(df, Some(&cols))?;

    let mut by_chrom: HashMap<String, Vec<(i64, i64)>> = HashMap::new();
    for (chrom, start, end) in izip!(
        chrom_values(&merged, &cols.chrom)?,
        int_values(&merged, &cols.start)?,
        int_values(&merged, &cols.end)?
    ) {
        by_chrom.entry(chrom).or_default().push((start, end));
    }

    let mut out_chroms: Vec<String> = Vec::new();
    let mut out_starts: Vec<i64> = Vec::new();
    let mut out_ends: Vec<i64> = Vec::new();
    let mut out_labels: Vec<String> = Vec::new();

    for region in view.regions()? {
        let mut cursor = region.start;
        if let Some(intervals) = by_chrom.get(&region.chrom) {
            // Merged intervals are already sorted and disjoint. Zero-length
            // intervals cover no positions and never split a gap.
            for &(start, end) in intervals {
                if start == end || end <= region.start || start >= region.end {
                    continue;
                }
                let clipped_start = start.max(region.start);
                if clipped_start > cursor {
                    out_chroms.push(region.chrom.clone());
                    out_starts.push(cursor);
                    out_ends.push(clipped_start);
                    out_labels.push(region.name.clone());
                }
                cursor = cursor.max(end.min(region.end));
                if cursor >= region.end {
                    break;
                }
            }
        }
        if cursor < region.end {
            out_chroms.push(region.chrom.clone());
            out_starts.push(cursor);
            out_ends.push(region.end);
            out_labels.push(region.name.clone());
        }
    }

    let chrom_dtype = view.data().column(&view.cols().chrom)?.dtype().clone();
    let start_dtype = df.column(&cols.start)?.dtype().clone();
    let end_dtype = df.column(&cols.end)?.dtype().clone();
    let out = DataFrame::new(vec![
        Series::new(plsmallstr!(cols.chrom.as_str()), out_chroms)
            .cast(&chrom_dtype)?
            .into_column(),
        Series::new(plsmallstr!(cols.start.as_str()), out_starts)
            .cast(&start_dtype)?
            .into_column(),
        Series::new(plsmallstr!(cols.end.as_str()), out_ends)
            .cast(&end_dtype)?
            .into_column(),
        Series::new(plsmallstr!(DEFAULT_VIEW_COL), out_labels).into_column(),
    ])?;
    Ok(out)
}
