//! Interval-union merge via a per-chromosome sweep.

use hashbrown::HashMap;
use itertools::izip;
use polars::prelude::*;
use rayon::prelude::*;

use super::{
    chrom_values,
    int_values,
};
use crate::checks::check_bedframe;
use crate::data_structs::ColumnSpec;
use crate::error::BedframeError;
use crate::plsmallstr;
use crate::utils::THREAD_POOL;

/// Merges overlapping and touching intervals per chromosome.
///
/// Output rows are the minimal set of maximal, pairwise-disjoint intervals
/// covering exactly the same point-set as the input: within a chromosome a
/// sorted left-to-right sweep extends the open run while `start <= run_end`
/// (so abutting intervals fuse and zero-length intervals are no-ops) and
/// closes it otherwise. Chromosome groups appear in first-appearance order,
/// intervals ascending within each group. Only the (chrom, start, end) triple
/// survives into the output; input dtypes are preserved.
pub fn merge(
    df: &DataFrame,
    cols: Option<&ColumnSpec>,
) -> Result<DataFrame, BedframeError> {
    let cols = ColumnSpec::resolve(cols);
    check_bedframe(df, Some(&cols))?;

    let chroms = chrom_values(df, &cols.chrom)?;
    let starts = int_values(df, &cols.start)?;
    let ends = int_values(df, &cols.end)?;

    // Group by chromosome, keeping first-appearance order.
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<(i64, i64)>> = HashMap::new();
    for (chrom, start, end) in izip!(chroms, starts, ends) {
        groups
            .entry_ref(chrom.as_str())
            .or_insert_with(|| {
                order.push(chrom.clone());
                Vec::new()
            })
            .push((start, end));
    }
    let grouped: Vec<(String, Vec<(i64, i64)>)> = order
        .into_iter()
        .map(|chrom| {
            let intervals = groups.remove(&chrom).unwrap_or_default();
            (chrom, intervals)
        })
        .collect();

    // The within-group sweep is sequential; groups are independent.
    let merged: Vec<(String, Vec<(i64, i64)>)> = THREAD_POOL.install(|| {
        grouped
            .into_par_iter()
            .map(|(chrom, mut intervals)| {
                intervals.sort_unstable();
                let merged = merge_sorted(&intervals);
                (chrom, merged)
            })
            .collect()
    });

    let mut out_chroms: Vec<String> = Vec::new();
    let mut out_starts: Vec<i64> = Vec::new();
    let mut out_ends: Vec<i64> = Vec::new();
    for (chrom, intervals) in merged {
        for (start, end) in intervals {
            out_chroms.push(chrom.clone());
            out_starts.push(start);
            out_ends.push(end);
        }
    }

    let chrom_dtype = df.column(&cols.chrom)?.dtype().clone();
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
    ])?;
    Ok(out)
}

/// Sweeps a sorted interval list, fusing runs whose next start lies at or
/// before the current end.
fn merge_sorted(intervals: &[(i64, i64)]) -> Vec<(i64, i64)> {
    let mut out = Vec::new();
    let mut iter = intervals.iter().copied();
    let Some((mut run_start, mut run_end)) = iter.next()
    else {
        return out;
    };
    for (start, end) in iter {
        if start <= run_end {
            run_end = run_end.max(end);
        }
        else {
            out.push((run_start, run_end));
            run_start = start;
            run_end = end;
        }
    }
    out.push((run_start, run_end));
    out
}
