//! Deterministic, idempotent ordering of interval tables.

use hashbrown::HashMap;
use log::warn;
use polars::prelude::*;

use super::{
    chrom_values,
    opt_label_values,
};
use crate::checks::check_bedframe;
use crate::data_structs::colspec::DEFAULT_VIEW_COL;
use crate::data_structs::{
    ColumnSpec,
    ViewFrame,
};
use crate::error::BedframeError;
use crate::plsmallstr;

const CHROM_KEY: &str = "_bedframe_chrom_key";
const REGION_KEY: &str = "_bedframe_region_key";

/// Sorts a table by chromosome, then start, then end, stably.
///
/// Chromosomes order by first appearance, or by the view's chromosome order
/// when a view is supplied (chromosomes the view does not name sort after
/// those it does). When a view is supplied and the table carries the
/// region-label column, rows additionally group by assigned region first, in
/// view row order, with unassigned rows last. Ties keep the original row
/// order, so sorting a sorted table returns the identical row sequence.
pub fn sort_bedframe(
    df: &DataFrame,
    view: Option<&ViewFrame>,
    df_view_col: Option<&str>,
    cols: Option<&ColumnSpec>,
) -> Result<DataFrame, BedframeError> {
    let cols = ColumnSpec::resolve(cols);
    check_bedframe(df, Some(&cols))?;
    if df.height() == 0 {
        return Ok(df.clone());
    }

    let chroms = chrom_values(df, &cols.chrom)?;

    let mut chrom_rank: HashMap<String, u32> = HashMap::new();
    if let Some(view) = view {
        for chrom in view.chrom_order()? {
            let next = chrom_rank.len() as u32;
            chrom_rank.entry(chrom).or_insert(next);
        }
    }
    let mut unranked_seen = false;
    for chrom in &chroms {
        if !chrom_rank.contains_key(chrom.as_str()) {
            if view.is_some() && !unranked_seen {
                warn!("table contains chromosomes the view does not name; they sort last");
                unranked_seen = true;
            }
            let next = chrom_rank.len() as u32;
            chrom_rank.insert(chrom.clone(), next);
        }
    }
    let chrom_keys: Vec<u32> =
        chroms.iter().map(|chrom| chrom_rank[chrom]).collect();

    // Region grouping only applies with a view and a present label column.
    let view_col = df_view_col.unwrap_or(DEFAULT_VIEW_COL);
    let region_keys: Option<Vec<u32>> = match view {
        Some(view) if df.get_column_index(view_col).is_some() => {
            let mut region_rank: HashMap<String, u32> = HashMap::new();
            for region in view.regions()? {
                let next = region_rank.len() as u32;
                region_rank.entry(region.name).or_insert(next);
            }
            let keys = opt_label_values(df, view_col)?
                .into_iter()
                .map(|label| {
                    label
                        .and_then(|name| region_rank.get(&name).copied())
                        .unwrap_or(u32::MAX)
                })
                .collect();
            Some(keys)
        },
        _ => None,
    };

    let mut keyed = df.clone();
    let mut by: Vec<PlSmallStr> = Vec::new();
    if let Some(keys) = region_keys {
        keyed.with_column(Series::new(plsmallstr!(REGION_KEY), keys))?;
        by.push(plsmallstr!(REGION_KEY));
    }
    keyed.with_column(Series::new(plsmallstr!(CHROM_KEY), chrom_keys))?;
    by.push(plsmallstr!(CHROM_KEY));
    by.push(plsmallstr!(cols.start.as_str()));
    by.push(plsmallstr!(cols.end.as_str()));

    let mut sorted = keyed.sort(
        by,
        SortMultipleOptions::default().with_maintain_order(true),
    )?;
    sorted = sorted.drop(CHROM_KEY)?;
    if sorted.get_column_index(REGION_KEY).is_some() {
        sorted = sorted.drop(REGION_KEY)?;
    }
    Ok(sorted)
}
