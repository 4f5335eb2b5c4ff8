//! The view type: a named, non-overlapping reference partition of the genome.

use hashbrown::HashMap;
use indexmap::IndexMap;
use itertools::{
    izip,
    Itertools,
};
use polars::prelude::*;

use super::colspec::{
    ColumnSpec,
    DEFAULT_NAME_COL,
};
use crate::checks::{
    check_bedframe,
    check_viewframe,
};
use crate::error::BedframeError;
use crate::ops::{
    chrom_values,
    int_values,
};
use crate::plsmallstr;

/// One named region of a view, in plain owned form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRegion {
    pub chrom: String,
    pub start: i64,
    pub end:   i64,
    pub name:  String,
}

/// A validated view: a bedframe whose rows carry globally unique names, hold
/// no nulls, and never overlap each other.
///
/// `from_df` and `from_chromsizes` are the only safe constructors; both run
/// the full view validity check and fail typed. The wrapped table is
/// immutable once constructed.
#[derive(Debug, Clone)]
pub struct ViewFrame {
    data:     DataFrame,
    cols:     ColumnSpec,
    name_col: String,
}

impl ViewFrame {
    /// Wraps a table without validating it.
    ///
    /// # Safety
    ///
    /// The caller must guarantee the table already satisfies every view
    /// invariant for the given columns.
    pub unsafe fn new_unchecked(
        data: DataFrame,
        cols: ColumnSpec,
        name_col: String,
    ) -> Self {
        Self {
            data,
            cols,
            name_col,
        }
    }

    /// Normalizes an arbitrary region table into a view.
    ///
    /// Rows lacking a name column get deterministic default names of the form
    /// `"{chrom}:{start}-{end}"`. Validation then rejects inverted intervals,
    /// duplicate names, nulls and overlap among regions.
    pub fn from_df(
        df: DataFrame,
        view_name_col: Option<&str>,
        cols: Option<&ColumnSpec>,
    ) -> Result<Self, BedframeError> {
        let cols = ColumnSpec::resolve(cols);
        let name_col = view_name_col.unwrap_or(DEFAULT_NAME_COL).to_owned();
        check_bedframe(&df, Some(&cols))?;

        let mut df = df;
        if df.get_column_index(&name_col).is_none() {
            let names: Vec<String> = izip!(
                chrom_values(&df, &cols.chrom)?,
                int_values(&df, &cols.start)?,
                int_values(&df, &cols.end)?
            )
            .map(|(chrom, start, end)| format!("{chrom}:{start}-{end}"))
            .collect();
            df.with_column(Series::new(
                plsmallstr!(name_col.as_str()),
                names,
            ))?;
        }

        check_viewframe(&df, Some(&name_col), Some(&cols))?;
        Ok(Self {
            data: df,
            cols,
            name_col,
        })
    }

    /// Builds a view with one full-chromosome region `[0, size)` per entry,
    /// each named after its chromosome. Entry order becomes view order.
    pub fn from_chromsizes(
        sizes: &IndexMap<String, i64>,
    ) -> Result<Self, BedframeError> {
        let cols = ColumnSpec::default();
        let chroms = sizes.keys().cloned().collect_vec();
        let ends = sizes.values().copied().collect_vec();
        let starts = vec![0i64; chroms.len()];
        let names = chroms.clone();

        let df = DataFrame::new(vec![
            Series::new(plsmallstr!(cols.chrom.as_str()), chroms).into_column(),
            Series::new(plsmallstr!(cols.start.as_str()), starts).into_column(),
            Series::new(plsmallstr!(cols.end.as_str()), ends).into_column(),
            Series::new(plsmallstr!(DEFAULT_NAME_COL), names).into_column(),
        ])?;
        Self::from_df(df, None, Some(&cols))
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn cols(&self) -> &ColumnSpec {
        &self.cols
    }

    pub fn name_col(&self) -> &str {
        &self.name_col
    }

    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    /// Regions in view row order.
    pub fn regions(&self) -> Result<Vec<ViewRegion>, BedframeError> {
        let chroms = chrom_values(&self.data, &self.cols.chrom)?;
        let starts = int_values(&self.data, &self.cols.start)?;
        let ends = int_values(&self.data, &self.cols.end)?;
        let names = chrom_values(&self.data, &self.name_col)?;
        Ok(izip!(chroms, starts, ends, names)
            .map(|(chrom, start, end, name)| {
                ViewRegion {
                    chrom,
                    start,
                    end,
                    name,
                }
            })
            .collect())
    }

    /// Region bounds keyed by region name.
    pub fn bounds_by_name(
        &self,
    ) -> Result<HashMap<String, (i64, i64)>, BedframeError> {
        Ok(self
            .regions()?
            .into_iter()
            .map(|region| (region.name, (region.start, region.end)))
            .collect())
    }

    /// Chromosomes in first-appearance order over the view rows.
    pub fn chrom_order(&self) -> Result<Vec<String>, BedframeError> {
        Ok(chrom_values(&self.data, &self.cols.chrom)?
            .into_iter()
            .unique()
            .collect())
    }
}
