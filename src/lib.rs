//! # bedframe
//!
//! `bedframe` represents collections of genomic intervals as Polars
//! DataFrames and layers two things on top: a small set algebra over such
//! tables — [`ops::merge`], [`ops::complement`], [`ops::trim`],
//! [`ops::sort_bedframe`] — and a family of validity predicates built from
//! that algebra, used to certify that a table satisfies structural contracts
//! (well-formed, sorted, non-overlapping, cataloged against a reference view,
//! contained within it, covering it, or exactly tiling it).
//!
//! Intervals are half-open `[start, end)` on a named chromosome; `start ==
//! end` is a permitted zero-length interval. Any `DataFrame` exposing a
//! (chrom, start, end) column triple is an interval table — the column names
//! default to `("chrom", "start", "end")` and can be overridden per call with
//! a [`ColumnSpec`](data_structs::ColumnSpec). Duplicates and overlaps are
//! allowed at the raw-table level; whether they are *acceptable* is exactly
//! what the predicate layer answers.
//!
//! ## Structure
//!
//! * [`data_structs`]: the [`ColumnSpec`](data_structs::ColumnSpec)
//!   configuration and [`ViewFrame`](data_structs::ViewFrame), the validated
//!   named reference partition of the genome.
//! * [`ops`]: the per-chromosome sweep-line algebra. Pure functions; inputs
//!   are never mutated.
//! * [`checks`]: the predicate layer. Every predicate has a raising `check_*`
//!   form returning typed errors and a boolean `is_*` form.
//! * [`error`]: the two-kind error taxonomy (structure vs. semantics), with
//!   engine faults kept distinct so they never collapse to `false`.
//!
//! ## Usage
//!
//! ```
//! use bedframe::prelude::*;
//! use polars::df;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let intervals = df!(
//!         "chrom" => ["chr1", "chr1"],
//!         "start" => [0i64, 5],
//!         "end" => [10i64, 15],
//!     )?;
//!
//!     assert!(is_bedframe(&intervals, None)?);
//!     assert!(is_overlapping(&intervals, None)?);
//!
//!     let merged = merge(&intervals, None)?;
//!     assert_eq!(merged.height(), 1);
//!     Ok(())
//! }
//! ```
//!
//! The number of threads used for the per-chromosome sweeps can be set with
//! the `BEDFRAME_NUM_THREADS` environment variable.

pub mod checks;
pub mod data_structs;
pub mod error;
pub mod ops;
pub mod prelude;
pub mod utils;
