//! Core data structures: column-name configuration and the view type.
//!
//! - [`colspec`]: the [`ColumnSpec`] triple naming the chromosome, start and
//!   end columns of an interval table, plus the process-wide default names.
//! - [`view`]: [`ViewFrame`], a named, non-overlapping reference partition of
//!   the genome. It is the only constructor of view values; everything that
//!   requires a view either takes one or builds one through it.

pub mod colspec;
pub mod view;

pub use colspec::{
    default_cols,
    set_default_cols,
    ColumnSpec,
};
pub use view::{
    ViewFrame,
    ViewRegion,
};
