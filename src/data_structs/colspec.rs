//! Column-name configuration for interval tables.
//!
//! Every operation in this crate inspects a (chrom, start, end) column triple.
//! Callers either pass an explicit [`ColumnSpec`] or rely on the process-wide
//! default, which starts at `("chrom", "start", "end")` and may be replaced
//! once via [`set_default_cols`].

use std::sync::RwLock;

use once_cell::sync::Lazy;
use serde::{
    Deserialize,
    Serialize,
};

pub const DEFAULT_CHROM_COL: &str = "chrom";
pub const DEFAULT_START_COL: &str = "start";
pub const DEFAULT_END_COL: &str = "end";

/// Default name of the column tying table rows to view regions.
pub const DEFAULT_VIEW_COL: &str = "view_region";
/// Default name of the column holding unique region names in a view.
pub const DEFAULT_NAME_COL: &str = "name";

/// Names of the chromosome, start and end columns of an interval table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub chrom: String,
    pub start: String,
    pub end:   String,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self::new(DEFAULT_CHROM_COL, DEFAULT_START_COL, DEFAULT_END_COL)
    }
}

impl ColumnSpec {
    pub fn new(
        chrom: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            chrom: chrom.into(),
            start: start.into(),
            end:   end.into(),
        }
    }

    /// The triple in declaration order, for passing to column checks.
    pub fn triple(&self) -> [&str; 3] {
        [&self.chrom, &self.start, &self.end]
    }

    /// Resolves an optional per-call override against the process default.
    pub fn resolve(cols: Option<&ColumnSpec>) -> ColumnSpec {
        cols.cloned().unwrap_or_else(default_cols)
    }
}

impl From<(&str, &str, &str)> for ColumnSpec {
    fn from(value: (&str, &str, &str)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

static DEFAULT_COLS: Lazy<RwLock<ColumnSpec>> =
    Lazy::new(|| RwLock::new(ColumnSpec::default()));

/// Returns a copy of the process-wide default column names.
pub fn default_cols() -> ColumnSpec {
    DEFAULT_COLS
        .read()
        .expect("default column lock poisoned")
        .clone()
}

/// Replaces the process-wide default column names.
///
/// This is a deliberate process-wide setting with single-writer discipline:
/// call it once during startup, before any tables are checked, and never
/// concurrently with readers that resolve against the default.
pub fn set_default_cols(cols: ColumnSpec) {
    *DEFAULT_COLS
        .write()
        .expect("default column lock poisoned") = cols;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_names_by_default() {
        let cols = ColumnSpec::default();
        assert_eq!(cols.triple(), ["chrom", "start", "end"]);
    }

    #[test]
    fn resolve_prefers_explicit_override() {
        let custom = ColumnSpec::new("CHR", "lo", "hi");
        assert_eq!(ColumnSpec::resolve(Some(&custom)), custom);
    }

    #[test]
    fn tuple_conversion() {
        let cols: ColumnSpec = ("c", "s", "e").into();
        assert_eq!(cols, ColumnSpec::new("c", "s", "e"));
    }
}
