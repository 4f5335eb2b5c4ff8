pub use crate::checks::{
    check_bedframe,
    check_cataloged,
    check_contained,
    check_covering,
    check_overlapping,
    check_sorted,
    check_tiling,
    check_viewframe,
    is_bedframe,
    is_cataloged,
    is_contained,
    is_covering,
    is_overlapping,
    is_sorted,
    is_tiling,
    is_viewframe,
    verify_columns,
    verify_dtypes,
};
pub use crate::data_structs::{
    default_cols,
    set_default_cols,
    ColumnSpec,
    ViewFrame,
    ViewRegion,
};
pub use crate::error::{
    BedframeError,
    SemanticError,
    StructureError,
};
pub use crate::ops::{
    complement,
    merge,
    sort_bedframe,
    trim,
};
