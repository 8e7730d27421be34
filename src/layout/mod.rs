//! Layout computation: row-height prefix sums, viewport windowing, and
//! column width allocation.
//!
//! This module answers the two queries the rendering layer needs on every
//! scroll tick — index → offset and offset → index — and distributes
//! horizontal space across the column set.

mod height_cache;
mod viewport;
mod width;

pub use height_cache::RowHeightCache;
pub use viewport::{ScrollDirection, Viewport};
pub use width::{
    adjust_column_widths, column_group_widths, columns_by_pin, columns_total_width,
    force_fill_column_widths, ColumnGroupWidths, ColumnsByPin,
};
