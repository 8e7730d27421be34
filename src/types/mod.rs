//! Core data types shared across the engine.
//!
//! Everything here is plain data: cell values, column definitions, sort
//! directives, menu descriptors, and the small payload structs handed back to
//! the rendering layer. Behavior lives in the sibling `layout`, `sort`, `menu`
//! and `grid` modules.

mod cell;
mod column;
mod menu;
mod sort;

pub use cell::{CellValue, RowAccess};
pub use column::{
    columns_from_json, set_column_defaults, Column, ColumnMode, ColumnPin, DEFAULT_COLUMN_WIDTH,
};
pub use menu::MenuDescriptor;
pub use sort::{NullOrdering, SortDirection, SortDirective};

/// Half-open range of visible row indexes, `first <= last`.
///
/// Recomputed from the current scroll offset on every windowing pass; never
/// carried across a data-set replacement without an explicit refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexRange {
    /// Index of the first visible row.
    pub first: usize,
    /// Index one past the last visible row.
    pub last: usize,
}

impl IndexRange {
    /// Number of rows in the range.
    pub fn len(&self) -> usize {
        self.last.saturating_sub(self.first)
    }

    /// True when the range covers no rows.
    pub fn is_empty(&self) -> bool {
        self.last <= self.first
    }
}

/// Positioning payload for one visible row.
///
/// `offset_y` is the cumulative height of all rows above it, so the renderer
/// can translate the row into place without measuring anything itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowStyle {
    /// Row height in pixels, detail contribution included when expanded.
    pub height: f32,
    /// Vertical offset of the row's top edge in content coordinates.
    pub offset_y: f32,
}
