//! gridview - headless virtualization and layout engine for large tabular views
//!
//! Renders-nothing core for data tables that window their rows:
//! - Cumulative row heights in a Fenwick tree; offset↔index queries in O(log n)
//! - Visible-range windowing for virtualized and fixed-page modes
//! - Column width allocation (flex and force-fill) with frozen-column pools
//! - Stable multi-key in-page sorting that leaves other pages untouched
//! - Single-owner context-menu state machine with debounced opening
//!
//! # Usage
//!
//! ```
//! use gridview::{CellValue, DataGrid, GridOptions, RowAccess};
//!
//! struct Person { id: u64, name: &'static str }
//!
//! impl RowAccess for Person {
//!     fn cell(&self, column_id: &str) -> CellValue {
//!         match column_id {
//!             "name" => CellValue::Text(self.name.to_string()),
//!             _ => CellValue::Empty,
//!         }
//!     }
//! }
//!
//! let options = GridOptions { scrollbar_v: true, ..GridOptions::default() };
//! let mut grid = DataGrid::new(options, Box::new(|p: &Person| p.id));
//! grid.set_rows(vec![Person { id: 1, name: "Ada" }]);
//! grid.set_size(800.0, 600.0);
//! grid.recalculate_layout();
//! let window = grid.window();
//! assert_eq!(window.len(), 1);
//! ```

// Core data types
pub mod error;
pub mod types;

// Engine modules
pub mod grid;
pub mod layout;
pub mod menu;
pub mod sort;

// Re-export the main controller struct
pub use grid::{
    DataGrid, DetailToggle, GridOptions, RowIdentity, ScrollOutcome, VisibleRow, SCROLLBAR_WIDTH,
};

pub use error::{GridError, Result};
pub use layout::{ColumnGroupWidths, RowHeightCache, ScrollDirection, Viewport};
pub use menu::{
    ContextMenuCoordinator, Execution, MenuEntry, MenuEvent, MenuOwnerId, MenuState, Predicate,
    OPEN_SUPPRESS_WINDOW_MS,
};
pub use sort::{PageSortEngine, SortComparator};
pub use types::*;

/// Get the library version
#[must_use]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
