//! Grid controller - the primary entry point for driving the engine.
//!
//! Owns the row and column arrays, the expansion side-table, the row-height
//! cache, and the scroll state, and wires the layout, sort, and width
//! components together the way a rendering layer expects:
//! - batch field mutations, then one explicit `recalculate_layout()`
//! - scroll events in, visible window + page derivation out
//! - expansion toggles patch the cache incrementally; bulk toggles rebuild it
//! - column resize/reorder/sort entry points return the recomputed state
//!
//! Caller rows stay untouched: expansion is tracked in a side-table keyed by
//! an injected row identity function, and sorting only ever permutes the
//! caller's own values.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::layout::{
    adjust_column_widths, column_group_widths, force_fill_column_widths, ColumnGroupWidths,
    RowHeightCache, ScrollDirection, Viewport,
};
use crate::sort::{PageSortEngine, SortComparator};
use crate::types::{
    set_column_defaults, Column, ColumnMode, IndexRange, NullOrdering, RowAccess, RowStyle,
    SortDirective,
};

/// Width reserved for the vertical scrollbar when virtualization is on.
///
/// A headless engine cannot measure the host's scrollbar, so this is the
/// common default; subtract a different value upstream if the host differs.
pub const SCROLLBAR_WIDTH: f32 = 17.0;

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    /// Enable vertical virtualization (row windowing by pixel offset).
    pub scrollbar_v: bool,
    /// Enable horizontal scrolling of the column set.
    pub scrollbar_h: bool,
    /// Base row height in pixels; required for windowing math.
    pub row_height: f32,
    /// Extra height contributed by an expanded row's detail view.
    pub detail_row_height: f32,
    /// Column width distribution policy.
    pub column_mode: ColumnMode,
    /// Header height in pixels (0 = no header).
    pub header_height: f32,
    /// Footer height in pixels (0 = no footer).
    pub footer_height: f32,
    /// True when a server owns paging; `count` then supplies the total.
    pub external_paging: bool,
    /// True when a server owns sorting; directives are recorded but rows are
    /// left alone.
    pub external_sorting: bool,
    /// Page size for in-page sorting and fixed-page windowing.
    pub limit: Option<usize>,
    /// Total row count reported by the server under external paging.
    pub count: usize,
    /// Where empty cell values sort.
    pub null_ordering: NullOrdering,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            scrollbar_v: false,
            scrollbar_h: false,
            row_height: 30.0,
            detail_row_height: 0.0,
            column_mode: ColumnMode::Standard,
            header_height: 30.0,
            footer_height: 0.0,
            external_paging: false,
            external_sorting: false,
            limit: None,
            count: 0,
            null_ordering: NullOrdering::First,
        }
    }
}

/// Stable row identity, injected by the caller.
pub type RowIdentity<R> = Box<dyn Fn(&R) -> u64>;

/// One row of the windowed slice handed to the renderer.
#[derive(Debug)]
pub struct VisibleRow<'a, R> {
    /// Absolute row index, assigned on this windowing pass.
    pub index: usize,
    /// The backing row.
    pub row: &'a R,
    /// Positioning payload.
    pub style: RowStyle,
}

/// Result of a scroll event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollOutcome {
    /// The new visible range.
    pub range: IndexRange,
    /// Page implied by the new first visible row, when it changed the pager.
    pub page_offset: Option<usize>,
}

/// Result of an expansion toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailToggle {
    /// First visible row index adjusted for partial visibility, captured
    /// before the toggle so scroll-follow can keep it in view.
    pub current_index: usize,
    /// Expansion state after the toggle.
    pub expanded: bool,
}

/// The grid engine state holder.
pub struct DataGrid<R> {
    options: GridOptions,
    rows: Vec<R>,
    columns: Vec<Column>,
    sorts: Vec<SortDirective>,
    sorter: PageSortEngine<R>,
    identity: RowIdentity<R>,
    expanded: HashSet<u64>,
    cache: RowHeightCache,
    viewport: Viewport,
    group_widths: ColumnGroupWidths,
    inner_width: f32,
    indexes: IndexRange,
}

impl<R> DataGrid<R> {
    /// Create a grid with the given options and row identity function.
    pub fn new(options: GridOptions, identity: RowIdentity<R>) -> Self {
        let sorter = PageSortEngine::new().with_null_ordering(options.null_ordering);
        let viewport = Viewport {
            virtualized: options.scrollbar_v,
            ..Viewport::new()
        };
        Self {
            options,
            rows: Vec::new(),
            columns: Vec::new(),
            sorts: Vec::new(),
            sorter,
            identity,
            expanded: HashSet::new(),
            cache: RowHeightCache::new(),
            viewport,
            group_widths: ColumnGroupWidths::default(),
            inner_width: 0.0,
            indexes: IndexRange::default(),
        }
    }

    /// Engine configuration.
    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    /// The backing rows in their current order.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// The current column array.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Active sort directives.
    pub fn sorts(&self) -> &[SortDirective] {
        &self.sorts
    }

    /// Current scroll/windowing state.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Per-pin-group width totals for the current column array.
    pub fn group_widths(&self) -> ColumnGroupWidths {
        self.group_widths
    }

    /// The visible index range from the latest windowing pass.
    pub fn visible_range(&self) -> IndexRange {
        self.indexes
    }

    /// Total scrollable height under virtualization, `None` otherwise.
    pub fn scroll_height(&self) -> Option<f32> {
        self.options.scrollbar_v.then(|| self.cache.total())
    }

    /// Register a custom comparator for a column.
    pub fn register_sort_comparator(
        &mut self,
        column_id: impl Into<String>,
        cmp: SortComparator<R>,
    ) {
        self.sorter.register_comparator(column_id, cmp);
    }

    /// Replace the column array.
    ///
    /// Applies config defaults, re-runs the allocator for the configured
    /// mode, and recomputes the group-width view.
    pub fn set_columns(&mut self, mut columns: Vec<Column>) {
        set_column_defaults(&mut columns);
        self.columns = columns;
        self.allocate(None);
    }

    /// Update the server-reported total under external paging.
    pub fn set_count(&mut self, count: usize) {
        self.options.count = count;
        self.viewport.row_count = self.calc_row_count();
    }

    /// Set the outer component dimensions.
    ///
    /// Derives the inner width (minus the scrollbar under virtualization),
    /// the body height (minus header and footer), the page size, and the row
    /// count, then re-runs the column allocator against the new width.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.inner_width = width.floor();

        if self.options.scrollbar_v {
            let mut body = height;
            if self.options.header_height > 0.0 {
                body -= self.options.header_height;
            }
            if self.options.footer_height > 0.0 {
                body -= self.options.footer_height;
            }
            self.viewport.body_height = body.max(0.0);
        }

        self.viewport.page_size = self.calc_page_size();
        self.viewport.row_count = self.calc_row_count();
        self.allocate(None);
    }

    /// Rebuild the height cache and the visible window.
    ///
    /// Call once after any batch of mutations (rows, size, expansion bulk
    /// changes); nothing recomputes behind the caller's back.
    pub fn recalculate_layout(&mut self) {
        self.viewport.page_size = self.calc_page_size();
        self.viewport.row_count = self.calc_row_count();
        self.refresh_height_cache();
        self.indexes = self.viewport.visible_range(&self.cache);
        tracing::debug!(
            first = self.indexes.first,
            last = self.indexes.last,
            rows = self.rows.len(),
            "layout recalculated"
        );
    }

    /// Handle a body scroll event.
    ///
    /// Updates the visible range and derives the page implied by the new
    /// first row, biased by scroll direction.
    pub fn on_body_scroll(&mut self, offset_y: f32, offset_x: f32) -> ScrollOutcome {
        let direction = if offset_y < self.viewport.offset_y {
            Some(ScrollDirection::Up)
        } else if offset_y > self.viewport.offset_y {
            Some(ScrollDirection::Down)
        } else {
            None
        };

        self.viewport.offset_y = offset_y;
        self.viewport.offset_x = offset_x;
        self.indexes = self.viewport.visible_range(&self.cache);

        let page_offset = direction
            .and_then(|d| self.viewport.page_for_first_index(self.indexes.first, d))
            .filter(|&p| p != self.viewport.page_offset);
        if let Some(page) = page_offset {
            self.viewport.page_offset = page;
        }

        ScrollOutcome {
            range: self.indexes,
            page_offset,
        }
    }

    /// Jump to a page (pager click).
    ///
    /// Returns the scroll offset the host should apply; under virtualization
    /// this is the cumulative offset of the page's first row.
    pub fn set_page_offset(&mut self, page_offset: usize) -> f32 {
        self.viewport.page_offset = page_offset;
        let offset_y = self
            .viewport
            .scroll_offset_for_page(&self.cache, page_offset);
        if self.options.scrollbar_v {
            self.viewport.offset_y = offset_y;
        }
        self.indexes = self.viewport.visible_range(&self.cache);
        offset_y
    }

    /// The windowed slice for the current visible range.
    ///
    /// Slots present in the range but absent from the backing array (e.g.
    /// mid-fetch under external paging) are omitted rather than failing.
    pub fn window(&self) -> Vec<VisibleRow<'_, R>> {
        (self.indexes.first..self.indexes.last)
            .filter_map(|index| {
                self.rows.get(index).map(|row| VisibleRow {
                    index,
                    row,
                    style: self.row_style(index),
                })
            })
            .collect()
    }

    /// Positioning payload for one row.
    ///
    /// Under virtualization `offset_y` is the cumulative height of all rows
    /// above; in natural flow it is 0 and the renderer stacks rows itself.
    pub fn row_style(&self, index: usize) -> RowStyle {
        let mut height = self.options.row_height;
        if self.is_row_expanded(index) {
            height += self.options.detail_row_height;
        }
        let offset_y = if self.options.scrollbar_v {
            self.cache.offset(index)
        } else {
            0.0
        };
        RowStyle { height, offset_y }
    }

    /// Whether the row at `index` is currently expanded.
    pub fn is_row_expanded(&self, index: usize) -> bool {
        self.rows
            .get(index)
            .is_some_and(|row| self.expanded.contains(&(self.identity)(row)))
    }

    /// Toggle one row's detail expansion.
    ///
    /// Patches the height cache by the signed detail height instead of
    /// rebuilding it, so rows far below the toggle stay cheap. Returns
    /// `None` for an out-of-range index.
    pub fn toggle_row_expansion(&mut self, index: usize) -> Option<DetailToggle> {
        let adjusted = self
            .viewport
            .adjusted_first_index(&self.cache, self.indexes.first);

        let key = self.rows.get(index).map(|row| (self.identity)(row))?;
        let was_expanded = self.expanded.contains(&key);

        if self.options.scrollbar_v {
            let delta = if was_expanded {
                -self.options.detail_row_height
            } else {
                self.options.detail_row_height
            };
            self.cache.update(index, delta);
        }

        if was_expanded {
            self.expanded.remove(&key);
        } else {
            self.expanded.insert(key);
        }

        self.indexes = self.viewport.visible_range(&self.cache);
        Some(DetailToggle {
            current_index: adjusted,
            expanded: !was_expanded,
        })
    }

    /// Expand or collapse every row, regardless of current state.
    ///
    /// Every row is affected, so the height cache is rebuilt in full rather
    /// than patched.
    pub fn toggle_all_rows(&mut self, expanded: bool) -> DetailToggle {
        let adjusted = self
            .viewport
            .adjusted_first_index(&self.cache, self.indexes.first);

        self.expanded.clear();
        if expanded {
            for row in &self.rows {
                self.expanded.insert((self.identity)(row));
            }
        }

        self.refresh_height_cache();
        self.indexes = self.viewport.visible_range(&self.cache);
        DetailToggle {
            current_index: adjusted,
            expanded,
        }
    }

    /// Expand all rows.
    pub fn expand_all_rows(&mut self) -> DetailToggle {
        self.toggle_all_rows(true)
    }

    /// Collapse all rows.
    pub fn collapse_all_rows(&mut self) -> DetailToggle {
        self.toggle_all_rows(false)
    }

    /// Handle a manual column resize.
    ///
    /// Sets the new width (clamped to the column's bounds), records it as
    /// the force-fill anchor, re-runs the allocator with the column excluded
    /// from redistribution, and returns the recomputed array. Unknown ids
    /// and non-resizable columns leave the array unchanged.
    pub fn on_column_resize(&mut self, column_id: &str, new_width: f32) -> &[Column] {
        let Some(idx) = self.columns.iter().position(|c| c.id == column_id) else {
            return &self.columns;
        };
        let Some(col) = self.columns.get_mut(idx) else {
            return &self.columns;
        };
        if !col.resizable {
            return &self.columns;
        }

        let upper = col.max_bound().max(col.min_width);
        col.width = new_width.clamp(col.min_width, upper);
        col.old_width = Some(col.width);

        self.allocate(Some(idx));
        &self.columns
    }

    /// Move a column from one position to another.
    pub fn on_column_reorder(&mut self, prev_index: usize, new_index: usize) -> &[Column] {
        if prev_index >= self.columns.len() || new_index >= self.columns.len() {
            return &self.columns;
        }
        let col = self.columns.remove(prev_index);
        self.columns.insert(new_index, col);
        self.group_widths = column_group_widths(&self.columns);
        &self.columns
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn calc_page_size(&self) -> usize {
        // An expanded row is still one logical row, so the page size uses the
        // base row height only.
        if self.options.scrollbar_v {
            if self.options.row_height <= 0.0 {
                return 0;
            }
            let pages = (self.viewport.body_height / self.options.row_height).ceil();
            return pages.max(0.0) as usize;
        }
        if let Some(limit) = self.options.limit {
            return limit;
        }
        self.rows.len()
    }

    fn calc_row_count(&self) -> usize {
        if self.options.external_paging {
            self.options.count
        } else {
            self.rows.len()
        }
    }

    fn refresh_height_cache(&mut self) {
        if !self.options.scrollbar_v {
            return;
        }
        self.cache.clear_cache();
        if self.rows.is_empty() {
            return;
        }

        let rows = &self.rows;
        let expanded = &self.expanded;
        let identity = &self.identity;
        self.cache.init_cache(
            rows.len(),
            self.options.row_height,
            self.options.detail_row_height,
            |i| {
                rows.get(i)
                    .is_some_and(|row| expanded.contains(&identity(row)))
            },
        );
    }

    fn allocate(&mut self, anchor: Option<usize>) {
        let mut target = self.inner_width;
        if self.options.scrollbar_v {
            target -= SCROLLBAR_WIDTH;
        }
        let target = target.max(0.0);

        match self.options.column_mode {
            ColumnMode::Standard => {}
            ColumnMode::Flex => adjust_column_widths(&mut self.columns, target),
            ColumnMode::Force => force_fill_column_widths(&mut self.columns, target, anchor),
        }
        self.group_widths = column_group_widths(&self.columns);
    }
}

impl<R: RowAccess> DataGrid<R> {
    /// Replace the row array wholesale.
    ///
    /// Active sort directives are re-applied to the incoming rows unless
    /// sorting is external. Follow with `recalculate_layout()`.
    pub fn set_rows(&mut self, mut rows: Vec<R>) {
        if !self.options.external_sorting && !self.sorts.is_empty() {
            self.sorter.sort_page(
                &mut rows,
                &self.sorts,
                self.viewport.page_offset,
                self.options.limit.unwrap_or(0),
            );
        }
        self.rows = rows;
    }

    /// Apply a sort request.
    ///
    /// Sorts the current page in place (whole set when no limit is
    /// configured) unless sorting is external, updates per-column direction
    /// state, resets the scroll position to the top, and rebuilds the layout
    /// since row heights move with their rows.
    pub fn on_column_sort(&mut self, directives: Vec<SortDirective>) {
        if !self.options.external_sorting {
            self.sorter.sort_page(
                &mut self.rows,
                &directives,
                self.viewport.page_offset,
                self.options.limit.unwrap_or(0),
            );
        }

        for col in &mut self.columns {
            col.sort_direction = directives
                .iter()
                .find(|d| d.column == col.id)
                .map(|d| d.direction);
        }

        self.sorts = directives;
        self.viewport.offset_y = 0.0;
        self.recalculate_layout();
    }
}
