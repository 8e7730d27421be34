//! Viewport state management for vertical windowing.

use crate::types::IndexRange;

use super::RowHeightCache;

/// Direction of the latest vertical scroll, used to bias page derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Scrolling toward row 0.
    Up,
    /// Scrolling toward the end of the set.
    Down,
}

/// Viewport state - represents the visible slice of the row set.
///
/// When `virtualized` is set, the visible range comes from the row-height
/// cache; otherwise the range is plain page arithmetic over a fixed page
/// size.
#[derive(Debug, Clone)]
pub struct Viewport {
    /// Vertical scroll position in content coordinates.
    pub offset_y: f32,
    /// Horizontal scroll position in content coordinates.
    pub offset_x: f32,
    /// Height of the scrollable body in pixels.
    pub body_height: f32,
    /// Current page index (fixed-page mode).
    pub page_offset: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Total number of rows backing the viewport.
    pub row_count: usize,
    /// True when vertical virtualization is enabled.
    pub virtualized: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    /// Create a new viewport with default values.
    pub fn new() -> Self {
        Self {
            offset_y: 0.0,
            offset_x: 0.0,
            body_height: 0.0,
            page_offset: 0,
            page_size: 0,
            row_count: 0,
            virtualized: false,
        }
    }

    /// Compute the half-open visible index range for the current scroll
    /// position.
    ///
    /// Virtualized: the first row is the one containing `offset_y`, the last
    /// is one past the row containing the bottom edge. Fixed-page: plain
    /// `page_offset * page_size` arithmetic. Either way `last` never exceeds
    /// `row_count`.
    pub fn visible_range(&self, cache: &RowHeightCache) -> IndexRange {
        if self.row_count == 0 {
            return IndexRange::default();
        }

        if self.virtualized {
            let first = cache.row_index_at(self.offset_y);
            let last = cache
                .row_index_at(self.offset_y + self.body_height)
                .saturating_add(1)
                .min(self.row_count);
            IndexRange {
                first: first.min(last),
                last,
            }
        } else {
            let first = self
                .page_offset
                .saturating_mul(self.page_size)
                .min(self.row_count);
            let last = first.saturating_add(self.page_size).min(self.row_count);
            IndexRange { first, last }
        }
    }

    /// First row index adjusted for a partially visible row above it.
    ///
    /// If the row at `first` starts at or above the current scroll offset,
    /// the row before it is still partially in view and becomes the
    /// effective first row. Used by scroll-follow behaviors so that toggling
    /// an expansion near the top keeps that row on screen.
    pub fn adjusted_first_index(&self, cache: &RowHeightCache, first: usize) -> usize {
        if !self.virtualized {
            return first;
        }
        let offset_scroll = cache.offset(first);
        if offset_scroll <= self.offset_y {
            first.saturating_sub(1)
        } else {
            first
        }
    }

    /// Derive the page index implied by the first visible row.
    ///
    /// Scrolling up floors the fractional page, scrolling down ceils it, so
    /// the pager always names a page whose rows are actually on screen.
    /// `None` when no page size is configured.
    pub fn page_for_first_index(
        &self,
        first: usize,
        direction: ScrollDirection,
    ) -> Option<usize> {
        if self.page_size == 0 {
            return None;
        }
        let page = match direction {
            ScrollDirection::Up => first / self.page_size,
            ScrollDirection::Down => first.div_ceil(self.page_size),
        };
        Some(page)
    }

    /// Scroll offset that puts the first row of `page_offset` at the top.
    ///
    /// Only meaningful under virtualization, where page boundaries fall on
    /// uneven cumulative heights; fixed-page mode positions by index and
    /// needs no pixel offset.
    pub fn scroll_offset_for_page(&self, cache: &RowHeightCache, page_offset: usize) -> f32 {
        if !self.virtualized {
            return 0.0;
        }
        cache.offset(self.page_size.saturating_mul(page_offset))
    }
}
