//! Viewport windowing tests
//!
//! Tests for visible-range computation in virtualized and fixed-page modes,
//! the adjusted first index, and page derivation from scroll direction.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use gridview::{RowHeightCache, ScrollDirection, Viewport};

fn uniform_cache(rows: usize, height: f32) -> RowHeightCache {
    let mut cache = RowHeightCache::new();
    cache.init_cache(rows, height, 0.0, |_| false);
    cache
}

fn virtualized_viewport(rows: usize, body_height: f32) -> Viewport {
    Viewport {
        body_height,
        row_count: rows,
        virtualized: true,
        ..Viewport::new()
    }
}

// =============================================================================
// VIRTUALIZED WINDOWING TESTS
// =============================================================================

#[test]
fn test_window_at_top_of_uniform_rows() {
    // 1000 rows at 30px in a 300px viewport
    let cache = uniform_cache(1000, 30.0);
    let viewport = virtualized_viewport(1000, 300.0);

    let range = viewport.visible_range(&cache);

    assert_eq!(range.first, 0);
    assert_eq!(range.last, 11, "ten full rows plus the boundary row");
}

#[test]
fn test_window_after_scrolling() {
    let cache = uniform_cache(1000, 30.0);
    let mut viewport = virtualized_viewport(1000, 300.0);
    viewport.offset_y = 600.0;

    let range = viewport.visible_range(&cache);

    assert_eq!(range.first, 20, "600px / 30px per row");
    assert_eq!(range.last, 31);
}

#[test]
fn test_window_clamps_at_end_of_rows() {
    let cache = uniform_cache(20, 30.0);
    let mut viewport = virtualized_viewport(20, 300.0);
    viewport.offset_y = 550.0;

    let range = viewport.visible_range(&cache);

    assert!(range.last <= 20, "last must never pass the row count");
    assert!(range.first <= range.last);
}

#[test]
fn test_window_with_expanded_row() {
    // Expanding row 0 by 100px pushes everything below it down
    let mut cache = uniform_cache(100, 30.0);
    cache.update(0, 100.0);
    let mut viewport = virtualized_viewport(100, 300.0);

    let range = viewport.visible_range(&cache);
    assert_eq!(range.first, 0);
    // 130px of row 0 + 170px of rows 1..6 -> boundary row is 6
    assert_eq!(range.last, 7);

    viewport.offset_y = 130.0;
    let range = viewport.visible_range(&cache);
    assert_eq!(range.first, 1, "row 1 starts exactly at 130px");
}

#[test]
fn test_window_empty_row_set() {
    let cache = RowHeightCache::new();
    let viewport = virtualized_viewport(0, 300.0);

    let range = viewport.visible_range(&cache);
    assert!(range.is_empty());
    assert_eq!(range.len(), 0);
}

// =============================================================================
// FIXED-PAGE WINDOWING TESTS
// =============================================================================

#[test]
fn test_fixed_page_window() {
    let cache = RowHeightCache::new();
    let viewport = Viewport {
        page_offset: 2,
        page_size: 25,
        row_count: 100,
        virtualized: false,
        ..Viewport::new()
    };

    let range = viewport.visible_range(&cache);
    assert_eq!(range.first, 50);
    assert_eq!(range.last, 75);
}

#[test]
fn test_fixed_page_window_clamps_last_page() {
    let cache = RowHeightCache::new();
    let viewport = Viewport {
        page_offset: 9,
        page_size: 12,
        row_count: 100,
        virtualized: false,
        ..Viewport::new()
    };

    let range = viewport.visible_range(&cache);
    assert_eq!(range.first, 100, "page 9 would start at row 108, clamped");
    assert_eq!(range.last, 100, "nothing visible past the row count");
}

// =============================================================================
// ADJUSTED FIRST INDEX TESTS
// =============================================================================

#[test]
fn test_adjusted_first_index_includes_partial_row() {
    let cache = uniform_cache(100, 30.0);
    let mut viewport = virtualized_viewport(100, 300.0);

    // Scrolled to exactly the top of row 10: row 10's top edge is at the
    // scroll offset, so row 9 is treated as the effective first row
    viewport.offset_y = 300.0;
    let range = viewport.visible_range(&cache);
    assert_eq!(range.first, 10);
    assert_eq!(viewport.adjusted_first_index(&cache, range.first), 9);

    // Mid-row: row 10 starts above the offset, nothing to include
    viewport.offset_y = 310.0;
    let range = viewport.visible_range(&cache);
    assert_eq!(range.first, 10);
    assert_eq!(viewport.adjusted_first_index(&cache, range.first), 10);
}

#[test]
fn test_adjusted_first_index_at_top_stays_zero() {
    let cache = uniform_cache(100, 30.0);
    let viewport = virtualized_viewport(100, 300.0);

    assert_eq!(viewport.adjusted_first_index(&cache, 0), 0);
}

#[test]
fn test_adjusted_first_index_fixed_page_passthrough() {
    let cache = RowHeightCache::new();
    let viewport = Viewport {
        page_size: 10,
        row_count: 100,
        virtualized: false,
        ..Viewport::new()
    };

    assert_eq!(viewport.adjusted_first_index(&cache, 37), 37);
}

// =============================================================================
// PAGE DERIVATION TESTS
// =============================================================================

#[test]
fn test_page_for_first_index_by_direction() {
    let viewport = Viewport {
        page_size: 10,
        row_count: 1000,
        virtualized: true,
        ..Viewport::new()
    };

    // Row 25 sits on page 2.5: up floors, down ceils
    assert_eq!(
        viewport.page_for_first_index(25, ScrollDirection::Up),
        Some(2)
    );
    assert_eq!(
        viewport.page_for_first_index(25, ScrollDirection::Down),
        Some(3)
    );
    assert_eq!(
        viewport.page_for_first_index(30, ScrollDirection::Down),
        Some(3)
    );
}

#[test]
fn test_page_for_first_index_without_page_size() {
    let viewport = Viewport::new();
    assert_eq!(viewport.page_for_first_index(5, ScrollDirection::Down), None);
}

#[test]
fn test_scroll_offset_for_page() {
    let mut cache = uniform_cache(100, 30.0);
    let viewport = Viewport {
        page_size: 10,
        row_count: 100,
        virtualized: true,
        ..Viewport::new()
    };

    assert_eq!(viewport.scroll_offset_for_page(&cache, 0), 0.0);
    assert_eq!(viewport.scroll_offset_for_page(&cache, 3), 900.0);

    // Expanded rows move page boundaries with them
    cache.update(5, 100.0);
    assert_eq!(viewport.scroll_offset_for_page(&cache, 3), 1000.0);
}
