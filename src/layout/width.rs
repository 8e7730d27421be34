//! Column width allocation.
//!
//! Two independent policies distribute the available width across the column
//! set: proportional "flex" growth and "force-fill" redistribution after a
//! manual resize. Pinned columns never participate; their width is a fixed
//! constraint that shrinks the pool for everyone else. Both policies are pure
//! passes over the column slice with no hidden state.

use crate::types::{Column, ColumnPin};

/// Columns partitioned by pinned edge, in declaration order.
#[derive(Debug, Default)]
pub struct ColumnsByPin<'a> {
    /// Columns pinned to the left edge.
    pub left: Vec<&'a Column>,
    /// Unpinned columns.
    pub center: Vec<&'a Column>,
    /// Columns pinned to the right edge.
    pub right: Vec<&'a Column>,
}

/// Total widths per pin group, used by the renderer to compute horizontal
/// offsets for the three column regions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColumnGroupWidths {
    /// Total width of left-pinned columns.
    pub left: f32,
    /// Total width of unpinned columns.
    pub center: f32,
    /// Total width of right-pinned columns.
    pub right: f32,
    /// Grand total.
    pub total: f32,
}

/// Partition a column slice by pin position.
pub fn columns_by_pin(columns: &[Column]) -> ColumnsByPin<'_> {
    let mut groups = ColumnsByPin::default();
    for col in columns {
        match col.pin {
            ColumnPin::Left => groups.left.push(col),
            ColumnPin::None => groups.center.push(col),
            ColumnPin::Right => groups.right.push(col),
        }
    }
    groups
}

/// Derive the per-group width totals for the current column array.
///
/// Read-only view; recompute whenever the column array identity changes.
pub fn column_group_widths(columns: &[Column]) -> ColumnGroupWidths {
    let mut widths = ColumnGroupWidths::default();
    for col in columns {
        match col.pin {
            ColumnPin::Left => widths.left += col.width,
            ColumnPin::None => widths.center += col.width,
            ColumnPin::Right => widths.right += col.width,
        }
    }
    widths.total = widths.left + widths.center + widths.right;
    widths
}

/// Sum of all current column widths.
pub fn columns_total_width(columns: &[Column]) -> f32 {
    columns.iter().map(|c| c.width).sum()
}

/// Flex allocation: distribute the pool proportionally to `flex_grow`.
///
/// Fixed-width columns (zero flex) and pinned columns keep their declared
/// width and reduce the pool. Columns that hit a min/max bound are clamped
/// and removed from the pool, and the remainder is redistributed among the
/// rest until everything is absorbed or no flexible column remains.
pub fn adjust_column_widths(columns: &mut [Column], expected_width: f32) {
    let pinned_width: f32 = columns
        .iter()
        .filter(|c| c.pin != ColumnPin::None)
        .map(|c| c.width)
        .sum();
    let fixed_width: f32 = columns
        .iter()
        .filter(|c| c.pin == ColumnPin::None && c.flex_grow <= 0.0)
        .map(|c| c.width)
        .sum();
    let mut pool = (expected_width - pinned_width - fixed_width).max(0.0);

    let mut open: Vec<usize> = columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.pin == ColumnPin::None && c.flex_grow > 0.0)
        .map(|(i, _)| i)
        .collect();
    if open.is_empty() {
        return;
    }

    tracing::trace!(pool, flexible = open.len(), "flex width pass");

    loop {
        let total_grow: f32 = open
            .iter()
            .filter_map(|&i| columns.get(i))
            .map(|c| c.flex_grow)
            .sum();
        if total_grow <= 0.0 {
            break;
        }
        let per_grow = pool / total_grow;

        let mut clamped_any = false;
        let mut next_open = Vec::with_capacity(open.len());
        for &i in &open {
            let Some(col) = columns.get_mut(i) else {
                continue;
            };
            let target = col.flex_grow * per_grow;
            let upper = col.max_bound().max(col.min_width);
            let bounded = target.clamp(col.min_width, upper);
            if (bounded - target).abs() > f32::EPSILON {
                // Bound hit: fix this column and redistribute the rest
                col.width = bounded;
                pool = (pool - bounded).max(0.0);
                clamped_any = true;
            } else {
                next_open.push(i);
            }
        }
        open = next_open;

        if !clamped_any {
            for &i in &open {
                if let Some(col) = columns.get_mut(i) {
                    col.width = col.flex_grow * per_grow;
                }
            }
            break;
        }
        if open.is_empty() {
            break;
        }
    }
}

/// Force-fill allocation: spread the delta between the expected width and the
/// current total across the resizeable columns.
///
/// The anchored column (the one whose width was just explicitly set) is
/// excluded from the pool for this pass, as are pinned columns and columns
/// opting out of auto-resize. The delta spreads proportionally to each pool
/// column's share of the pool total; columns clamped by a min/max bound drop
/// out and the unabsorbed remainder is retried against the rest until it is
/// exhausted or no eligible column remains. Under an infeasible total this
/// degrades to every column sitting on its bound.
pub fn force_fill_column_widths(columns: &mut [Column], expected_width: f32, anchor: Option<usize>) {
    let mut remaining = expected_width - columns_total_width(columns);
    if remaining.abs() <= f32::EPSILON {
        return;
    }

    let mut pool: Vec<usize> = columns
        .iter()
        .enumerate()
        .filter(|(i, c)| {
            c.pin == ColumnPin::None && c.resizable && c.can_auto_resize && Some(*i) != anchor
        })
        .map(|(i, _)| i)
        .collect();

    tracing::trace!(delta = remaining, pool = pool.len(), "force fill pass");

    while remaining.abs() > 0.5 && !pool.is_empty() {
        let share_total: f32 = pool
            .iter()
            .filter_map(|&i| columns.get(i))
            .map(|c| c.width)
            .sum();
        let pool_count = pool.len() as f32;

        let mut leftover = 0.0;
        let mut next_pool = Vec::with_capacity(pool.len());
        for &i in &pool {
            let Some(col) = columns.get_mut(i) else {
                continue;
            };
            let grant = if share_total > f32::EPSILON {
                remaining * col.width / share_total
            } else {
                // All pool columns collapsed to zero width: split evenly
                remaining / pool_count
            };
            let target = col.width + grant;
            let upper = col.max_bound().max(col.min_width);
            let bounded = target.clamp(col.min_width, upper);
            leftover += target - bounded;
            col.width = bounded;
            if (bounded - target).abs() <= f32::EPSILON {
                next_pool.push(i);
            }
        }

        if next_pool.len() == pool.len() {
            // Nothing clamped; the delta was fully absorbed
            break;
        }
        pool = next_pool;
        remaining = leftover;
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    fn flex_column(id: &str, grow: f32) -> Column {
        Column {
            flex_grow: grow,
            ..Column::new(id)
        }
    }

    #[test]
    fn test_flex_proportional_shares() {
        let mut cols = vec![
            flex_column("a", 1.0),
            flex_column("b", 1.0),
            flex_column("c", 2.0),
        ];
        adjust_column_widths(&mut cols, 300.0);

        assert_eq!(cols[0].width, 75.0);
        assert_eq!(cols[1].width, 75.0);
        assert_eq!(cols[2].width, 150.0);
    }

    #[test]
    fn test_flex_excludes_fixed_columns() {
        let mut cols = vec![flex_column("fixed", 0.0), flex_column("flex", 1.0)];
        cols[0].width = 100.0;
        adjust_column_widths(&mut cols, 400.0);

        assert_eq!(cols[0].width, 100.0);
        assert_eq!(cols[1].width, 300.0);
    }

    #[test]
    fn test_flex_respects_min_width() {
        let mut cols = vec![flex_column("a", 1.0), flex_column("b", 1.0)];
        cols[0].min_width = 80.0;
        adjust_column_widths(&mut cols, 100.0);

        assert_eq!(cols[0].width, 80.0);
        assert_eq!(cols[1].width, 20.0);
    }

    #[test]
    fn test_force_fill_spreads_delta() {
        let mut cols = vec![flex_column("a", 0.0), flex_column("b", 0.0)];
        cols[0].width = 100.0;
        cols[1].width = 100.0;
        force_fill_column_widths(&mut cols, 300.0, None);

        assert!((cols[0].width - 150.0).abs() < 1.0);
        assert!((cols[1].width - 150.0).abs() < 1.0);
    }

    #[test]
    fn test_force_fill_skips_anchor() {
        let mut cols = vec![flex_column("a", 0.0), flex_column("b", 0.0)];
        cols[0].width = 120.0;
        cols[1].width = 100.0;
        force_fill_column_widths(&mut cols, 320.0, Some(0));

        assert_eq!(cols[0].width, 120.0);
        assert!((cols[1].width - 200.0).abs() < 1.0);
    }

    #[test]
    fn test_group_widths_by_pin() {
        let mut left = Column::new("sel");
        left.pin = ColumnPin::Left;
        left.width = 40.0;
        let mut right = Column::new("actions");
        right.pin = ColumnPin::Right;
        right.width = 60.0;
        let mut center = Column::new("name");
        center.width = 200.0;

        let widths = column_group_widths(&[left, center, right]);
        assert_eq!(widths.left, 40.0);
        assert_eq!(widths.center, 200.0);
        assert_eq!(widths.right, 60.0);
        assert_eq!(widths.total, 300.0);
    }
}
