//! In-page stable sorting.
//!
//! Sorts either the whole row set or just the sub-range backing the current
//! page, leaving every other row untouched. Keeping the sort inside the page
//! bounds the cost by the page size rather than the data-set size, which is
//! what makes client-side sorting viable on externally paged sets.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::types::{NullOrdering, RowAccess, SortDirection, SortDirective};

/// Custom ordering function for one column.
pub type SortComparator<R> = Box<dyn Fn(&R, &R) -> Ordering>;

/// Multi-key stable sorter over caller-owned rows.
///
/// Each directive resolves to either a registered per-column comparator or
/// the natural ordering of the column's [`CellValue`]s; ties fall through to
/// the next directive. Equal rows keep their original relative order.
pub struct PageSortEngine<R> {
    comparators: HashMap<String, SortComparator<R>>,
    null_ordering: NullOrdering,
}

impl<R> Default for PageSortEngine<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> PageSortEngine<R> {
    /// Create an engine with natural comparison only.
    pub fn new() -> Self {
        Self {
            comparators: HashMap::new(),
            null_ordering: NullOrdering::default(),
        }
    }

    /// Set where empty values sort relative to present ones.
    pub fn with_null_ordering(mut self, null_ordering: NullOrdering) -> Self {
        self.null_ordering = null_ordering;
        self
    }

    /// Register a custom comparator for a column, replacing natural ordering
    /// for directives that name it.
    pub fn register_comparator(&mut self, column_id: impl Into<String>, cmp: SortComparator<R>) {
        self.comparators.insert(column_id.into(), cmp);
    }
}

impl<R: RowAccess> PageSortEngine<R> {
    /// Stably sort the page sub-range `[page_offset * limit, + limit)` in
    /// place; rows outside it keep their position and identity.
    ///
    /// A `limit` of 0 sorts the entire slice. The sub-range clamps to the
    /// slice bounds, so a short final page sorts whatever rows exist. Empty
    /// directives leave the slice untouched.
    pub fn sort_page(
        &self,
        rows: &mut [R],
        directives: &[SortDirective],
        page_offset: usize,
        limit: usize,
    ) {
        if directives.is_empty() || rows.is_empty() {
            return;
        }

        let (start, end) = if limit > 0 {
            let start = page_offset.saturating_mul(limit).min(rows.len());
            (start, start.saturating_add(limit).min(rows.len()))
        } else {
            (0, rows.len())
        };

        tracing::debug!(start, end, keys = directives.len(), "in-page sort");

        if let Some(page) = rows.get_mut(start..end) {
            page.sort_by(|a, b| self.compare(a, b, directives));
        }
    }

    /// Stably sort the whole slice.
    pub fn sort_rows(&self, rows: &mut [R], directives: &[SortDirective]) {
        self.sort_page(rows, directives, 0, 0);
    }

    fn compare(&self, a: &R, b: &R, directives: &[SortDirective]) -> Ordering {
        for directive in directives {
            let ord = match self.comparators.get(&directive.column) {
                Some(custom) => custom(a, b),
                None => a
                    .cell(&directive.column)
                    .natural_cmp(&b.cell(&directive.column), self.null_ordering),
            };
            let ord = match directive.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}
