//! Typed cell values and the row access seam used by the sorter.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::NullOrdering;

/// A single cell value as seen by the engine.
///
/// Application rows stay opaque; the sorter only ever sees values through
/// [`RowAccess`], so callers decide how their data maps onto these variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// No value present (missing field, null, etc).
    Empty,
    /// Boolean value; `false` orders before `true`.
    Bool(bool),
    /// Numeric value.
    Number(f64),
    /// Text value; compared case-insensitively first.
    Text(String),
}

impl CellValue {
    /// True for the `Empty` variant.
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Parse a display string into a typed value.
    ///
    /// Detects the value type automatically:
    /// - Empty/whitespace string → `Empty`
    /// - "true"/"false" (case-insensitive) → `Bool`
    /// - Parseable as f64 → `Number`
    /// - Otherwise → `Text`
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        if trimmed.eq_ignore_ascii_case("true") {
            return CellValue::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return CellValue::Bool(false);
        }
        if let Ok(n) = trimmed.parse::<f64>() {
            return CellValue::Number(n);
        }

        CellValue::Text(trimmed.to_string())
    }

    /// Total ordering used by the natural sort comparator.
    ///
    /// Empties order per `nulls`; mixed types order by rank
    /// (bool < number < text) so multi-key sorts stay deterministic on
    /// heterogeneous columns. Numbers use IEEE total ordering, text compares
    /// case-insensitively with a case-sensitive tie-break.
    pub fn natural_cmp(&self, other: &CellValue, nulls: NullOrdering) -> Ordering {
        match (self, other) {
            (CellValue::Empty, CellValue::Empty) => Ordering::Equal,
            (CellValue::Empty, _) => match nulls {
                NullOrdering::First => Ordering::Less,
                NullOrdering::Last => Ordering::Greater,
            },
            (_, CellValue::Empty) => match nulls {
                NullOrdering::First => Ordering::Greater,
                NullOrdering::Last => Ordering::Less,
            },
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => {
                let folded = a.to_lowercase().cmp(&b.to_lowercase());
                if folded == Ordering::Equal {
                    a.cmp(b)
                } else {
                    folded
                }
            }
            (a, b) => a.type_rank().cmp(&b.type_rank()),
        }
    }

    fn type_rank(&self) -> u8 {
        match self {
            CellValue::Empty => 0,
            CellValue::Bool(_) => 1,
            CellValue::Number(_) => 2,
            CellValue::Text(_) => 3,
        }
    }
}

/// Access seam between caller-owned rows and the sort engine.
///
/// Implemented by the application's row type; the engine never inspects rows
/// any other way.
pub trait RowAccess {
    /// The value of the cell in the named column, `Empty` if absent.
    fn cell(&self, column_id: &str) -> CellValue;
}
