//! Sort directives.

use serde::{Deserialize, Serialize};

/// Sort direction for one directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// One entry of a multi-column sort.
///
/// Directives are order-sensitive: earlier entries take comparator precedence
/// and ties fall through to the next one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDirective {
    /// Column id the directive sorts by.
    pub column: String,
    /// Direction applied to this key.
    pub direction: SortDirection,
}

impl SortDirective {
    /// Shorthand constructor.
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}

/// Where empty cell values sort relative to present ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullOrdering {
    /// Empties sort before everything else (consistently low).
    #[default]
    First,
    /// Empties sort after everything else (consistently high).
    Last,
}
