//! Column definitions and the column-config loader.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

use super::SortDirection;

/// Default column width in pixels when the config leaves it unset.
pub const DEFAULT_COLUMN_WIDTH: f32 = 150.0;

/// Which edge a column is pinned to, if any.
///
/// Pinned columns keep their width through every allocation pass; their total
/// is a fixed constraint that reduces the pool available to unpinned columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnPin {
    /// Not pinned; participates in width redistribution.
    #[default]
    None,
    /// Pinned to the left edge.
    Left,
    /// Pinned to the right edge.
    Right,
}

/// Column width distribution policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnMode {
    /// Widths are taken as declared; no redistribution.
    #[default]
    Standard,
    /// Widths scale proportionally to `flex_grow` weights.
    Flex,
    /// Leftover/deficit width is redistributed after a manual resize.
    Force,
}

/// A single column definition.
///
/// Plain data: comparators and templates live outside this struct so the
/// column set stays serializable end to end.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Column {
    /// Stable identifier; sort directives and resize events refer to it.
    pub id: String,
    /// Header display name. Defaults to the id when unset.
    pub name: String,
    /// Display order.
    pub order: u32,
    /// Pinned edge, if any.
    pub pin: ColumnPin,
    /// Current width in pixels.
    pub width: f32,
    /// Lower width bound enforced by every allocation pass.
    pub min_width: f32,
    /// Optional upper width bound.
    pub max_width: Option<f32>,
    /// Proportional growth weight for flex allocation; 0 = fixed width.
    pub flex_grow: f32,
    /// False removes the column from automatic redistribution pools.
    pub can_auto_resize: bool,
    /// False blocks manual resizing of this column.
    pub resizable: bool,
    /// Last explicitly set width; anchors force-fill redistribution so a
    /// just-resized column is not immediately resized again.
    #[serde(skip)]
    pub old_width: Option<f32>,
    /// Current sort direction shown in the header, if sorted.
    #[serde(skip)]
    pub sort_direction: Option<SortDirection>,
}

impl Default for Column {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            order: 0,
            pin: ColumnPin::None,
            width: DEFAULT_COLUMN_WIDTH,
            min_width: 0.0,
            max_width: None,
            flex_grow: 0.0,
            can_auto_resize: true,
            resizable: true,
            old_width: None,
            sort_direction: None,
        }
    }
}

impl Column {
    /// Create a column with the given id and all defaults.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            ..Self::default()
        }
    }

    /// Effective upper bound, `f32::INFINITY` when unbounded.
    pub(crate) fn max_bound(&self) -> f32 {
        self.max_width.unwrap_or(f32::INFINITY)
    }
}

/// Fill in unset fields after deserialization.
///
/// Mirrors what a column template loader does before handing the set to the
/// engine: empty names fall back to the id, non-positive widths fall back to
/// the default, inverted min/max bounds are widened, and a fully unordered set
/// gets sequential display order.
pub fn set_column_defaults(columns: &mut [Column]) {
    let unordered = columns.iter().all(|c| c.order == 0);

    for (idx, col) in columns.iter_mut().enumerate() {
        if col.name.is_empty() {
            col.name.clone_from(&col.id);
        }
        if col.width <= 0.0 {
            col.width = DEFAULT_COLUMN_WIDTH;
        }
        if col.min_width < 0.0 {
            col.min_width = 0.0;
        }
        if let Some(max) = col.max_width {
            if max < col.min_width {
                col.max_width = Some(col.min_width);
            }
        }
        col.width = col.width.clamp(col.min_width, col.max_bound());
        if unordered {
            col.order = u32::try_from(idx).unwrap_or(u32::MAX);
        }
    }
}

/// Load a column set from a JSON array, applying defaults.
///
/// # Errors
/// Returns an error if the JSON is malformed, a column is missing an id, or
/// two columns share one.
pub fn columns_from_json(json: &str) -> Result<Vec<Column>> {
    let mut columns: Vec<Column> = serde_json::from_str(json)?;

    for col in &columns {
        if col.id.is_empty() {
            return Err(GridError::ColumnConfig("column without an id".into()));
        }
    }
    for (idx, col) in columns.iter().enumerate() {
        if columns
            .iter()
            .take(idx)
            .any(|earlier| earlier.id == col.id)
        {
            return Err(GridError::ColumnConfig(format!(
                "duplicate column id: {}",
                col.id
            )));
        }
    }

    set_column_defaults(&mut columns);
    Ok(columns)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_name_and_width() {
        let mut cols = vec![Column {
            id: "age".to_string(),
            width: 0.0,
            ..Column::default()
        }];
        set_column_defaults(&mut cols);

        assert_eq!(cols[0].name, "age");
        assert_eq!(cols[0].width, DEFAULT_COLUMN_WIDTH);
    }

    #[test]
    fn test_defaults_assign_sequential_order() {
        let mut cols = vec![Column::new("a"), Column::new("b"), Column::new("c")];
        set_column_defaults(&mut cols);

        assert_eq!(cols[0].order, 0);
        assert_eq!(cols[1].order, 1);
        assert_eq!(cols[2].order, 2);
    }

    #[test]
    fn test_defaults_respect_existing_order() {
        let mut cols = vec![Column::new("a"), Column::new("b")];
        cols[1].order = 5;
        set_column_defaults(&mut cols);

        // Not fully unordered, so nothing is reassigned
        assert_eq!(cols[0].order, 0);
        assert_eq!(cols[1].order, 5);
    }

    #[test]
    fn test_from_json_rejects_duplicate_ids() {
        let json = r#"[{"id": "a"}, {"id": "a"}]"#;
        assert!(columns_from_json(json).is_err());
    }

    #[test]
    fn test_from_json_parses_pin_and_flex() {
        let json = r#"[
            {"id": "sel", "pin": "left", "width": 40},
            {"id": "name", "flex_grow": 1.0}
        ]"#;
        let cols = columns_from_json(json).unwrap();

        assert_eq!(cols[0].pin, ColumnPin::Left);
        assert_eq!(cols[0].width, 40.0);
        assert_eq!(cols[1].flex_grow, 1.0);
        assert_eq!(cols[1].width, DEFAULT_COLUMN_WIDTH);
    }
}
