//! Context-menu entry descriptors.

use serde::{Deserialize, Serialize};

/// Describes one context-menu entry (e.g. "View", "Edit", "Delete").
///
/// `order` controls rendering position and is expected to be unique within a
/// configured set; the engine does not enforce that, so duplicate orders make
/// the rendering order between the duplicates implementation-defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuDescriptor {
    /// Unique identifier for the entry.
    pub id: u32,
    /// Rendering order within the menu.
    pub order: u32,
    /// Text rendered in the popup.
    pub description: String,
}

impl MenuDescriptor {
    /// Shorthand constructor.
    pub fn new(id: u32, order: u32, description: impl Into<String>) -> Self {
        Self {
            id,
            order,
            description: description.into(),
        }
    }
}
