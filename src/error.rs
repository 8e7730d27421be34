//! Structured error types for gridview.
//!
//! Replaces `Result<T, String>` throughout the codebase with proper error types.

/// All errors that can occur while configuring or driving the grid engine.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// JSON parsing error from a column or options config payload.
    #[error("JSON parsing: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid column configuration.
    #[error("Column config: {0}")]
    ColumnConfig(String),

    /// Catch-all for string errors during migration.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}
