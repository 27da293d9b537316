//! Error types for record views.

use thiserror::Error;

/// Result type for view operations.
pub type ViewResult<T> = Result<T, ViewError>;

/// Errors raised by view setters and construction.
///
/// A stale page index is not an error: it is clamped silently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// No column with this id exists in the view.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// Two descriptors share an id.
    #[error("duplicate column id: {0}")]
    DuplicateColumn(String),

    /// The column does not allow sorting.
    #[error("column is not sortable: {0}")]
    NotSortable(String),

    /// The column does not allow filtering.
    #[error("column is not filterable: {0}")]
    NotFilterable(String),

    /// Pages must hold at least one row.
    #[error("page size must be at least 1")]
    ZeroPageSize,
}
