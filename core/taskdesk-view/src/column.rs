//! Column descriptors: how a view reads, sorts and filters one attribute.

use crate::filter::FilterValue;
use crate::value::{CellValue, MISSING_PLACEHOLDER};
use chrono::SecondsFormat;
use std::fmt;
use std::sync::Arc;

/// Pure function reading one cell out of a record.
pub type Accessor<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;

/// The closed set of column kinds a view knows how to format and filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKind {
    /// Free-form text; filters match by case-insensitive substring.
    Text,
    /// Fixed option set; filter input naming an option matches exactly.
    Enum { options: Vec<String> },
    /// Timestamps; displayed as `YYYY-MM-DD HH:MM` in UTC.
    DateTime,
    /// Numbers; filter input that parses as a number matches exactly.
    Number,
}

impl ColumnKind {
    /// Formats a cell for display.
    pub fn format(&self, value: &CellValue) -> String {
        match (self, value) {
            (_, CellValue::Missing) => MISSING_PLACEHOLDER.to_string(),
            (Self::DateTime, CellValue::DateTime(dt)) => dt.format("%Y-%m-%d %H:%M").to_string(),
            (_, CellValue::DateTime(dt)) => dt.to_rfc3339_opts(SecondsFormat::Secs, true),
            (_, other) => other.to_string(),
        }
    }

    /// The text a free-text filter is matched against: the displayed form,
    /// or nothing for a missing cell so the placeholder never matches.
    pub fn search_text(&self, value: &CellValue) -> String {
        match value {
            CellValue::Missing => String::new(),
            other => self.format(other),
        }
    }

    /// Interprets user-typed filter input for this kind of column.
    pub fn parse_filter(&self, input: &str) -> FilterValue {
        let trimmed = input.trim();
        match self {
            Self::Enum { options } => options
                .iter()
                .find(|o| o.eq_ignore_ascii_case(trimmed))
                .map(|o| FilterValue::Exact(CellValue::Enum(o.clone())))
                .unwrap_or_else(|| FilterValue::text(trimmed)),
            Self::Number => trimmed
                .parse::<f64>()
                .map(|n| FilterValue::Exact(CellValue::Number(n)))
                .unwrap_or_else(|_| FilterValue::text(trimmed)),
            Self::Text | Self::DateTime => FilterValue::text(trimmed),
        }
    }
}

/// Declarative description of one displayed attribute of `T`.
///
/// Descriptors are built with the kind-specific shorthands and then
/// refined with the `with_*` builders:
///
/// ```
/// use taskdesk_view::{CellValue, ColumnDescriptor};
///
/// struct Note { title: String }
///
/// let col = ColumnDescriptor::text("title", |n: &Note| CellValue::text(n.title.clone()))
///     .with_header("Title")
///     .with_sortable(false);
/// assert_eq!(col.header(), "Title");
/// assert!(!col.is_sortable());
/// ```
pub struct ColumnDescriptor<T> {
    id: String,
    header: String,
    kind: ColumnKind,
    accessor: Accessor<T>,
    sortable: bool,
    filterable: bool,
}

impl<T> ColumnDescriptor<T> {
    /// Creates a sortable, filterable column whose header is its id.
    pub fn new<F>(id: impl Into<String>, kind: ColumnKind, accessor: F) -> Self
    where
        F: Fn(&T) -> CellValue + Send + Sync + 'static,
    {
        let id = id.into();
        Self {
            header: id.clone(),
            id,
            kind,
            accessor: Arc::new(accessor),
            sortable: true,
            filterable: true,
        }
    }

    /// Shorthand for a text column.
    pub fn text<F>(id: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> CellValue + Send + Sync + 'static,
    {
        Self::new(id, ColumnKind::Text, accessor)
    }

    /// Shorthand for an enum column with fixed options.
    pub fn enumeration<F>(id: impl Into<String>, options: Vec<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> CellValue + Send + Sync + 'static,
    {
        Self::new(id, ColumnKind::Enum { options }, accessor)
    }

    /// Shorthand for a timestamp column.
    pub fn datetime<F>(id: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> CellValue + Send + Sync + 'static,
    {
        Self::new(id, ColumnKind::DateTime, accessor)
    }

    /// Shorthand for a numeric column.
    pub fn number<F>(id: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> CellValue + Send + Sync + 'static,
    {
        Self::new(id, ColumnKind::Number, accessor)
    }

    /// Sets the label shown above the column; defaults to the id.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Whether header clicks may sort by this column.
    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Whether column filters and the global filter consider this column.
    pub fn with_filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    /// Stable identifier used to address the column in sorts and filters.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Label shown above the column.
    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn kind(&self) -> &ColumnKind {
        &self.kind
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn is_filterable(&self) -> bool {
        self.filterable
    }

    /// Reads this column's value out of a record.
    pub fn value(&self, record: &T) -> CellValue {
        (self.accessor)(record)
    }

    /// Reads and formats this column's value for display.
    pub fn display(&self, record: &T) -> String {
        self.kind.format(&self.value(record))
    }

    /// Tests `filter` against this column's value in `record`.
    pub fn matches(&self, record: &T, filter: &FilterValue) -> bool {
        filter.matches(&self.kind, &self.value(record))
    }
}

impl<T> Clone for ColumnDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            kind: self.kind.clone(),
            accessor: Arc::clone(&self.accessor),
            sortable: self.sortable,
            filterable: self.filterable,
        }
    }
}

impl<T> fmt::Debug for ColumnDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("kind", &self.kind)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .finish_non_exhaustive()
    }
}
