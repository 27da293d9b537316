//! Filtering primitives.
//!
//! Column filters combine with logical AND; the global filter is a logical
//! OR across every filterable column.

use crate::column::{ColumnDescriptor, ColumnKind};
use crate::value::CellValue;
use std::fmt;
use std::sync::Arc;

/// A filter applied to one column's values.
#[derive(Clone)]
pub enum FilterValue {
    /// Case-insensitive substring match on the cell as displayed.
    Text(String),
    /// Typed equality (see [`CellValue::loosely_eq`]).
    Exact(CellValue),
    /// Arbitrary predicate over the cell value.
    Predicate(Arc<dyn Fn(&CellValue) -> bool + Send + Sync>),
}

impl FilterValue {
    pub fn text(needle: impl Into<String>) -> Self {
        Self::Text(needle.into())
    }

    pub fn exact(value: impl Into<CellValue>) -> Self {
        Self::Exact(value.into())
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&CellValue) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(f))
    }

    /// Whether this filter constrains anything. Blank text filters do not.
    pub fn is_active(&self) -> bool {
        match self {
            Self::Text(s) => !s.trim().is_empty(),
            _ => true,
        }
    }

    /// Tests one cell value from a column of `kind`.
    pub fn matches(&self, kind: &ColumnKind, value: &CellValue) -> bool {
        match self {
            Self::Text(needle) => contains_ignore_case(&kind.search_text(value), needle.trim()),
            Self::Exact(expected) => value.loosely_eq(expected),
            Self::Predicate(f) => f(value),
        }
    }
}

impl fmt::Debug for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Self::Exact(v) => f.debug_tuple("Exact").field(v).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Case-insensitive substring test.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// True if `record` satisfies every filter. An empty filter set matches all.
pub fn matches_all<T>(record: &T, filters: &[(&ColumnDescriptor<T>, &FilterValue)]) -> bool {
    filters
        .iter()
        .all(|(column, filter)| column.matches(record, filter))
}

/// True if any filterable column, as displayed, contains `needle`
/// case-insensitively. A blank needle matches all.
pub fn matches_global<T>(record: &T, columns: &[ColumnDescriptor<T>], needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    columns
        .iter()
        .filter(|c| c.is_filterable())
        .any(|c| c.kind().search_text(&c.value(record)).to_lowercase().contains(&needle))
}
