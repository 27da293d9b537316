//! Stable column sorting.

use crate::column::ColumnDescriptor;
use crate::value::CellValue;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// The active sort of a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column_id: String,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Ascending sort on `column_id`: smallest first, missing values last.
    pub fn asc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Descending sort on `column_id`. Missing values still sort last.
    pub fn desc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Next sort after a header click on `column_id`.
///
/// Repeated clicks on one column cycle ascending → descending → none;
/// clicking a different column starts over at ascending.
pub fn toggle(current: Option<&SortSpec>, column_id: &str) -> Option<SortSpec> {
    match current {
        Some(spec) if spec.column_id == column_id => match spec.direction {
            SortDirection::Asc => Some(SortSpec::desc(column_id)),
            SortDirection::Desc => None,
        },
        _ => Some(SortSpec::asc(column_id)),
    }
}

/// Orders two cells for `direction`, keeping non-comparable values last
/// in either direction.
pub fn compare_cells(a: &CellValue, b: &CellValue, direction: SortDirection) -> Ordering {
    match (a.is_comparable(), b.is_comparable()) {
        (false, false) => Ordering::Equal,
        (false, true) => Ordering::Greater,
        (true, false) => Ordering::Less,
        (true, true) => {
            let ord = a.compare(b).unwrap_or(Ordering::Equal);
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        }
    }
}

/// Sorts `rows` in place by `column`. Stable: rows with equal keys keep
/// their relative order in both directions.
pub fn stable_sort_by_column<T>(
    rows: &mut Vec<&T>,
    column: &ColumnDescriptor<T>,
    direction: SortDirection,
) {
    let mut keyed: Vec<(CellValue, &T)> = rows.drain(..).map(|r| (column.value(r), r)).collect();
    keyed.sort_by(|(a, _), (b, _)| compare_cells(a, b, direction));
    rows.extend(keyed.into_iter().map(|(_, r)| r));
}

/// Index-based variant used by the engine: sorts positions into `records`.
pub(crate) fn stable_sort_indices<T>(
    indices: &mut Vec<usize>,
    records: &[T],
    column: &ColumnDescriptor<T>,
    direction: SortDirection,
) {
    let mut keyed: Vec<(CellValue, usize)> = indices
        .drain(..)
        .map(|i| (column.value(&records[i]), i))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare_cells(a, b, direction));
    indices.extend(keyed.into_iter().map(|(_, i)| i));
}
