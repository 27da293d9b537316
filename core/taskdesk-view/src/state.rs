//! Sort, filter and page settings of one view.
//!
//! ```
//! use taskdesk_view::{CellValue, ColumnDescriptor, RecordView, SortSpec};
//!
//! let columns = vec![ColumnDescriptor::text("name", |s: &String| CellValue::text(s.as_str()))];
//! let mut view = RecordView::new(vec!["b".to_string(), "a".to_string()], columns).unwrap();
//! view.set_sort("name").unwrap();
//! view.set_global_filter("a");
//!
//! let state = view.state();
//! assert_eq!(state.sort(), Some(&SortSpec::asc("name")));
//! assert_eq!(state.global_filter(), Some("a"));
//! assert!(state.is_filtered());
//! assert_eq!(state.page().index, 0);
//! ```

use crate::filter::FilterValue;
use crate::page::PageRequest;
use crate::sort::SortSpec;
use std::collections::BTreeMap;

/// Everything a view remembers about how it is being looked at.
///
/// Owned by exactly one [`RecordView`](crate::RecordView) and changed only
/// through its setters; callers get read access.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub(crate) sort: Option<SortSpec>,
    pub(crate) filters: BTreeMap<String, FilterValue>,
    pub(crate) global_filter: Option<String>,
    pub(crate) page: PageRequest,
}

impl ViewState {
    pub(crate) fn new(page_size: usize) -> Self {
        Self {
            sort: None,
            filters: BTreeMap::new(),
            global_filter: None,
            page: PageRequest::new(0, page_size),
        }
    }

    /// The active sort, if any.
    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn filter(&self, column_id: &str) -> Option<&FilterValue> {
        self.filters.get(column_id)
    }

    /// Active column filters, ordered by column id.
    pub fn filters(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.filters.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The free-text filter, if one is set. Blank input is never stored.
    pub fn global_filter(&self) -> Option<&str> {
        self.global_filter.as_deref()
    }

    /// The requested page, already clamped to the current result.
    pub fn page(&self) -> PageRequest {
        self.page
    }

    /// Whether any column or global filter is active.
    pub fn is_filtered(&self) -> bool {
        !self.filters.is_empty() || self.global_filter.is_some()
    }
}
