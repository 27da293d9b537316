//! Record view engine: a derived, synchronous projection over records.
//!
//! The engine never talks to the backend. Callers feed it records (usually
//! straight from a list command) and drive it with intent-level setters;
//! after every change the matching set is re-derived and the page index is
//! clamped into range.

use crate::column::ColumnDescriptor;
use crate::error::{ViewError, ViewResult};
use crate::filter::{self, FilterValue};
use crate::page::{self, PageRequest};
use crate::sort::{self, SortDirection, SortSpec};
use crate::state::ViewState;
use std::collections::HashSet;
use taskdesk_model::Record;
use tracing::debug;

/// Rows per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Configuration for a record view.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Page size a freshly mounted view starts with.
    pub default_page_size: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// What a view currently shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection<'a, T> {
    /// Rows of the current page, in display order.
    pub page_rows: Vec<&'a T>,
    /// Rows passing all filters, independent of pagination.
    pub total_matching: usize,
    /// `ceil(total_matching / page_size)`, at least 1.
    pub page_count: usize,
    /// Current (clamped) page index.
    pub page_index: usize,
    pub can_prev: bool,
    pub can_next: bool,
}

/// A sorted, filtered, paginated view over an in-memory collection.
pub struct RecordView<T> {
    records: Vec<T>,
    columns: Vec<ColumnDescriptor<T>>,
    state: ViewState,
    /// Indices into `records` after filter + sort.
    matching: Vec<usize>,
}

impl<T> RecordView<T> {
    /// Creates a view with the default configuration.
    pub fn new(records: Vec<T>, columns: Vec<ColumnDescriptor<T>>) -> ViewResult<Self> {
        Self::with_config(records, columns, ViewConfig::default())
    }

    /// Creates a view with a custom configuration.
    ///
    /// Fails if two columns share an id or the page size is zero.
    pub fn with_config(
        records: Vec<T>,
        columns: Vec<ColumnDescriptor<T>>,
        config: ViewConfig,
    ) -> ViewResult<Self> {
        if config.default_page_size == 0 {
            return Err(ViewError::ZeroPageSize);
        }
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.id()) {
                return Err(ViewError::DuplicateColumn(column.id().to_string()));
            }
        }

        let mut view = Self {
            records,
            columns,
            state: ViewState::new(config.default_page_size),
            matching: Vec::new(),
        };
        view.refresh();
        Ok(view)
    }

    // ── Accessors ────────────────────────────────────────────────

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn columns(&self) -> &[ColumnDescriptor<T>] {
        &self.columns
    }

    pub fn column(&self, column_id: &str) -> Option<&ColumnDescriptor<T>> {
        self.columns.iter().find(|c| c.id() == column_id)
    }

    /// The full source collection, unfiltered.
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Number of rows passing all filters.
    pub fn total_matching(&self) -> usize {
        self.matching.len()
    }

    pub fn page_count(&self) -> usize {
        page::page_count(self.matching.len(), self.state.page.size)
    }

    /// Every matching row in display order, across all pages.
    pub fn matching_rows(&self) -> impl Iterator<Item = &T> {
        self.matching.iter().map(|&i| &self.records[i])
    }

    /// Derives the current projection.
    pub fn projection(&self) -> Projection<'_, T> {
        let page_rows = page::slice(&self.matching, self.state.page)
            .iter()
            .map(|&i| &self.records[i])
            .collect();
        let page_count = self.page_count();
        let page_index = self.state.page.index;
        Projection {
            page_rows,
            total_matching: self.matching.len(),
            page_count,
            page_index,
            can_prev: page_index > 0,
            can_next: page_index + 1 < page_count,
        }
    }

    // ── Filters ──────────────────────────────────────────────────

    /// Sets the global filter. Blank text clears it.
    pub fn set_global_filter(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.state.global_filter = if text.trim().is_empty() {
            None
        } else {
            Some(text)
        };
        self.refresh();
    }

    pub fn clear_global_filter(&mut self) {
        self.state.global_filter = None;
        self.refresh();
    }

    /// Sets the filter for one column, replacing any previous one. An
    /// inactive filter (blank text) clears the column's filter instead.
    pub fn set_column_filter(&mut self, column_id: &str, value: FilterValue) -> ViewResult<()> {
        let column = self.require_column(column_id)?;
        if !column.is_filterable() {
            return Err(ViewError::NotFilterable(column_id.to_string()));
        }
        if value.is_active() {
            self.state.filters.insert(column_id.to_string(), value);
        } else {
            self.state.filters.remove(column_id);
        }
        self.refresh();
        Ok(())
    }

    /// Sets a column filter from user-typed text, interpreted by the
    /// column's kind (exact match for enum options and numbers).
    pub fn set_column_filter_text(&mut self, column_id: &str, input: &str) -> ViewResult<()> {
        let value = self.require_column(column_id)?.kind().parse_filter(input);
        self.set_column_filter(column_id, value)
    }

    /// Removes the filter on one column.
    pub fn clear_filter(&mut self, column_id: &str) -> ViewResult<()> {
        self.require_column(column_id)?;
        if self.state.filters.remove(column_id).is_some() {
            self.refresh();
        }
        Ok(())
    }

    /// Removes every column filter and the global filter.
    pub fn clear_filters(&mut self) {
        self.state.filters.clear();
        self.state.global_filter = None;
        self.refresh();
    }

    // ── Sorting ──────────────────────────────────────────────────

    /// Header-click sort: ascending → descending → none for the same
    /// column; a different column starts at ascending.
    pub fn set_sort(&mut self, column_id: &str) -> ViewResult<()> {
        self.require_sortable(column_id)?;
        self.state.sort = sort::toggle(self.state.sort.as_ref(), column_id);
        self.refresh();
        Ok(())
    }

    /// Sets (or with `None`, clears) the sort on `column_id` directly.
    pub fn set_sort_direction(
        &mut self,
        column_id: &str,
        direction: Option<SortDirection>,
    ) -> ViewResult<()> {
        self.require_sortable(column_id)?;
        self.state.sort = direction.map(|direction| SortSpec {
            column_id: column_id.to_string(),
            direction,
        });
        self.refresh();
        Ok(())
    }

    pub fn clear_sort(&mut self) {
        self.state.sort = None;
        self.refresh();
    }

    // ── Paging ───────────────────────────────────────────────────

    /// Moves to page `index`, clamped to the last page.
    pub fn go_to_page(&mut self, index: usize) {
        self.state.page.index = page::clamp_index(index, self.matching.len(), self.state.page.size);
    }

    /// Advances one page. Returns whether the page changed.
    pub fn next_page(&mut self) -> bool {
        let before = self.state.page.index;
        self.go_to_page(before + 1);
        self.state.page.index != before
    }

    /// Goes back one page. Returns whether the page changed.
    pub fn prev_page(&mut self) -> bool {
        let before = self.state.page.index;
        self.go_to_page(before.saturating_sub(1));
        self.state.page.index != before
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, size: usize) -> ViewResult<()> {
        if size == 0 {
            return Err(ViewError::ZeroPageSize);
        }
        self.state.page = PageRequest::new(0, size);
        Ok(())
    }

    // ── Source data ──────────────────────────────────────────────

    /// Replaces the source collection, e.g. after re-running a list command.
    pub fn set_records(&mut self, records: Vec<T>) {
        self.records = records;
        self.refresh();
    }

    // ── Internals ────────────────────────────────────────────────

    fn require_column(&self, column_id: &str) -> ViewResult<&ColumnDescriptor<T>> {
        self.column(column_id)
            .ok_or_else(|| ViewError::UnknownColumn(column_id.to_string()))
    }

    fn require_sortable(&self, column_id: &str) -> ViewResult<()> {
        if self.require_column(column_id)?.is_sortable() {
            Ok(())
        } else {
            Err(ViewError::NotSortable(column_id.to_string()))
        }
    }

    /// Re-runs filter → global filter → sort, then clamps the page index.
    fn refresh(&mut self) {
        let active: Vec<(&ColumnDescriptor<T>, &FilterValue)> = self
            .state
            .filters
            .iter()
            .filter_map(|(id, value)| {
                self.columns
                    .iter()
                    .find(|c| c.id() == id)
                    .map(|column| (column, value))
            })
            .collect();
        let global = self.state.global_filter.as_deref().unwrap_or("");

        let mut matching: Vec<usize> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| filter::matches_all(*r, &active))
            .filter(|(_, r)| filter::matches_global(*r, &self.columns, global))
            .map(|(i, _)| i)
            .collect();

        if let Some(spec) = &self.state.sort {
            if let Some(column) = self.columns.iter().find(|c| c.id() == spec.column_id) {
                sort::stable_sort_indices(&mut matching, &self.records, column, spec.direction);
            }
        }

        self.matching = matching;

        let clamped = page::clamp_index(
            self.state.page.index,
            self.matching.len(),
            self.state.page.size,
        );
        if clamped != self.state.page.index {
            debug!(
                from = self.state.page.index,
                to = clamped,
                matching = self.matching.len(),
                "page index clamped after result set shrank"
            );
            self.state.page.index = clamped;
        }
    }
}

impl<T: Record> RecordView<T> {
    /// Replaces the record with the same id, or appends it if unknown.
    pub fn upsert_record(&mut self, record: T) {
        match self.records.iter().position(|r| r.id() == record.id()) {
            Some(pos) => self.records[pos] = record,
            None => self.records.push(record),
        }
        self.refresh();
    }

    /// Removes the record with `id`. Returns whether one was removed.
    pub fn remove_record(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        let removed = self.records.len() != before;
        if removed {
            self.refresh();
        }
        removed
    }

    /// Looks a record up by id.
    pub fn find(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }
}

impl<T> std::fmt::Debug for RecordView<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordView")
            .field("records", &self.records.len())
            .field("columns", &self.columns)
            .field("state", &self.state)
            .field("matching", &self.matching.len())
            .finish()
    }
}
