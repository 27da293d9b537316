//! Client-side record views for Taskdesk.
//!
//! A [`RecordView`] owns an in-memory collection of records, a set of
//! [`ColumnDescriptor`]s and a [`ViewState`], and derives a [`Projection`]:
//! the rows of the current page plus paging metadata.
//!
//! # Pipeline
//!
//! Every state or source change re-runs the same fixed pipeline:
//!
//! 1. **Column filters**: a record must satisfy every active column filter
//! 2. **Global filter**: a record must match on at least one filterable column
//! 3. **Sort**: stable; missing or non-comparable values always sort last
//! 4. **Page**: slice the result; the page index is clamped when results shrink
//!
//! The steps are exposed as free functions in [`filter`], [`sort`] and
//! [`page`] so they can be tested and reused on their own.
//!
//! # Example
//!
//! ```
//! use taskdesk_view::{CellValue, ColumnDescriptor, RecordView};
//!
//! struct Row { id: &'static str, status: &'static str }
//!
//! let rows = vec![
//!     Row { id: "a", status: "todo" },
//!     Row { id: "b", status: "done" },
//!     Row { id: "c", status: "todo" },
//! ];
//! let columns = vec![ColumnDescriptor::text("status", |r: &Row| CellValue::text(r.status))];
//!
//! let mut view = RecordView::new(rows, columns).unwrap();
//! view.set_column_filter_text("status", "todo").unwrap();
//!
//! let projection = view.projection();
//! assert_eq!(projection.total_matching, 2);
//! assert_eq!(projection.page_rows.iter().map(|r| r.id).collect::<Vec<_>>(), ["a", "c"]);
//! ```

mod column;
mod engine;
mod error;
pub mod filter;
pub mod page;
pub mod presets;
pub mod sort;
mod state;
mod value;

pub use column::{Accessor, ColumnDescriptor, ColumnKind};
pub use engine::{Projection, RecordView, ViewConfig, DEFAULT_PAGE_SIZE};
pub use error::{ViewError, ViewResult};
pub use filter::FilterValue;
pub use page::PageRequest;
pub use sort::{SortDirection, SortSpec};
pub use state::ViewState;
pub use value::CellValue;
