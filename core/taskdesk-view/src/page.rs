//! Pagination primitives.

use serde::{Deserialize, Serialize};

/// Which page a view shows and how many rows it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub index: usize,
    pub size: usize,
}

impl PageRequest {
    /// Zero-based page `index` of `size` rows. Not clamped; views clamp the
    /// index against the current row count.
    pub fn new(index: usize, size: usize) -> Self {
        Self { index, size }
    }
}

/// Number of pages for `total` rows; never less than one.
pub fn page_count(total: usize, size: usize) -> usize {
    if size == 0 {
        return 1;
    }
    total.div_ceil(size).max(1)
}

/// Clamps `index` to the last valid page for `total` rows.
pub fn clamp_index(index: usize, total: usize, size: usize) -> usize {
    index.min(page_count(total, size) - 1)
}

/// The rows of page `request.index`. Out-of-range pages are empty.
pub fn slice<T>(rows: &[T], request: PageRequest) -> &[T] {
    let start = request.index.saturating_mul(request.size).min(rows.len());
    let end = start.saturating_add(request.size).min(rows.len());
    &rows[start..end]
}
