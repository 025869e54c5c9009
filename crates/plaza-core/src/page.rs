//! Paged fetch results

use crate::Record;

/// One server-side page of rows plus the totals needed to paginate
#[derive(Debug, Clone, Default)]
pub struct PageResult {
    /// Rows for this page, in server order
    pub rows: Vec<Record>,
    /// Total rows matching the query across all pages
    pub total_count: u64,
    /// Page size the fetch was issued with
    pub page_size: usize,
}

impl PageResult {
    pub fn new(rows: Vec<Record>, total_count: u64, page_size: usize) -> Self {
        Self {
            rows,
            total_count,
            page_size,
        }
    }

    /// Total number of pages: ceil(total_count / page_size)
    pub fn page_count(&self) -> u64 {
        page_count(self.total_count, self.page_size)
    }

    /// Number of rows in this page
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Compute ceil(total / page_size) without overflow
pub fn page_count(total: u64, page_size: usize) -> u64 {
    if page_size == 0 {
        return 0;
    }
    let size = page_size as u64;
    total.saturating_add(size - 1) / size
}
