//! Grid query state: page, page size, search, sort

use plaza_rpc::DEFAULT_PAGE_SIZES;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

/// Sort direction for one column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Parameter form the fetch procedure expects
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// Active sort: column plus direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub column: String,
    pub direction: SortDirection,
}

/// Query state for one table grid.
///
/// Every mutation follows the fixed rules: re-sorting the current column
/// flips direction and keeps the page; sorting a new column resets to
/// ascending and page 1; search and page-size changes reset to page 1.
#[derive(Debug, Clone, PartialEq)]
pub struct GridQuery {
    page: u64,
    page_size: usize,
    search: String,
    sort: Option<Sort>,
    page_sizes: Vec<usize>,
}

impl Default for GridQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl GridQuery {
    pub fn new() -> Self {
        Self {
            page: 1,
            page_size: 25,
            search: String::new(),
            sort: None,
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
        }
    }

    /// Restrict the selectable page sizes. The current size is kept when it
    /// is still in the set, otherwise the first option takes over.
    pub fn with_page_sizes(mut self, sizes: Vec<usize>) -> Self {
        if !sizes.contains(&self.page_size) {
            if let Some(first) = sizes.first() {
                self.page_size = *first;
            }
        }
        self.page_sizes = sizes;
        self
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    pub fn page_sizes(&self) -> &[usize] {
        &self.page_sizes
    }

    /// Navigate to a page (1-based). Out-of-range pages are allowed; the
    /// server answers them with an empty row set, not an error.
    pub fn set_page(&mut self, page: u64) {
        self.page = page.max(1);
    }

    /// Change the page size. Only values from the configured set are
    /// accepted; any accepted change resets to page 1.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        if !self.page_sizes.contains(&size) {
            return false;
        }
        if size != self.page_size {
            self.page_size = size;
            self.page = 1;
        }
        true
    }

    /// Replace the free-text search term, resetting to page 1 on change
    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term != self.search {
            self.search = term;
            self.page = 1;
        }
    }

    /// Click a column header: same column flips direction and keeps the
    /// current page; a different column starts ascending at page 1.
    pub fn toggle_sort(&mut self, column: &str) {
        match &mut self.sort {
            Some(sort) if sort.column == column => {
                sort.direction = sort.direction.toggled();
            }
            _ => {
                self.sort = Some(Sort {
                    column: column.to_string(),
                    direction: SortDirection::Ascending,
                });
                self.page = 1;
            }
        }
    }

    /// Argument object for the paginated-fetch procedure
    pub fn as_args(&self, table: &str) -> JsonValue {
        json!({
            "table_name": table,
            "page": self.page,
            "page_size": self.page_size,
            "search_term": self.search,
            "sort_column": self.sort.as_ref().map(|s| s.column.as_str()),
            "sort_direction": self.sort.as_ref().map(|s| s.direction.as_param()),
        })
    }
}
