//! Page inputs and outputs for list calls

use serde::Serialize;

/// Pagination inputs for a list call
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    pub page_size: Option<usize>,
    /// Opaque token from a previous page's `next_cursor`
    pub cursor: Option<String>,
    /// Records to skip before the page starts; used for page/limit callers
    pub offset: Option<usize>,
}

impl PageRequest {
    pub const DEFAULT_PAGE_SIZE: usize = 10;
    pub const MAX_PAGE_SIZE: usize = 100;

    /// Get the page size (defaults to 10, clamped between 1 and 100)
    pub fn page_size(&self) -> usize {
        self.page_size
            .unwrap_or(Self::DEFAULT_PAGE_SIZE)
            .clamp(1, Self::MAX_PAGE_SIZE)
    }
}

/// One page of records plus the cursor to resume after it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Absent exactly when `items` is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
        }
    }

    /// End-of-stream per the cursor contract
    pub fn is_end(&self) -> bool {
        self.items.is_empty()
    }
}
