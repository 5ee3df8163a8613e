//! Pagination parameters for consistent paging across all list endpoints

use records_dal::PageRequest;
use serde::Deserialize;
use utoipa::IntoParams;

/// Standard pagination parameters for list endpoints.
///
/// `page`/`limit` drive the offset-style envelope; a `cursor` from a prior
/// response resumes natively after the last returned record and supersedes
/// `page` when both are supplied.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PaginationParams {
    /// 1-based page number
    #[param(example = 1, minimum = 1)]
    pub page: Option<u32>,

    /// Page size, clamped between 1 and 100
    #[param(example = 10, minimum = 1, maximum = 100)]
    pub limit: Option<u32>,

    /// Opaque resume cursor from a previous page's `nextCursor`
    pub cursor: Option<String>,
}

impl PaginationParams {
    /// Get the page number (defaults to 1, minimum 1)
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Get the page size (defaults to 10, clamped between 1 and 100)
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    /// Lower to a DAL page request
    pub fn page_request(&self) -> PageRequest {
        let offset = match (&self.cursor, self.page()) {
            (Some(_), _) | (None, 1) => None,
            (None, page) => Some(((page - 1) * self.limit()) as usize),
        };

        PageRequest {
            page_size: Some(self.limit() as usize),
            cursor: self.cursor.clone(),
            offset,
        }
    }
}
