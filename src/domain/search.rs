//! Search result envelope returned by the search operation.

use serde::{Deserialize, Serialize};

/// Pagination information on the current page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentSection {
    /// Number of documents in the current page.
    pub count: usize,
    /// 1-based page number of the current page.
    pub page: u64,
    /// Documents allowed per page.
    pub limit: u64,
}

/// Pagination information for the entire result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalSection {
    /// Number of documents matching the query.
    pub count: u64,
    /// Pages available for the entire result.
    pub pages: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub current: CurrentSection,
    pub total: TotalSection,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMeta {
    pub pagination: PaginationMeta,
}

/// Object created after a successful search.
///
/// Houses the page of documents together with paging meta information.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult<T> {
    pub data: Vec<T>,
    pub meta: SearchMeta,
}

impl<T> SearchResult<T> {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
