//! Per-request parameters accepted by the CSUGR operations.
//!
//! Hooks usually build these and store them in the request's
//! [`Prs`](crate::resource::prs::Prs); the params factory reads them back
//! before the core action runs.

use mongodb::bson::Document;
use serde::{Deserialize, Serialize};

/// Page requested when none is given.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when none is given. Large enough to mean "everything".
pub const DEFAULT_LIMIT: u64 = 1000 * 1000;

/// Parameters used in search query execution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Filter applied to the collection.
    pub query: Document,
    /// 1-based page to retrieve. Values below one select the first page.
    pub page: i64,
    /// Documents per page. Zero falls back to [`DEFAULT_LIMIT`].
    pub limit: u64,
    /// Sort specification.
    pub sort: Document,
    /// Projection applied to every returned document.
    pub fields: Document,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            query: Document::new(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort: Document::new(),
            fields: Document::new(),
        }
    }
}

impl SearchParams {
    pub fn new(query: Document) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }

    pub fn paginate(mut self, page: i64, limit: u64) -> Self {
        self.page = page;
        self.limit = limit;
        self
    }

    pub fn sort(mut self, sort: Document) -> Self {
        self.sort = sort;
        self
    }

    pub fn fields(mut self, fields: Document) -> Self {
        self.fields = fields;
        self
    }

    /// Page after applying the default for zero.
    pub fn resolved_page(&self) -> i64 {
        if self.page == 0 { DEFAULT_PAGE } else { self.page }
    }

    /// Limit after applying the default for zero.
    pub fn resolved_limit(&self) -> u64 {
        if self.limit == 0 {
            DEFAULT_LIMIT
        } else {
            self.limit
        }
    }
}

/// Parameters used in update operations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateParams {
    /// Additional conditions the target document must satisfy.
    pub query: Document,
    /// Changes applied via `$set` on top of the request body.
    pub changes: Document,
}

/// Parameters used in single document retrieval.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetParams {
    /// Additional conditions the target document must satisfy.
    pub query: Document,
    /// Fields to project on.
    pub fields: Document,
}

/// Parameters used in remove operations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoveParams {
    /// Additional conditions the target document must satisfy.
    pub query: Document,
}
