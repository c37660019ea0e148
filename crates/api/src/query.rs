//! Query-string parameter types for the listing endpoints.
//!
//! Pagination values are kept as raw strings here and parsed by
//! `aimode_core::pagination::Page` so that malformed input produces a
//! validation error instead of an extractor rejection.

use serde::Deserialize;

/// `?limit=&skip=` for the per-user listing.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<String>,
    pub skip: Option<String>,
}

/// `?limit=&skip=&search=` for the global listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListQueriesParams {
    pub limit: Option<String>,
    pub skip: Option<String>,
    /// Case-insensitive substring filter on the query text.
    pub search: Option<String>,
}
