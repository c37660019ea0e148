//! Pagination parsing for list endpoints.
//!
//! Query-string values arrive as raw strings. They are parsed explicitly and
//! clamped into a [`Page`] so the storage layer never sees a negative offset or
//! an unbounded window.

use crate::error::CoreError;

/// Default page size for the per-user listing.
pub const DEFAULT_USER_LIMIT: i64 = 100;

/// Default page size for the global listing.
pub const DEFAULT_ALL_LIMIT: i64 = 50;

/// Upper bound on any requested page size.
pub const MAX_PAGE_LIMIT: i64 = 500;

/// A validated `limit`/`skip` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub skip: i64,
}

impl Page {
    /// Parse optional raw `limit` and `skip` values.
    ///
    /// Absent or blank values fall back to `default_limit` and `0`. A value
    /// that is not a base-10 integer is rejected. Parsed values are clamped
    /// with [`clamp_limit`] and [`clamp_offset`].
    pub fn parse(
        limit: Option<&str>,
        skip: Option<&str>,
        default_limit: i64,
    ) -> Result<Self, CoreError> {
        let limit = parse_param("limit", limit)?;
        let skip = parse_param("skip", skip)?;

        Ok(Self {
            limit: clamp_limit(limit, default_limit, MAX_PAGE_LIMIT),
            skip: clamp_offset(skip),
        })
    }
}

fn parse_param(name: &str, raw: Option<&str>) -> Result<Option<i64>, CoreError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| CoreError::Validation(format!("{name} must be an integer"))),
    }
}

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
