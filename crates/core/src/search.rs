//! Pattern matching for the global query listing's `search` filter.
//!
//! The filter is a case-insensitive regular expression matched anywhere in the
//! query text. PostgreSQL evaluates it with `~*`; the in-memory store and the
//! request validation use [`search_regex`].

use regex::{Regex, RegexBuilder};

use crate::error::CoreError;

/// Longest accepted `search` pattern, in bytes.
pub const MAX_SEARCH_PATTERN_LEN: usize = 256;

/// Compile `pattern` as a case-insensitive, unanchored regular expression.
pub fn search_regex(pattern: &str) -> Result<Regex, CoreError> {
    if pattern.len() > MAX_SEARCH_PATTERN_LEN {
        return Err(CoreError::Validation(format!(
            "search pattern exceeds maximum length of {MAX_SEARCH_PATTERN_LEN}"
        )));
    }
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| CoreError::Validation(format!("Invalid search pattern: {e}")))
}

/// Normalize a raw `search` parameter: blank means no filter.
pub fn normalize_search(search: Option<&str>) -> Option<&str> {
    search.filter(|s| !s.trim().is_empty())
}
