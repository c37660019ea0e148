//! Incoming telemetry events: validation, normalization and uid redaction.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Message returned when any required event field is absent or empty.
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields: uid, query, full_url, ts";

/// Message returned when a uid path parameter is too short.
pub const INVALID_UID_MESSAGE: &str = "Valid uid parameter is required";

/// Minimum uid length accepted by per-user reads.
pub const MIN_UID_LEN: usize = 8;

/// Number of uid characters ever shown back to a caller.
pub const UID_PREFIX_LEN: usize = 8;

/// Raw event body as posted by the browser extension.
///
/// Every field is optional at the serde level so that an absent field turns
/// into a validation error with a single, stable message rather than a
/// deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct QueryEventInput {
    #[validate(required, length(min = 1))]
    pub uid: Option<String>,
    #[validate(required, length(min = 1))]
    pub query: Option<String>,
    #[validate(required, length(min = 1))]
    pub full_url: Option<String>,
    /// Event time: epoch milliseconds or a date string.
    #[validate(required)]
    pub ts: Option<serde_json::Value>,
}

/// A validated, normalized event ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryEvent {
    pub uid: String,
    pub query: String,
    pub full_url: String,
    pub timestamp: Timestamp,
}

impl QueryEventInput {
    /// Validate required fields, trim the query and parse the event time.
    pub fn into_event(self) -> Result<QueryEvent, CoreError> {
        self.validate()
            .map_err(|_| CoreError::Validation(MISSING_FIELDS_MESSAGE.into()))?;

        let (Some(uid), Some(query), Some(full_url), Some(ts)) =
            (self.uid, self.query, self.full_url, self.ts)
        else {
            return Err(CoreError::Validation(MISSING_FIELDS_MESSAGE.into()));
        };

        if matches!(&ts, serde_json::Value::String(s) if s.trim().is_empty()) {
            return Err(CoreError::Validation(MISSING_FIELDS_MESSAGE.into()));
        }

        let query = query.trim();
        if query.is_empty() {
            return Err(CoreError::Validation("query must not be blank".into()));
        }

        Ok(QueryEvent {
            uid,
            query: query.to_string(),
            full_url,
            timestamp: parse_event_time(&ts)?,
        })
    }
}

/// Parse the caller-supplied `ts` scalar.
///
/// Numbers are epoch milliseconds. Strings may be RFC 3339, a naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC), a bare `YYYY-MM-DD` (UTC
/// midnight) or a decimal millisecond count.
pub fn parse_event_time(value: &serde_json::Value) -> Result<Timestamp, CoreError> {
    let parsed = match value {
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(ms) => DateTime::from_timestamp_millis(ms),
            None => n
                .as_f64()
                .filter(|f| f.is_finite())
                .and_then(|f| DateTime::from_timestamp_millis(f.trunc() as i64)),
        },
        serde_json::Value::String(s) => parse_time_str(s.trim()),
        _ => None,
    };

    parsed.ok_or_else(|| CoreError::Validation("Invalid ts value".into()))
}

fn parse_time_str(s: &str) -> Option<Timestamp> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    s.parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
}

/// Reject uids too short to scope a per-user read.
pub fn validate_uid(uid: &str) -> Result<(), CoreError> {
    if uid.chars().count() < MIN_UID_LEN {
        return Err(CoreError::Validation(INVALID_UID_MESSAGE.into()));
    }
    Ok(())
}

/// The first [`UID_PREFIX_LEN`] characters of a uid.
pub fn uid_prefix(uid: &str) -> String {
    uid.chars().take(UID_PREFIX_LEN).collect()
}

/// A uid prefix with a trailing ellipsis, for echoing back to the owner.
pub fn masked_uid(uid: &str) -> String {
    format!("{}...", uid_prefix(uid))
}

/// Shorten free text for log lines, appending `...` when truncated.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
