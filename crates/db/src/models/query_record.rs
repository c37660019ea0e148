//! Query record entity model and its caller-facing projections.

use aimode_core::query_event::uid_prefix;
use aimode_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `queries` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct QueryRecord {
    pub id: DbId,
    pub uid: String,
    pub query: String,
    pub full_url: String,
    #[sqlx(rename = "event_time")]
    pub timestamp: Timestamp,
    pub created_at: Timestamp,
    pub ip_hash: Option<String>,
}

/// DTO for inserting a record. `created_at` is assigned by the caller.
#[derive(Debug, Clone)]
pub struct NewQueryRecord {
    pub uid: String,
    pub query: String,
    pub full_url: String,
    pub timestamp: Timestamp,
    pub created_at: Timestamp,
    pub ip_hash: Option<String>,
}

/// A record as returned to its owner: no uid, no ip hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserQueryView {
    pub id: DbId,
    pub query: String,
    pub full_url: String,
    pub timestamp: Timestamp,
    pub created_at: Timestamp,
}

impl From<QueryRecord> for UserQueryView {
    fn from(record: QueryRecord) -> Self {
        Self {
            id: record.id,
            query: record.query,
            full_url: record.full_url,
            timestamp: record.timestamp,
            created_at: record.created_at,
        }
    }
}

/// A record in the global listing: uid cut to its prefix, no url, no ip hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedactedQueryView {
    pub id: DbId,
    pub uid: String,
    pub query: String,
    pub timestamp: Timestamp,
    pub created_at: Timestamp,
}

impl From<QueryRecord> for RedactedQueryView {
    fn from(record: QueryRecord) -> Self {
        Self {
            id: record.id,
            uid: uid_prefix(&record.uid),
            query: record.query,
            timestamp: record.timestamp,
            created_at: record.created_at,
        }
    }
}

/// One group of the top-queries aggregation.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct TopQuery {
    pub query: String,
    pub count: i64,
    #[serde(rename = "lastSeen")]
    pub last_seen: Timestamp,
}

/// Aggregate analytics over the whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryStats {
    pub total_queries: i64,
    pub unique_users: i64,
    pub today_queries: i64,
    pub week_queries: i64,
    pub top_queries: Vec<TopQuery>,
}
