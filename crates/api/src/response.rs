//! Response envelopes for the query endpoints.
//!
//! Every success body carries `success: true` next to its payload, which is
//! what the browser extension checks before reading the rest.

use aimode_core::types::{DbId, Timestamp};
use aimode_db::models::query_record::{QueryStats, RedactedQueryView, UserQueryView};
use serde::Serialize;

/// `201` body for a stored event.
#[derive(Debug, Serialize)]
pub struct StoredResponse {
    pub success: bool,
    pub id: DbId,
    /// Server-assigned `created_at` of the new record.
    pub timestamp: Timestamp,
}

/// One user's records.
#[derive(Debug, Serialize)]
pub struct UserQueriesResponse {
    pub success: bool,
    pub queries: Vec<UserQueryView>,
    pub total: i64,
    pub count: usize,
    /// The first eight characters of the requested uid, followed by `...`.
    pub uid: String,
}

/// Records across all users.
#[derive(Debug, Serialize)]
pub struct QueriesResponse {
    pub success: bool,
    pub queries: Vec<RedactedQueryView>,
    pub total: i64,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: QueryStats,
}
