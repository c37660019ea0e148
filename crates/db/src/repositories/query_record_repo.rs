//! Repository for the `queries` table.

use aimode_core::pagination::Page;
use aimode_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::query_record::{NewQueryRecord, QueryRecord, TopQuery};

/// Column list for `queries` queries.
const COLUMNS: &str = "id, uid, query, full_url, event_time, created_at, ip_hash";

/// Ordering shared by every listing: newest event first, id as tie-breaker.
const ORDER: &str = "ORDER BY event_time DESC, id DESC";

/// Append-only access to query records.
pub struct QueryRecordRepo;

impl QueryRecordRepo {
    /// Insert a record, returning it with its generated id.
    pub async fn create(pool: &PgPool, input: &NewQueryRecord) -> Result<QueryRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO queries (uid, query, full_url, event_time, created_at, ip_hash) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QueryRecord>(&query)
            .bind(&input.uid)
            .bind(&input.query)
            .bind(&input.full_url)
            .bind(input.timestamp)
            .bind(input.created_at)
            .bind(&input.ip_hash)
            .fetch_one(pool)
            .await
    }

    /// List one user's records.
    pub async fn list_by_uid(
        pool: &PgPool,
        uid: &str,
        page: Page,
    ) -> Result<Vec<QueryRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM queries \
             WHERE uid = $1 \
             {ORDER} \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, QueryRecord>(&query)
            .bind(uid)
            .bind(page.limit)
            .bind(page.skip)
            .fetch_all(pool)
            .await
    }

    /// Count all records for a user, ignoring pagination.
    pub async fn count_by_uid(pool: &PgPool, uid: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM queries WHERE uid = $1")
            .bind(uid)
            .fetch_one(pool)
            .await
    }

    /// List records across all users.
    ///
    /// When `search` is given, only records whose query matches it as a
    /// case-insensitive regular expression are returned.
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        page: Page,
    ) -> Result<Vec<QueryRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM queries \
             WHERE ($1::TEXT IS NULL OR query ~* $1) \
             {ORDER} \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, QueryRecord>(&query)
            .bind(search)
            .bind(page.limit)
            .bind(page.skip)
            .fetch_all(pool)
            .await
    }

    /// Count records matching the same filter as [`Self::list`].
    pub async fn count(pool: &PgPool, search: Option<&str>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM queries WHERE ($1::TEXT IS NULL OR query ~* $1)",
        )
        .bind(search)
        .fetch_one(pool)
        .await
    }

    /// Number of distinct uids.
    pub async fn count_distinct_uids(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(DISTINCT uid) FROM queries")
            .fetch_one(pool)
            .await
    }

    /// Number of records inserted at or after `since`.
    pub async fn count_created_since(pool: &PgPool, since: Timestamp) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM queries WHERE created_at >= $1")
            .bind(since)
            .fetch_one(pool)
            .await
    }

    /// Most frequent exact query texts with their latest event time.
    pub async fn top_queries(pool: &PgPool, limit: i64) -> Result<Vec<TopQuery>, sqlx::Error> {
        sqlx::query_as::<_, TopQuery>(
            "SELECT query, COUNT(*) AS count, MAX(event_time) AS last_seen \
             FROM queries \
             GROUP BY query \
             ORDER BY count DESC, last_seen DESC, query ASC \
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
