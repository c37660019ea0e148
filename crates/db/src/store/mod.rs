//! The storage seam shared by every request handler.
//!
//! Services hold an `Arc<dyn QueryStore>` handed to them at construction.
//! Production wires in [`PgQueryStore`]; tests use [`MemoryQueryStore`] or
//! their own failing doubles.

mod memory;

use aimode_core::pagination::Page;
use aimode_core::types::Timestamp;
use async_trait::async_trait;

pub use memory::MemoryQueryStore;

use crate::models::query_record::{NewQueryRecord, QueryRecord, TopQuery};
use crate::repositories::QueryRecordRepo;
use crate::DbPool;

/// Append-only document store for query records.
///
/// Listings are ordered by event time descending with the id as tie-breaker,
/// so consecutive pages never overlap.
#[async_trait]
pub trait QueryStore: Send + Sync {
    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), sqlx::Error>;

    /// Append one record and return it with its generated id.
    async fn insert(&self, record: &NewQueryRecord) -> Result<QueryRecord, sqlx::Error>;

    async fn list_by_uid(&self, uid: &str, page: Page) -> Result<Vec<QueryRecord>, sqlx::Error>;

    async fn count_by_uid(&self, uid: &str) -> Result<i64, sqlx::Error>;

    /// List across all users, optionally keeping only queries matching
    /// `search` as a case-insensitive regular expression.
    async fn list(&self, search: Option<&str>, page: Page)
        -> Result<Vec<QueryRecord>, sqlx::Error>;

    async fn count(&self, search: Option<&str>) -> Result<i64, sqlx::Error>;

    async fn count_distinct_uids(&self) -> Result<i64, sqlx::Error>;

    async fn count_created_since(&self, since: Timestamp) -> Result<i64, sqlx::Error>;

    /// Group by exact query text; most frequent first.
    async fn top_queries(&self, limit: i64) -> Result<Vec<TopQuery>, sqlx::Error>;
}

/// [`QueryStore`] backed by the PostgreSQL pool.
#[derive(Clone)]
pub struct PgQueryStore {
    pool: DbPool,
}

impl PgQueryStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl QueryStore for PgQueryStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }

    async fn insert(&self, record: &NewQueryRecord) -> Result<QueryRecord, sqlx::Error> {
        QueryRecordRepo::create(&self.pool, record).await
    }

    async fn list_by_uid(&self, uid: &str, page: Page) -> Result<Vec<QueryRecord>, sqlx::Error> {
        QueryRecordRepo::list_by_uid(&self.pool, uid, page).await
    }

    async fn count_by_uid(&self, uid: &str) -> Result<i64, sqlx::Error> {
        QueryRecordRepo::count_by_uid(&self.pool, uid).await
    }

    async fn list(
        &self,
        search: Option<&str>,
        page: Page,
    ) -> Result<Vec<QueryRecord>, sqlx::Error> {
        QueryRecordRepo::list(&self.pool, search, page).await
    }

    async fn count(&self, search: Option<&str>) -> Result<i64, sqlx::Error> {
        QueryRecordRepo::count(&self.pool, search).await
    }

    async fn count_distinct_uids(&self) -> Result<i64, sqlx::Error> {
        QueryRecordRepo::count_distinct_uids(&self.pool).await
    }

    async fn count_created_since(&self, since: Timestamp) -> Result<i64, sqlx::Error> {
        QueryRecordRepo::count_created_since(&self.pool, since).await
    }

    async fn top_queries(&self, limit: i64) -> Result<Vec<TopQuery>, sqlx::Error> {
        QueryRecordRepo::top_queries(&self.pool, limit).await
    }
}
